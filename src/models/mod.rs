//! Domain models for the back-office service.

pub mod payee;
pub mod rates;
pub mod trip;
pub mod user;

pub use payee::Payee;
pub use rates::{RateConfiguration, RateError};
pub use trip::{PaymentType, ReceiptTotals, TripRecord};
pub use user::{Sector, User, UserStatus};
