//! Percentage deduction rates applied to gross freight value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateError {
    #[error("percentage rates must be zero or positive, got {0}")]
    NegativeRate(Decimal),
}

/// The two independently-ruled percentage deductions.
///
/// Owned by the settings component and passed by value into the fee
/// calculator; there is no shared mutable global. Session-scoped: rate
/// edits are not persisted remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfiguration {
    /// Applied unconditionally to every payment type.
    pub administrative_fee_pct: Decimal,
    /// Applied only to cash-upfront settlements.
    pub commission_fee_pct: Decimal,
}

impl RateConfiguration {
    /// Build a rate configuration, rejecting negative percentages at the
    /// boundary so the calculator never sees them.
    pub fn new(
        administrative_fee_pct: Decimal,
        commission_fee_pct: Decimal,
    ) -> Result<Self, RateError> {
        for rate in [administrative_fee_pct, commission_fee_pct] {
            if rate.is_sign_negative() && !rate.is_zero() {
                return Err(RateError::NegativeRate(rate));
            }
        }

        Ok(Self {
            administrative_fee_pct,
            commission_fee_pct,
        })
    }
}
