//! Payees (freight carriers paid through the protocol screen), backed by
//! the `payees` sheet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payee {
    pub id: String,
    pub name: String,
    /// CPF or CNPJ.
    pub document: String,
    /// PIX key used as the payment instrument identifier on receipts.
    pub pix_key: String,
    /// Default vehicle plate associated with this payee.
    pub vehicle_plate: String,
    pub created_at: Option<NaiveDate>,
}
