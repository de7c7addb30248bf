//! Freight trip records and the totals derived from them.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A single freight trip, as supplied by the external trip data source.
/// Immutable within a session; identified uniquely by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: String,
    pub reference: String,
    pub operation_date: Option<NaiveDate>,
    pub vehicle_plate: String,
    pub service_type: String,
    pub origin_terminal: String,
    pub destination_terminal: String,
    pub container_id: Option<String>,
    pub gross_value: Decimal,
}

/// How the payee is paid; determines whether the commission fee applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    CashUpfront,
    Term,
    FullInstallment,
}

impl PaymentType {
    /// The commission fee is charged only on cash-upfront settlements.
    pub fn commission_applies(&self) -> bool {
        matches!(self, PaymentType::CashUpfront)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::CashUpfront => "Cash upfront",
            PaymentType::Term => "Term",
            PaymentType::FullInstallment => "Full installment",
        }
    }
}

/// Derived receipt totals. Never stored; recomputed on every filter or
/// payment-type change.
///
/// Invariants: `net_total = gross_total - administrative_fee - commission_fee`,
/// and `commission_fee` is exactly zero unless the payment type is
/// cash-upfront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptTotals {
    pub gross_total: Decimal,
    pub administrative_fee: Decimal,
    pub commission_fee: Decimal,
    pub net_total: Decimal,
    pub record_count: usize,
    pub first_reference: Option<String>,
}

impl ReceiptTotals {
    /// Presentation copy with all monetary fields rounded to two decimal
    /// places, half away from zero (commercial rounding). Computation stays
    /// in full precision; rounding happens only at this boundary.
    pub fn rounded(&self) -> Self {
        Self {
            gross_total: round_currency(self.gross_total),
            administrative_fee: round_currency(self.administrative_fee),
            commission_fee: round_currency(self.commission_fee),
            net_total: round_currency(self.net_total),
            record_count: self.record_count,
            first_reference: self.first_reference.clone(),
        }
    }
}

/// Round a monetary amount to two decimal places, half away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
