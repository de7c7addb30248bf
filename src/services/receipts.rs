//! Freight receipt calculation engine.
//!
//! Pure computation over trip records already resident in memory: plate
//! filtering, fee totals, and the formatted textual receipt. Totals are
//! recomputed on every call; at this data scale recomputation is O(n) and
//! cheap enough to redo synchronously.

use crate::models::{PaymentType, RateConfiguration, ReceiptTotals, TripRecord};
use crate::models::trip::round_currency;
use rust_decimal::Decimal;
use std::fmt::Write;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiptError {
    #[error("no vehicle plate informed; select a vehicle before emitting a receipt")]
    EmptyPlateQuery,

    #[error("no trips matched plate '{0}'")]
    NoMatchingTrips(String),
}

/// Narrow the trip collection to records whose plate contains the query as
/// a case-insensitive substring.
///
/// An empty query returns an empty set: an unscoped query must not
/// silently total the entire fleet.
pub fn filter_by_plate<'a>(records: &'a [TripRecord], query: &str) -> Vec<&'a TripRecord> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.vehicle_plate.to_lowercase().contains(&query))
        .collect()
}

/// Compute receipt totals for an already-filtered trip set.
///
/// Never fails: an empty set yields all-zero totals. The administrative
/// fee applies to every payment type; the commission fee only to
/// cash-upfront. Arithmetic stays in full `Decimal` precision; callers
/// round at the presentation boundary via [`ReceiptTotals::rounded`].
pub fn compute_totals(
    records: &[&TripRecord],
    rates: &RateConfiguration,
    payment_type: PaymentType,
) -> ReceiptTotals {
    let gross_total: Decimal = records.iter().map(|r| r.gross_value).sum();

    let administrative_fee = gross_total * rates.administrative_fee_pct / Decimal::ONE_HUNDRED;
    let commission_fee = if payment_type.commission_applies() {
        gross_total * rates.commission_fee_pct / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    ReceiptTotals {
        gross_total,
        administrative_fee,
        commission_fee,
        net_total: gross_total - administrative_fee - commission_fee,
        record_count: records.len(),
        first_reference: records.first().map(|r| r.reference.clone()),
    }
}

/// Payee metadata printed on the receipt header.
#[derive(Debug, Clone)]
pub struct ReceiptHeader {
    pub payee_name: String,
    pub pix_key: String,
    pub plate: String,
    pub payment_type: PaymentType,
}

/// Format totals plus payee metadata into the human-readable receipt.
///
/// The commission line is entirely absent for non-cash-upfront payment
/// types; a zero line would imply the fee was considered and waived rather
/// than not applicable.
pub fn render_receipt(header: &ReceiptHeader, totals: &ReceiptTotals) -> String {
    let totals = totals.rounded();
    let first_reference = totals.first_reference.as_deref().unwrap_or("none");

    let mut out = String::new();
    let _ = writeln!(out, "FREIGHT PAYMENT RECEIPT");
    let _ = writeln!(out, "=======================");
    let _ = writeln!(out, "Payee:          {}", header.payee_name);
    let _ = writeln!(out, "PIX key:        {}", header.pix_key);
    let _ = writeln!(out, "Vehicle plate:  {}", header.plate);
    let _ = writeln!(out, "Payment type:   {}", header.payment_type.label());
    let _ = writeln!(
        out,
        "Trips settled:  {} (first reference: {})",
        totals.record_count, first_reference
    );
    let _ = writeln!(out, "-----------------------");
    let _ = writeln!(out, "Gross total:         {}", format_brl(totals.gross_total));
    let _ = writeln!(
        out,
        "Administrative fee: -{}",
        format_brl(totals.administrative_fee)
    );
    if header.payment_type.commission_applies() {
        let _ = writeln!(out, "Commission fee:     -{}", format_brl(totals.commission_fee));
    }
    let _ = writeln!(out, "-----------------------");
    let _ = writeln!(out, "Net payable:         {}", format_brl(totals.net_total));
    out
}

/// Filter, total, and render in one step, applying the empty-selection
/// rules for receipt emission. Read-only: no stored state is touched.
pub fn build_receipt(
    records: &[TripRecord],
    plate_query: &str,
    rates: &RateConfiguration,
    header: &ReceiptHeader,
) -> Result<(ReceiptTotals, String), ReceiptError> {
    if plate_query.trim().is_empty() {
        return Err(ReceiptError::EmptyPlateQuery);
    }

    let matches = filter_by_plate(records, plate_query);
    if matches.is_empty() {
        return Err(ReceiptError::NoMatchingTrips(plate_query.trim().to_string()));
    }

    let totals = compute_totals(&matches, rates, header.payment_type);
    let text = render_receipt(header, &totals);
    Ok((totals.rounded(), text))
}

fn format_brl(amount: Decimal) -> String {
    format!("R$ {:.2}", round_currency(amount))
}
