//! Per-screen view-models.
//!
//! Each render builds a fresh, immutable view from the records it shows;
//! screens never share mutable form state.

use crate::domain::reservation::{PaymentTag, Reservation};
use serde::Serialize;
use std::fmt;

/// Placeholder printed where a reservation has no invoice number.
pub const NO_INVOICE: &str = "none";

/// Lookup-before-edit screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationView {
    pub id: i64,
    pub client: String,
    pub passport_number: String,
    pub trip_date: String,
    pub birth_date: Option<String>,
    pub passport_expiry: Option<String>,
    pub base_price: String,
    pub final_price: String,
    pub payment_status: String,
    pub invoice_number: Option<String>,
    pub amount_paid: String,
}

impl From<&Reservation> for ReservationView {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            client: r.client_name(),
            passport_number: r.passport_number.clone(),
            trip_date: r.trip_date.to_string(),
            birth_date: r.birth_date.map(|d| d.to_string()),
            passport_expiry: r.passport_expiry.map(|d| d.to_string()),
            base_price: r.base_price.to_string(),
            final_price: r.final_price.to_string(),
            payment_status: r.payment_status.to_string(),
            invoice_number: r.invoice_number.clone(),
            amount_paid: r.amount_paid.to_string(),
        }
    }
}

impl fmt::Display for ReservationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reservation {}", self.id)?;
        writeln!(f, "  Client:       {}", self.client)?;
        writeln!(f, "  Passport:     {}", self.passport_number)?;
        writeln!(f, "  Trip date:    {}", self.trip_date)?;
        writeln!(f, "  Final price:  {}", self.final_price)?;
        writeln!(f, "  Status:       {}", self.payment_status)?;
        writeln!(
            f,
            "  Invoice:      {}",
            self.invoice_number.as_deref().unwrap_or(NO_INVOICE)
        )?;
        write!(f, "  Amount paid:  {}", self.amount_paid)
    }
}

/// One line of the per-trip payment report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: i64,
    pub client: String,
    pub final_price: String,
    pub amount_paid: String,
    pub status: String,
    pub invoice: String,
    pub tag: PaymentTag,
}

impl From<&Reservation> for ReportRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            client: r.client_name(),
            final_price: r.final_price.to_string(),
            amount_paid: r.amount_paid.to_string(),
            status: r.payment_status.to_string(),
            invoice: r
                .invoice_number
                .clone()
                .unwrap_or_else(|| NO_INVOICE.to_string()),
            tag: PaymentTag::for_status(r.payment_status),
        }
    }
}
