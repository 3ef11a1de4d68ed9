use super::money::Money;
use crate::error::{ReservationError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    PaidTransfer,
    PaidCash,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::PaidTransfer => "paid_transfer",
            PaymentStatus::PaidCash => "paid_cash",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid_transfer" => Ok(PaymentStatus::PaidTransfer),
            "paid_cash" => Ok(PaymentStatus::PaidCash),
            other => Err(ReservationError::ValidationError(format!(
                "unknown payment status '{}' (expected pending, paid_transfer or paid_cash)",
                other
            ))),
        }
    }
}

/// A candidate record, validated but not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub passport_number: String,
    pub passport_expiry: Option<NaiveDate>,
    pub trip_date: NaiveDate,
    pub base_price: Money,
    pub final_price: Money,
}

impl NewReservation {
    /// Checks the fields every store requires before writing.
    pub fn ensure_required(&self) -> Result<()> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("passport_number", &self.passport_number),
        ] {
            if value.trim().is_empty() {
                return Err(ReservationError::ValidationError(format!(
                    "{} is required",
                    field
                )));
            }
        }
        Ok(())
    }

    /// Builds the stored record once the store has assigned an id.
    pub fn into_reservation(self, id: i64) -> Reservation {
        Reservation {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            passport_number: self.passport_number,
            passport_expiry: self.passport_expiry,
            trip_date: self.trip_date,
            base_price: self.base_price,
            final_price: self.final_price,
            payment_status: PaymentStatus::Pending,
            invoice_number: None,
            amount_paid: Money::ZERO,
        }
    }
}

/// One client's booking for a trip date.
///
/// Only the payment fields change after creation, see [`PaymentUpdate`].
#[derive(Debug, PartialEq, Clone)]
pub struct Reservation {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub passport_number: String,
    pub passport_expiry: Option<NaiveDate>,
    pub trip_date: NaiveDate,
    pub base_price: Money,
    pub final_price: Money,
    pub payment_status: PaymentStatus,
    pub invoice_number: Option<String>,
    pub amount_paid: Money,
}

impl Reservation {
    pub fn client_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Flat overwrite of the payment fields. Any status may follow any other.
    pub fn apply_payment(&mut self, update: PaymentUpdate) {
        self.invoice_number = update.invoice_number;
        self.amount_paid = update.amount_paid;
        self.payment_status = update.status;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentUpdate {
    pub invoice_number: Option<String>,
    pub amount_paid: Money,
    pub status: PaymentStatus,
}

/// Display classification of a payment status on reports.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentTag {
    Unpaid,
    Paid,
}

impl PaymentTag {
    pub fn for_status(status: PaymentStatus) -> Self {
        if status.as_str().starts_with("paid") {
            PaymentTag::Paid
        } else {
            PaymentTag::Unpaid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candidate() -> NewReservation {
        NewReservation {
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            birth_date: None,
            passport_number: "AB1234567".to_string(),
            passport_expiry: None,
            trip_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            base_price: Money::new(dec!(2000)),
            final_price: Money::new(dec!(1800)),
        }
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::PaidTransfer,
            PaymentStatus::PaidCash,
        ] {
            assert_eq!(status.to_string().parse::<PaymentStatus>().unwrap(), status);
        }
        assert!(matches!(
            "paid".parse::<PaymentStatus>(),
            Err(ReservationError::ValidationError(_))
        ));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&PaymentStatus::PaidTransfer).unwrap();
        assert_eq!(json, "\"paid_transfer\"");
    }

    #[test]
    fn test_payment_tag_classification() {
        assert_eq!(PaymentTag::for_status(PaymentStatus::Pending), PaymentTag::Unpaid);
        assert_eq!(PaymentTag::for_status(PaymentStatus::PaidTransfer), PaymentTag::Paid);
        assert_eq!(PaymentTag::for_status(PaymentStatus::PaidCash), PaymentTag::Paid);
    }

    #[test]
    fn test_ensure_required() {
        assert!(candidate().ensure_required().is_ok());

        let mut missing = candidate();
        missing.last_name = "  ".to_string();
        assert!(matches!(
            missing.ensure_required(),
            Err(ReservationError::ValidationError(msg)) if msg.contains("last_name")
        ));
    }

    #[test]
    fn test_new_reservation_defaults() {
        let reservation = candidate().into_reservation(3);
        assert_eq!(reservation.id, 3);
        assert_eq!(reservation.payment_status, PaymentStatus::Pending);
        assert_eq!(reservation.amount_paid, Money::ZERO);
        assert_eq!(reservation.invoice_number, None);
    }

    #[test]
    fn test_apply_payment_allows_any_transition() {
        let mut reservation = candidate().into_reservation(1);
        reservation.apply_payment(PaymentUpdate {
            invoice_number: Some("FV/1/2025".to_string()),
            amount_paid: Money::new(dec!(1800)),
            status: PaymentStatus::PaidCash,
        });
        assert_eq!(reservation.payment_status, PaymentStatus::PaidCash);

        reservation.apply_payment(PaymentUpdate {
            invoice_number: None,
            amount_paid: Money::ZERO,
            status: PaymentStatus::Pending,
        });
        assert_eq!(reservation.payment_status, PaymentStatus::Pending);
        assert_eq!(reservation.invoice_number, None);
        assert_eq!(reservation.final_price, Money::new(dec!(1800)));
    }
}
