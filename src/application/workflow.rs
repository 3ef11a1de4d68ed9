use crate::domain::money::Money;
use crate::domain::ports::ReservationStoreBox;
use crate::domain::reservation::{NewReservation, PaymentStatus, PaymentUpdate, Reservation};
use crate::error::{ReservationError, Result};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw field values of the "add reservation" screen, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct ReservationForm {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub passport_number: String,
    pub passport_expiry: String,
    pub trip_date: String,
    pub base_price: String,
    pub adjustment: String,
}

/// Raw field values of the "update payment" screen.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub invoice_number: String,
    pub amount_paid: String,
    pub status: String,
}

/// Reservations for one trip date, ordered by last name.
#[derive(Debug, Clone, PartialEq)]
pub struct TripReport {
    pub trip_date: NaiveDate,
    pub reservations: Vec<Reservation>,
}

impl TripReport {
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}

/// Parses a required ISO calendar date.
pub fn parse_date(field: &'static str, input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ReservationError::ValidationError(format!(
            "{} is required",
            field
        )));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ReservationError::InvalidFormat {
        field,
        value: input.to_string(),
    })
}

/// Blank means "not provided"; anything else must be a valid date.
pub fn parse_optional_date(field: &'static str, input: &str) -> Result<Option<NaiveDate>> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(field, input).map(Some)
    }
}

/// `final_price = base_price + adjustment`. No floor is applied.
pub fn compute_final_price(base_price: Money, adjustment: Money) -> Result<Money> {
    base_price
        .checked_add(adjustment)
        .ok_or_else(|| {
            ReservationError::ValidationError(format!(
                "final price out of range: {} + {}",
                base_price.to_storage(),
                adjustment.to_storage()
            ))
        })
}

/// Turns the add-screen fields into a candidate record.
///
/// Missing required fields are reported first, then date formats, then
/// numeric fields.
pub fn validate_reservation(form: &ReservationForm) -> Result<NewReservation> {
    for (field, value) in [
        ("first_name", &form.first_name),
        ("last_name", &form.last_name),
        ("passport_number", &form.passport_number),
        ("base_price", &form.base_price),
    ] {
        if value.trim().is_empty() {
            return Err(ReservationError::ValidationError(format!(
                "{} is required",
                field
            )));
        }
    }

    let birth_date = parse_optional_date("birth_date", &form.birth_date)?;
    let passport_expiry = parse_optional_date("passport_expiry", &form.passport_expiry)?;
    let trip_date = parse_date("trip_date", &form.trip_date)?;

    let base_price = Money::parse("base_price", &form.base_price)?;
    let adjustment = if form.adjustment.trim().is_empty() {
        Money::ZERO
    } else {
        Money::parse("adjustment", &form.adjustment)?
    };

    let final_price = compute_final_price(base_price, adjustment)?;

    Ok(NewReservation {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        birth_date,
        passport_number: form.passport_number.trim().to_string(),
        passport_expiry,
        trip_date,
        base_price,
        final_price,
    })
}

/// Turns the payment-screen fields into an update. A blank invoice clears it.
pub fn validate_payment(form: &PaymentForm) -> Result<PaymentUpdate> {
    let amount_paid = Money::parse("amount_paid", &form.amount_paid)?;
    let status = form.status.parse::<PaymentStatus>()?;
    let invoice = form.invoice_number.trim();

    Ok(PaymentUpdate {
        invoice_number: (!invoice.is_empty()).then(|| invoice.to_string()),
        amount_paid,
        status,
    })
}

/// The reservation workflow consumed by the presentation layer.
///
/// Owns the store and validates every free-text input before the store is
/// touched, so a rejected input never causes a write.
pub struct ReservationWorkflow {
    store: ReservationStoreBox,
}

impl ReservationWorkflow {
    pub fn new(store: ReservationStoreBox) -> Self {
        Self { store }
    }

    /// Validates the form, computes the final price and persists the record.
    pub async fn add(&self, form: &ReservationForm) -> Result<Reservation> {
        let candidate = validate_reservation(form)?;
        if candidate.final_price.is_negative() {
            warn!(
                passport = %candidate.passport_number,
                final_price = %candidate.final_price,
                "final price is negative"
            );
        }

        let reservation = self.store.create(candidate).await?;
        info!(
            id = reservation.id,
            trip_date = %reservation.trip_date,
            final_price = %reservation.final_price,
            "reservation created"
        );
        Ok(reservation)
    }

    /// Lookup before edit. `None` when the id is unknown.
    pub async fn find(&self, id: i64) -> Result<Option<Reservation>> {
        debug!(id, "looking up reservation");
        self.store.get_by_id(id).await
    }

    pub async fn update_payment(&self, id: i64, form: &PaymentForm) -> Result<Reservation> {
        let update = validate_payment(form)?;
        let reservation = self.store.update_payment(id, update).await?;
        info!(
            id,
            status = %reservation.payment_status,
            amount_paid = %reservation.amount_paid,
            "payment updated"
        );
        Ok(reservation)
    }

    /// Payment report for the trip date given as text.
    pub async fn report(&self, trip_date: &str) -> Result<TripReport> {
        let trip_date = parse_date("trip_date", trip_date)?;
        let reservations = self.store.list_by_trip_date(trip_date).await?;
        debug!(%trip_date, count = reservations.len(), "report generated");
        Ok(TripReport {
            trip_date,
            reservations,
        })
    }
}
