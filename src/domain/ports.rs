use super::reservation::{NewReservation, PaymentUpdate, Reservation};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistence port for reservation records.
///
/// Implementations enforce uniqueness of (passport_number, trip_date) and
/// never delete records.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Persists a new record and returns it with its generated id.
    async fn create(&self, reservation: NewReservation) -> Result<Reservation>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Reservation>>;
    /// Records for the date, ordered by last name then id.
    async fn list_by_trip_date(&self, trip_date: NaiveDate) -> Result<Vec<Reservation>>;
    /// Overwrites only the payment fields. Fails with `NotFound` for an unknown id.
    async fn update_payment(&self, id: i64, update: PaymentUpdate) -> Result<Reservation>;
}

pub type ReservationStoreBox = Box<dyn ReservationStore>;
