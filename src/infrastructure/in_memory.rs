use crate::domain::ports::ReservationStore;
use crate::domain::reservation::{NewReservation, PaymentUpdate, Reservation};
use crate::error::{ReservationError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_id: i64,
    reservations: BTreeMap<i64, Reservation>,
}

/// A thread-safe in-memory reservation store.
///
/// Uses `Arc<RwLock<..>>` so clones share the same records. Follows the same
/// contract as the SQLite store, including the (passport, trip date)
/// uniqueness check and last-name ordering. Nothing survives the process.
#[derive(Default, Clone)]
pub struct InMemoryReservationStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryReservationStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn create(&self, reservation: NewReservation) -> Result<Reservation> {
        reservation.ensure_required()?;

        let mut inner = self.inner.write().await;
        let duplicate = inner.reservations.values().any(|r| {
            r.passport_number == reservation.passport_number
                && r.trip_date == reservation.trip_date
        });
        if duplicate {
            return Err(ReservationError::DuplicateKey {
                passport_number: reservation.passport_number,
                trip_date: reservation.trip_date,
            });
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let stored = reservation.into_reservation(id);
        inner.reservations.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Reservation>> {
        let inner = self.inner.read().await;
        Ok(inner.reservations.get(&id).cloned())
    }

    async fn list_by_trip_date(&self, trip_date: NaiveDate) -> Result<Vec<Reservation>> {
        let inner = self.inner.read().await;
        // BTreeMap iterates by id, so the stable sort keeps ids ascending within a name.
        let mut matching: Vec<Reservation> = inner
            .reservations
            .values()
            .filter(|r| r.trip_date == trip_date)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.last_name.as_bytes().cmp(b.last_name.as_bytes()));
        Ok(matching)
    }

    async fn update_payment(&self, id: i64, update: PaymentUpdate) -> Result<Reservation> {
        let mut inner = self.inner.write().await;
        let reservation = inner
            .reservations
            .get_mut(&id)
            .ok_or(ReservationError::NotFound(id))?;
        reservation.apply_payment(update);
        Ok(reservation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::domain::reservation::PaymentStatus;
    use rust_decimal_macros::dec;

    fn candidate(last_name: &str, passport: &str, trip: NaiveDate) -> NewReservation {
        NewReservation {
            first_name: "Jan".to_string(),
            last_name: last_name.to_string(),
            birth_date: None,
            passport_number: passport.to_string(),
            passport_expiry: None,
            trip_date: trip,
            base_price: Money::new(dec!(1000)),
            final_price: Money::new(dec!(1000)),
        }
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_create_and_get() {
        let store = InMemoryReservationStore::new();
        let created = store
            .create(candidate("Nowak", "AB1", june_first()))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let retrieved = store.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(retrieved, created);
        assert!(store.get_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_duplicate_key() {
        let store = InMemoryReservationStore::new();
        store
            .create(candidate("Nowak", "AB1", june_first()))
            .await
            .unwrap();

        let result = store.create(candidate("Other", "AB1", june_first())).await;
        assert!(matches!(result, Err(ReservationError::DuplicateKey { .. })));

        // Same passport on another trip date is allowed.
        let later = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert!(store.create(candidate("Nowak", "AB1", later)).await.is_ok());
    }

    #[tokio::test]
    async fn test_in_memory_list_ordering() {
        let store = InMemoryReservationStore::new();
        for (name, passport) in [("Zielinski", "P1"), ("Adamska", "P2"), ("Kowalski", "P3")] {
            store
                .create(candidate(name, passport, june_first()))
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_by_trip_date(june_first())
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.last_name)
            .collect();
        assert_eq!(names, vec!["Adamska", "Kowalski", "Zielinski"]);

        let empty = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(store.list_by_trip_date(empty).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_update_payment_unknown_id() {
        let store = InMemoryReservationStore::new();
        let update = PaymentUpdate {
            invoice_number: None,
            amount_paid: Money::ZERO,
            status: PaymentStatus::PaidCash,
        };
        let result = store.update_payment(42, update).await;
        assert!(matches!(result, Err(ReservationError::NotFound(42))));
    }
}
