use crate::domain::money::Money;
use crate::domain::ports::ReservationStore;
use crate::domain::reservation::{NewReservation, PaymentStatus, PaymentUpdate, Reservation};
use crate::error::{ReservationError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, FromRow};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

static MIGRATOR: Migrator = sqlx::migrate!();

const COLUMNS: &str = "id, first_name, last_name, birth_date, passport_number, passport_expiry, \
     trip_date, base_price, final_price, payment_status, invoice_number, amount_paid";

#[derive(FromRow)]
struct ReservationRow {
    id: i64,
    first_name: String,
    last_name: String,
    birth_date: Option<NaiveDate>,
    passport_number: String,
    passport_expiry: Option<NaiveDate>,
    trip_date: NaiveDate,
    base_price: String,
    final_price: String,
    payment_status: String,
    invoice_number: Option<String>,
    amount_paid: String,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = ReservationError;

    fn try_from(row: ReservationRow) -> Result<Self> {
        let id = row.id;
        let corrupt = |e: ReservationError| ReservationError::CorruptRecord {
            id,
            reason: e.to_string(),
        };

        Ok(Reservation {
            id,
            first_name: row.first_name,
            last_name: row.last_name,
            birth_date: row.birth_date,
            passport_number: row.passport_number,
            passport_expiry: row.passport_expiry,
            trip_date: row.trip_date,
            base_price: Money::parse("base_price", &row.base_price).map_err(corrupt)?,
            final_price: Money::parse("final_price", &row.final_price).map_err(corrupt)?,
            payment_status: row
                .payment_status
                .parse::<PaymentStatus>()
                .map_err(corrupt)?,
            invoice_number: row.invoice_number,
            amount_paid: Money::parse("amount_paid", &row.amount_paid).map_err(corrupt)?,
        })
    }
}

/// A persistent store backed by a single SQLite file.
///
/// Holds no connection between calls. Every operation opens a connection,
/// runs exactly one statement in auto-commit mode and closes the connection
/// again, whether the statement succeeded or not.
#[derive(Debug, Clone)]
pub struct SqliteReservationStore {
    options: SqliteConnectOptions,
    path: PathBuf,
}

impl SqliteReservationStore {
    /// Opens or creates the database file at `path` and applies the schema.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let store = Self { options, path };

        let mut conn = store.connect().await?;
        let migrated = MIGRATOR.run(&mut conn).await;
        store.release(conn).await;
        migrated?;

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        debug!(path = %self.path.display(), "opening connection");
        Ok(self.options.connect().await?)
    }

    async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!(path = %self.path.display(), error = %e, "failed to close connection cleanly");
        } else {
            debug!(path = %self.path.display(), "connection closed");
        }
    }
}

fn map_insert_error(err: sqlx::Error, reservation: &NewReservation) -> ReservationError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ReservationError::DuplicateKey {
                passport_number: reservation.passport_number.clone(),
                trip_date: reservation.trip_date,
            }
        }
        _ => ReservationError::Storage(err),
    }
}

#[async_trait]
impl ReservationStore for SqliteReservationStore {
    async fn create(&self, reservation: NewReservation) -> Result<Reservation> {
        reservation.ensure_required()?;

        let sql = format!(
            "INSERT INTO reservations (first_name, last_name, birth_date, passport_number, \
             passport_expiry, trip_date, base_price, final_price, payment_status, \
             invoice_number, amount_paid) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, ?) RETURNING {}",
            COLUMNS
        );

        let mut conn = self.connect().await?;
        let inserted = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(&reservation.first_name)
            .bind(&reservation.last_name)
            .bind(reservation.birth_date)
            .bind(&reservation.passport_number)
            .bind(reservation.passport_expiry)
            .bind(reservation.trip_date)
            .bind(reservation.base_price.to_storage())
            .bind(reservation.final_price.to_storage())
            .bind(PaymentStatus::Pending.as_str())
            .bind(Money::ZERO.to_storage())
            .fetch_one(&mut conn)
            .await;
        self.release(conn).await;

        let row = inserted.map_err(|e| map_insert_error(e, &reservation))?;
        Reservation::try_from(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {} FROM reservations WHERE id = ?", COLUMNS);

        let mut conn = self.connect().await?;
        let fetched = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(id)
            .fetch_optional(&mut conn)
            .await;
        self.release(conn).await;

        fetched?.map(Reservation::try_from).transpose()
    }

    async fn list_by_trip_date(&self, trip_date: NaiveDate) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {} FROM reservations WHERE trip_date = ? ORDER BY last_name ASC, id ASC",
            COLUMNS
        );

        let mut conn = self.connect().await?;
        let fetched = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(trip_date)
            .fetch_all(&mut conn)
            .await;
        self.release(conn).await;

        fetched?.into_iter().map(Reservation::try_from).collect()
    }

    async fn update_payment(&self, id: i64, update: PaymentUpdate) -> Result<Reservation> {
        let sql = format!(
            "UPDATE reservations SET invoice_number = ?, amount_paid = ?, payment_status = ? \
             WHERE id = ? RETURNING {}",
            COLUMNS
        );

        let mut conn = self.connect().await?;
        let updated = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(update.invoice_number.as_deref())
            .bind(update.amount_paid.to_storage())
            .bind(update.status.as_str())
            .bind(id)
            .fetch_optional(&mut conn)
            .await;
        self.release(conn).await;

        match updated? {
            Some(row) => Reservation::try_from(row),
            None => Err(ReservationError::NotFound(id)),
        }
    }
}
