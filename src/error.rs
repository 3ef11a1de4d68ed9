use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid date format for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidFormat { field: &'static str, value: String },
    #[error("Non-numeric input for {field}: '{value}'")]
    NonNumericInput { field: &'static str, value: String },
    #[error("Duplicate reservation for passport {passport_number} on {trip_date}")]
    DuplicateKey {
        passport_number: String,
        trip_date: NaiveDate,
    },
    #[error("Reservation {0} not found")]
    NotFound(i64),
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Corrupt record {id}: {reason}")]
    CorruptRecord { id: i64, reason: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReservationError {
    /// True for failures caused by what the user entered or referenced, as
    /// opposed to storage or output failures.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidFormat { .. }
                | Self::NonNumericInput { .. }
                | Self::DuplicateKey { .. }
                | Self::NotFound(_)
        )
    }

    /// Message shown to the person at the keyboard. The current command ends,
    /// nothing else changes.
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError(reason) => format!("Missing or invalid data: {}", reason),
            Self::InvalidFormat { field, value } => format!(
                "'{}' is not a valid date for {}. Use the YYYY-MM-DD format.",
                value, field
            ),
            Self::NonNumericInput { field, value } => {
                format!("'{}' is not a number. {} must be numeric.", value, field)
            }
            Self::DuplicateKey {
                passport_number,
                trip_date,
            } => format!(
                "A reservation for passport {} on trip date {} already exists.",
                passport_number, trip_date
            ),
            Self::NotFound(id) => format!("No reservation with id {}", id),
            other => format!("Unexpected error: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
