use crate::error::{ReservationError, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// An exact monetary value.
///
/// Wraps `rust_decimal::Decimal` so that prices and payments never go through
/// binary floating point. Any sign is accepted; discounts are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// `None` when the sum does not fit in a `Decimal`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Parses free-text input for the named field.
    pub fn parse(field: &'static str, input: &str) -> Result<Self> {
        Decimal::from_str(input.trim())
            .map(Self)
            .map_err(|_| ReservationError::NonNumericInput {
                field,
                value: input.to_string(),
            })
    }

    /// Canonical text used for persistence. Round-trips exactly.
    pub fn to_storage(&self) -> String {
        self.0.to_string()
    }
}

/// Two decimal places, as printed on reports.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}
