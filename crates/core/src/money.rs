//! Monetary amounts and discount percentages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Monetary amount in the configured currency.
///
/// Exact decimal arithmetic; nothing in the domain rounds.
pub type Money = Decimal;

/// Render an amount with two decimal places (log/display only).
pub fn display(amount: Money) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// A discount percentage, guaranteed to lie in `[0, 100]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl ValueObject for Percentage {}

impl Percentage {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(DomainError::invalid_discount(format!(
                "{value} is outside [0, 100]"
            )));
        }
        Ok(Self(value))
    }

    /// Clamp `value` into `[0, 100]`. For compile-time known rates.
    pub fn clamped(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Whole-number convenience constructor.
    pub fn from_whole(value: u32) -> DomainResult<Self> {
        Self::new(Decimal::from(value))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Portion of `amount` this percentage represents.
    ///
    /// Never larger in magnitude than `amount`, so it cannot overflow.
    pub fn of(self, amount: Money) -> Money {
        amount * (self.0 / Decimal::ONE_HUNDRED)
    }

    /// `amount` reduced by this percentage.
    pub fn apply_to(self, amount: Money) -> Money {
        amount - self.of(amount)
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

impl core::fmt::Display for Percentage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
