use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderflow_core::{CustomerId, DomainError, DomainResult, Entity, EntityKind, Money, Percentage};

/// Cumulative purchases at which a customer becomes SILVER.
pub const SILVER_THRESHOLD: u32 = 500;
/// Cumulative purchases at which a customer becomes GOLD.
pub const GOLD_THRESHOLD: u32 = 1000;

/// Membership tier, derived from cumulative purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    pub fn for_total(total: Money) -> Self {
        if total >= Decimal::from(GOLD_THRESHOLD) {
            Tier::Gold
        } else if total >= Decimal::from(SILVER_THRESHOLD) {
            Tier::Silver
        } else {
            Tier::Bronze
        }
    }

    /// Order-level discount granted to members of this tier.
    pub fn discount_rate(self) -> Percentage {
        match self {
            Tier::Bronze => Percentage::ZERO,
            Tier::Silver => Percentage::clamped(Decimal::from(5)),
            Tier::Gold => Percentage::clamped(Decimal::from(10)),
        }
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
        };
        f.write_str(name)
    }
}

/// Entity: Customer.
///
/// The tier is never stored: it is computed from `total_purchases` on every read,
/// so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    /// Contact identifier; unique across customers.
    email: String,
    total_purchases: Money,
}

impl Customer {
    /// Register a new customer (unassigned id, no purchases, BRONZE).
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if email.trim().is_empty() {
            return Err(DomainError::validation("email cannot be empty"));
        }

        Ok(Self {
            id: CustomerId::UNASSIGNED,
            name,
            email,
            total_purchases: Money::ZERO,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn total_purchases(&self) -> Money {
        self.total_purchases
    }

    pub fn tier(&self) -> Tier {
        Tier::for_total(self.total_purchases)
    }

    pub fn discount_rate(&self) -> Percentage {
        self.tier().discount_rate()
    }

    /// Record a completed purchase. The tier follows automatically.
    ///
    /// Leaves the total unchanged when the amount is negative or the sum overflows.
    pub fn add_purchase(&mut self, amount: Money) -> DomainResult<()> {
        if amount < Money::ZERO {
            return Err(DomainError::validation("purchase amount cannot be negative"));
        }
        self.total_purchases = self
            .total_purchases
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("cumulative purchases overflow"))?;
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    const KIND: EntityKind = EntityKind::Customer;

    fn id(&self) -> CustomerId {
        self.id
    }

    fn assign_id(&mut self, id: CustomerId) {
        self.id = id;
    }
}
