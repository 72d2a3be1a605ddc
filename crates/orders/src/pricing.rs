//! Pricing policies: `(product, quantity) -> charged amount`.
//!
//! The set of policies is closed; callers pick a variant and the charge is computed by
//! matching on it. Policies hold only their construction parameters and can be shared
//! and reused freely.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderflow_catalog::Product;
use orderflow_core::{DomainError, DomainResult, Money, Percentage};

/// Default bulk threshold (units).
pub const DEFAULT_BULK_MIN_QUANTITY: u32 = 10;
/// Default bulk discount (%).
pub const DEFAULT_BULK_DISCOUNT: u32 = 10;
/// Default seasonal discount (%).
pub const DEFAULT_SEASONAL_DISCOUNT: u32 = 15;
/// Default membership discount (%).
pub const DEFAULT_MEMBERSHIP_DISCOUNT: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingPolicy {
    /// List price times quantity.
    #[default]
    Regular,
    /// Discount applied to the whole amount once `quantity >= min_quantity`.
    BulkDiscount {
        min_quantity: u32,
        discount: Percentage,
    },
    /// Flat discount on the unit price, whatever the quantity.
    Seasonal { discount: Percentage },
    /// Member discount on the unit price, whatever the quantity.
    Membership { discount: Percentage },
}

impl PricingPolicy {
    pub fn regular() -> Self {
        Self::Regular
    }

    pub fn bulk(min_quantity: u32, discount: Decimal) -> DomainResult<Self> {
        if min_quantity == 0 {
            return Err(DomainError::validation("bulk min_quantity must be positive"));
        }
        Ok(Self::BulkDiscount {
            min_quantity,
            discount: Percentage::new(discount)?,
        })
    }

    pub fn seasonal(discount: Decimal) -> DomainResult<Self> {
        Ok(Self::Seasonal {
            discount: Percentage::new(discount)?,
        })
    }

    pub fn membership(discount: Decimal) -> DomainResult<Self> {
        Ok(Self::Membership {
            discount: Percentage::new(discount)?,
        })
    }

    /// 10% off from 10 units.
    pub fn default_bulk() -> Self {
        Self::BulkDiscount {
            min_quantity: DEFAULT_BULK_MIN_QUANTITY,
            discount: Percentage::clamped(Decimal::from(DEFAULT_BULK_DISCOUNT)),
        }
    }

    /// 15% off.
    pub fn default_seasonal() -> Self {
        Self::Seasonal {
            discount: Percentage::clamped(Decimal::from(DEFAULT_SEASONAL_DISCOUNT)),
        }
    }

    /// 5% off.
    pub fn default_membership() -> Self {
        Self::Membership {
            discount: Percentage::clamped(Decimal::from(DEFAULT_MEMBERSHIP_DISCOUNT)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PricingPolicy::Regular => "regular",
            PricingPolicy::BulkDiscount { .. } => "bulk_discount",
            PricingPolicy::Seasonal { .. } => "seasonal",
            PricingPolicy::Membership { .. } => "membership",
        }
    }

    /// Amount charged for `quantity` units of `product`.
    ///
    /// Fails with `Validation` when the amount does not fit in [`Money`].
    pub fn charge(&self, product: &Product, quantity: u32) -> DomainResult<Money> {
        self.unit_price_at(product, quantity)
            .checked_mul(Money::from(quantity))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "charge for {quantity} units of {} overflows",
                    product.name()
                ))
            })
    }

    /// Charge for a single unit; this is what order lines record as unit price.
    pub fn unit_charge(&self, product: &Product) -> Money {
        self.unit_price_at(product, 1)
    }

    /// Per-unit price when buying `quantity` units.
    fn unit_price_at(&self, product: &Product, quantity: u32) -> Money {
        match self {
            PricingPolicy::BulkDiscount {
                min_quantity,
                discount,
            } if quantity >= *min_quantity => product.apply_discount(*discount),
            PricingPolicy::Regular | PricingPolicy::BulkDiscount { .. } => product.price(),
            PricingPolicy::Seasonal { discount } | PricingPolicy::Membership { discount } => {
                product.apply_discount(*discount)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_catalog::NewProduct;
    use rust_decimal_macros::dec;

    fn test_product(price: Money) -> Product {
        Product::new(NewProduct {
            name: "Widget".to_string(),
            price,
            category: "TEST".to_string(),
            stock: 100,
            description: None,
        })
        .unwrap()
    }

    #[test]
    fn regular_is_price_times_quantity() {
        let product = test_product(dec!(100));
        assert_eq!(PricingPolicy::regular().charge(&product, 3).unwrap(), dec!(300));
    }

    #[test]
    fn bulk_applies_only_at_threshold() {
        let product = test_product(dec!(10));
        let policy = PricingPolicy::bulk(10, dec!(10)).unwrap();

        assert_eq!(policy.charge(&product, 9).unwrap(), dec!(90));
        assert_eq!(policy.charge(&product, 10).unwrap(), dec!(90));
        assert_eq!(policy.charge(&product, 20).unwrap(), dec!(180));
    }

    #[test]
    fn bulk_unit_charge_is_list_price_below_threshold() {
        let product = test_product(dec!(10));
        assert_eq!(PricingPolicy::default_bulk().unit_charge(&product), dec!(10));
    }

    #[test]
    fn seasonal_discounts_unit_price_regardless_of_quantity() {
        let product = test_product(dec!(100));
        let policy = PricingPolicy::default_seasonal();
        assert_eq!(policy.charge(&product, 1).unwrap(), dec!(85));
        assert_eq!(policy.charge(&product, 2).unwrap(), dec!(170));
    }

    #[test]
    fn membership_discounts_unit_price() {
        let product = test_product(dec!(100));
        let policy = PricingPolicy::membership(dec!(5)).unwrap();
        assert_eq!(policy.unit_charge(&product), dec!(95));
    }

    #[test]
    fn rejects_percentage_outside_range() {
        for result in [
            PricingPolicy::bulk(5, dec!(101)),
            PricingPolicy::seasonal(dec!(-1)),
            PricingPolicy::membership(dec!(150)),
        ] {
            match result {
                Err(DomainError::InvalidDiscount(_)) => {}
                other => panic!("Expected InvalidDiscount, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_zero_bulk_threshold() {
        assert!(matches!(
            PricingPolicy::bulk(0, dec!(10)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn overflowing_charge_is_an_error() {
        let product = test_product(Money::MAX);
        let err = PricingPolicy::regular().charge(&product, 2).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(PricingPolicy::regular().unit_charge(&product), Money::MAX);
    }

    #[test]
    fn bulk_threshold_of_one_discounts_single_units() {
        let product = test_product(dec!(10));
        let policy = PricingPolicy::bulk(1, dec!(20)).unwrap();
        assert_eq!(policy.unit_charge(&product), dec!(8));
    }

    #[test]
    fn default_policy_is_regular() {
        assert_eq!(PricingPolicy::default(), PricingPolicy::Regular);
        assert_eq!(PricingPolicy::default().name(), "regular");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(PricingPolicy::default_seasonal()).unwrap();
        assert_eq!(json["kind"], "seasonal");
    }
}
