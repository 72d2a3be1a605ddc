use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{
    CustomerId, DomainError, DomainResult, Entity, EntityKind, Money, OrderId, Percentage,
    ProductId, ValueObject,
};

/// Order status lifecycle.
///
/// ```text
/// PENDING ──process──▶ PROCESSING ──ship──▶ SHIPPED
///    │                     │
///    └──────cancel─────────┴──────▶ CANCELLED
/// ```
///
/// SHIPPED and CANCELLED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Cancelled)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// Order line: a snapshot of the product at the time it was added.
///
/// Later price or name changes on the product do not affect existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Price actually charged per unit (may differ from the list price).
    pub unit_price: Money,
}

impl ValueObject for OrderLine {}

impl OrderLine {
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if unit_price < Money::ZERO {
            return Err(DomainError::validation("unit_price cannot be negative"));
        }
        if unit_price.checked_mul(Money::from(quantity)).is_none() {
            return Err(DomainError::validation(format!(
                "line amount overflows ({quantity} x {unit_price})"
            )));
        }

        Ok(Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
        })
    }

    pub fn subtotal(&self) -> Money {
        self.unit_price * Money::from(self.quantity)
    }
}

/// Entity: Order.
///
/// `discount_percentage` is captured from the customer's tier when the order is
/// created and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    lines: Vec<OrderLine>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    discount_percentage: Percentage,
}

impl Order {
    /// A new PENDING order without lines (unassigned id).
    pub fn new(
        customer_id: CustomerId,
        discount_percentage: Percentage,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OrderId::UNASSIGNED,
            customer_id,
            lines: Vec::new(),
            status: OrderStatus::Pending,
            created_at,
            discount_percentage,
        }
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn discount_percentage(&self) -> Percentage {
        self.discount_percentage
    }

    pub fn is_modifiable(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self.status, OrderStatus::Pending | OrderStatus::Processing)
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    pub fn discount_amount(&self) -> Money {
        self.discount_percentage.of(self.subtotal())
    }

    pub fn total(&self) -> Money {
        self.subtotal() - self.discount_amount()
    }

    /// Append a line. Only PENDING orders accept lines, and the subtotal must stay
    /// representable.
    pub fn add_line(&mut self, line: OrderLine) -> DomainResult<()> {
        self.ensure_modifiable()?;
        if self.subtotal().checked_add(line.subtotal()).is_none() {
            return Err(DomainError::validation(format!(
                "order {} subtotal would overflow",
                self.id
            )));
        }
        self.lines.push(line);
        Ok(())
    }

    /// PENDING -> PROCESSING. Requires at least one line.
    pub fn process(&mut self) -> DomainResult<()> {
        if self.lines.is_empty() {
            return Err(DomainError::EmptyOrder);
        }
        if self.status != OrderStatus::Pending {
            return Err(DomainError::invalid_transition(format!(
                "only pending orders can be processed (order {} is {})",
                self.id, self.status
            )));
        }
        self.status = OrderStatus::Processing;
        Ok(())
    }

    /// PROCESSING -> SHIPPED.
    pub fn ship(&mut self) -> DomainResult<()> {
        if self.status != OrderStatus::Processing {
            return Err(DomainError::invalid_transition(format!(
                "only processing orders can be shipped (order {} is {})",
                self.id, self.status
            )));
        }
        self.status = OrderStatus::Shipped;
        Ok(())
    }

    /// PENDING | PROCESSING -> CANCELLED.
    pub fn cancel(&mut self) -> DomainResult<()> {
        if !self.can_cancel() {
            return Err(DomainError::invalid_transition(format!(
                "cannot cancel order {} in {} state",
                self.id, self.status
            )));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    /// Fails unless the order still accepts lines.
    pub fn ensure_modifiable(&self) -> DomainResult<()> {
        if !self.is_modifiable() {
            return Err(DomainError::invalid_transition(format!(
                "can only add items to pending orders (order {} is {})",
                self.id, self.status
            )));
        }
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    const KIND: EntityKind = EntityKind::Order;

    fn id(&self) -> OrderId {
        self.id
    }

    fn assign_id(&mut self, id: OrderId) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_order() -> Order {
        let mut order = Order::new(CustomerId::new(1), Percentage::ZERO, test_time());
        order.assign_id(OrderId::new(1));
        order
    }

    fn test_line(quantity: u32, unit_price: Money) -> OrderLine {
        OrderLine::new(ProductId::new(1), "Test Product", quantity, unit_price).unwrap()
    }

    #[test]
    fn new_order_is_pending_and_empty() {
        let order = test_order();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(order.lines().is_empty());
        assert_eq!(order.total(), Money::ZERO);
    }

    #[test]
    fn subtotal_sums_lines() {
        let mut order = test_order();
        order.add_line(test_line(2, dec!(50))).unwrap();
        order
            .add_line(OrderLine::new(ProductId::new(2), "Product 2", 1, dec!(100)).unwrap())
            .unwrap();
        assert_eq!(order.subtotal(), dec!(200));
    }

    #[test]
    fn total_applies_discount() {
        let mut order = Order::new(
            CustomerId::new(1),
            Percentage::from_whole(10).unwrap(),
            test_time(),
        );
        order.add_line(test_line(2, dec!(100))).unwrap();
        assert_eq!(order.discount_amount(), dec!(20));
        assert_eq!(order.total(), dec!(180));
    }

    #[test]
    fn line_rejects_zero_quantity() {
        let err = OrderLine::new(ProductId::new(1), "x", 0, dec!(1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn process_requires_lines() {
        let mut order = test_order();
        assert_eq!(order.process().unwrap_err(), DomainError::EmptyOrder);
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn full_lifecycle_pending_to_shipped() {
        let mut order = test_order();
        order.add_line(test_line(1, dec!(10))).unwrap();

        order.process().unwrap();
        assert_eq!(order.status(), OrderStatus::Processing);

        order.ship().unwrap();
        assert_eq!(order.status(), OrderStatus::Shipped);
        assert!(order.status().is_terminal());
    }

    #[test]
    fn cannot_add_line_after_processing() {
        let mut order = test_order();
        order.add_line(test_line(1, dec!(10))).unwrap();
        order.process().unwrap();

        let err = order.add_line(test_line(1, dec!(10))).unwrap_err();
        match err {
            DomainError::InvalidTransition(msg)
                if msg.contains("can only add items to pending orders") => {}
            _ => panic!("Expected InvalidTransition for adding to processing order"),
        }
        assert_eq!(order.lines().len(), 1);
    }

    #[test]
    fn cannot_ship_pending_order() {
        let mut order = test_order();
        order.add_line(test_line(1, dec!(10))).unwrap();

        let err = order.ship().unwrap_err();
        match err {
            DomainError::InvalidTransition(msg)
                if msg.contains("only processing orders can be shipped") => {}
            _ => panic!("Expected InvalidTransition for shipping pending order"),
        }
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn cancel_from_pending_and_processing() {
        let mut pending = test_order();
        pending.cancel().unwrap();
        assert_eq!(pending.status(), OrderStatus::Cancelled);

        let mut processing = test_order();
        processing.add_line(test_line(1, dec!(10))).unwrap();
        processing.process().unwrap();
        processing.cancel().unwrap();
        assert_eq!(processing.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn cannot_cancel_terminal_orders() {
        let mut shipped = test_order();
        shipped.add_line(test_line(1, dec!(10))).unwrap();
        shipped.process().unwrap();
        shipped.ship().unwrap();
        assert!(matches!(
            shipped.cancel().unwrap_err(),
            DomainError::InvalidTransition(_)
        ));
        assert_eq!(shipped.status(), OrderStatus::Shipped);

        let mut cancelled = test_order();
        cancelled.cancel().unwrap();
        assert!(matches!(
            cancelled.cancel().unwrap_err(),
            DomainError::InvalidTransition(_)
        ));
        assert_eq!(cancelled.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn cannot_process_twice() {
        let mut order = test_order();
        order.add_line(test_line(1, dec!(10))).unwrap();
        order.process().unwrap();
        assert!(matches!(
            order.process().unwrap_err(),
            DomainError::InvalidTransition(_)
        ));
    }

    fn order_in(status: OrderStatus) -> Order {
        let mut order = test_order();
        order.add_line(test_line(1, dec!(10))).unwrap();
        match status {
            OrderStatus::Pending => {}
            OrderStatus::Processing => order.process().unwrap(),
            OrderStatus::Shipped => {
                order.process().unwrap();
                order.ship().unwrap();
            }
            OrderStatus::Cancelled => order.cancel().unwrap(),
        }
        order
    }

    #[test]
    fn only_pending_orders_accept_lines() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
        ] {
            let mut order = order_in(status);
            let lines = order.lines().to_vec();

            match order.add_line(test_line(2, dec!(5))) {
                Err(DomainError::InvalidTransition(_)) => {}
                other => panic!("Expected InvalidTransition in {status}, got {other:?}"),
            }
            assert_eq!(order.status(), status);
            assert_eq!(order.lines(), lines.as_slice());
        }
    }

    #[test]
    fn only_processing_orders_ship() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
        ] {
            let mut order = order_in(status);
            let lines = order.lines().to_vec();

            match order.ship() {
                Err(DomainError::InvalidTransition(_)) => {}
                other => panic!("Expected InvalidTransition in {status}, got {other:?}"),
            }
            assert_eq!(order.status(), status);
            assert_eq!(order.lines(), lines.as_slice());
        }
    }

    #[test]
    fn line_amount_overflow_is_rejected() {
        let err = OrderLine::new(ProductId::new(1), "x", 2, Money::MAX).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("overflows") => {}
            _ => panic!("Expected Validation for overflowing line"),
        }
        assert!(OrderLine::new(ProductId::new(1), "x", 1, Money::MAX).is_ok());
    }

    #[test]
    fn subtotal_overflow_is_rejected_and_lines_kept() {
        let mut order = test_order();
        order.add_line(test_line(1, Money::MAX)).unwrap();

        let err = order.add_line(test_line(1, dec!(1))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.total(), Money::MAX);
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Processing).unwrap(),
            "\"PROCESSING\""
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: total == subtotal - subtotal * pct / 100 for any lines and rate.
            #[test]
            fn total_identity_holds(
                pct in 0u32..=100u32,
                lines in prop::collection::vec((1u32..50, 0i64..100_000i64), 0..10)
            ) {
                let discount = Percentage::from_whole(pct).unwrap();
                let mut order = Order::new(CustomerId::new(1), discount, test_time());
                for (qty, cents) in lines {
                    order.add_line(test_line(qty, Money::new(cents, 2))).unwrap();
                }

                let subtotal = order.subtotal();
                let expected = subtotal - subtotal * Money::from(pct) / Money::ONE_HUNDRED;
                prop_assert_eq!(order.total(), expected);
                prop_assert_eq!(order.discount_percentage(), discount);
            }
        }
    }
}
