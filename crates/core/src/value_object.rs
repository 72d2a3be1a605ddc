//! Values without identity.

/// Marker for types compared purely by their fields.
///
/// Order lines and percentages are value objects; products, customers and orders are
/// entities. A value object is replaced, never edited in place.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct OrderLine {
///     product_id: ProductId,
///     quantity: u32,
///     unit_price: Money,
/// }
///
/// impl ValueObject for OrderLine {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
