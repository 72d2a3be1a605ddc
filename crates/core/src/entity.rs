//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is assigned by the owning store on first insert, which is why the
/// trait exposes `assign_id`. Once assigned, an id never changes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug + From<u64> + Into<u64>;

    /// Entity kind used in not-found errors.
    const KIND: crate::EntityKind;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Sets the identifier. Stores call this once, when inserting an unassigned entity.
    fn assign_id(&mut self, id: Self::Id);
}
