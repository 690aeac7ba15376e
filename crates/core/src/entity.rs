//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An owner keeps its identifier across updates; everything else may be
/// overwritten.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
