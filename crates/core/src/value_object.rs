//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own: two instances with the same
/// attribute values are the same value. `OwnerFields` is one; `Owner` is not.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
