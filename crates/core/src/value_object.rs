//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Group keys and copy overrides are value objects: two keys holding the same
/// entries in the same order select the same receipt.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
