//! Entity trait: identity that survives field writes and copies.

/// Entity marker + minimal interface.
///
/// A copied record is a *different* entity: it gets a fresh identifier even when
/// every other field matches the source.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
