//! Traits which, typically, may be imported without concern: `use argbind::prelude::*`.

/// Behaviour for documenting choices on a [`Mapping`](crate::Mapping).
// Needs to be imported in order to document choices.
pub trait Choices<T> {
    fn choice(self, variant: T, description: impl Into<String>) -> Self;
}
