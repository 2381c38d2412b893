//! Shared immutable handles.

#![expect(
    clippy::disallowed_types,
    reason = "Arc backs every frozen table handed between interpreters"
)]

use std::fmt;
use std::sync::Arc;

/// A table frozen after construction: package registries, parameter
/// resolvers. Cloning shares it.
pub struct SharedRegistry<T>(Arc<T>);

impl<T> SharedRegistry<T> {
    pub fn new(table: T) -> Self {
        Self(Arc::new(table))
    }

    /// Whether both handles point at the same table.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> From<T> for SharedRegistry<T> {
    fn from(table: T) -> Self {
        Self::new(table)
    }
}

impl<T> Clone for SharedRegistry<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> std::ops::Deref for SharedRegistry<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRegistry").field(&*self.0).finish()
    }
}
