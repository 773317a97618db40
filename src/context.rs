//! Context definitions: identity-unique, statically typed handles with a default.

pub(crate) mod registry;

use crate::perform;
use crate::runner::OverridePair;
use std::fmt;

/// Type-erased identity of a [`Context`].
///
/// Keys come from `create_context`. A key rebuilt with [`ContextKey::from_raw`]
/// is only accepted by a runner if the same value was issued earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKey(u64);

impl ContextKey {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "context#{}", self.0)
    }
}

/// A context definition: the lookup key for an ambient value of type `T`.
///
/// Equality is identity. Two contexts built from equal defaults are distinct;
/// a clone refers to the same context as its source.
pub struct Context<T> {
    key: ContextKey,
    default: T,
}

impl<T> Context<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a fresh context with `default` as its fallback value.
    pub fn new(default: T) -> Self {
        Self {
            key: ContextKey(registry::register::<T>()),
            default,
        }
    }

    pub fn key(&self) -> ContextKey {
        self.key
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Pair this context with an override value for `create_runner`.
    pub fn with(&self, value: T) -> OverridePair {
        OverridePair::new(self, value)
    }

    /// Current value in the ambient scope. Same as [`perform`](crate::perform()).
    pub fn get(&self) -> T {
        perform::perform(self)
    }
}

impl<T: Clone> Clone for Context<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            default: self.default.clone(),
        }
    }
}

impl<T> PartialEq for Context<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Context<T> {}

impl<T: fmt::Debug> fmt::Debug for Context<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("key", &self.key)
            .field("default", &self.default)
            .finish()
    }
}

/// Create a context definition carrying `default_value`.
pub fn create_context<T>(default_value: T) -> Context<T>
where
    T: Clone + Send + Sync + 'static,
{
    Context::new(default_value)
}
