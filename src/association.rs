//! Associations: the flattened set of overrides in effect for a dynamic extent.

use crate::context::ContextKey;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub(crate) type Value = Arc<dyn Any + Send + Sync>;

/// A validated override, ready to be merged.
#[derive(Clone)]
pub(crate) struct Binding {
    pub key: ContextKey,
    pub value: Value,
}

/// Immutable mapping from context identity to its most specific override.
///
/// Built fresh for every runner invocation and shared by reference among
/// everything executing inside that invocation's extent.
#[derive(Clone, Default)]
pub struct Association {
    entries: Arc<HashMap<ContextKey, Value>>,
    depth: usize,
}

impl Association {
    /// Layer `overrides` over `parent`. Later overrides win over earlier ones
    /// and over parent entries with the same key. A missing parent is treated
    /// as empty.
    pub(crate) fn merge(parent: Option<&Association>, overrides: &[Binding]) -> Self {
        let mut entries = parent
            .map(|p| p.entries.as_ref().clone())
            .unwrap_or_default();
        for binding in overrides {
            entries.insert(binding.key, Arc::clone(&binding.value));
        }

        Self {
            entries: Arc::new(entries),
            depth: parent.map_or(0, |p| p.depth) + 1,
        }
    }

    /// Override for `key`, if present and of type `T`.
    pub(crate) fn get<T: 'static>(&self, key: ContextKey) -> Option<&T> {
        let value = self.entries.get(&key)?;
        (**value).downcast_ref::<T>()
    }

    pub fn contains(&self, key: ContextKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of runner scopes layered to produce this association.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn keys(&self) -> impl Iterator<Item = ContextKey> + '_ {
        self.entries.keys().copied()
    }
}

impl fmt::Debug for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort();
        f.debug_struct("Association")
            .field("depth", &self.depth)
            .field("keys", &keys)
            .finish()
    }
}
