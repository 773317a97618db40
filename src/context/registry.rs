//! Process-wide record of every handle issued by `create_context`.
//!
//! Keys are dense and start at 1, so the key doubles as an index into the
//! registration table. Entries are appended once and never removed.

use parking_lot::RwLock;
use std::any::TypeId;

/// Value type a key was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Registration {
    pub type_id: TypeId,
    pub type_name: &'static str,
}

static REGISTRY: RwLock<Vec<Registration>> = parking_lot::const_rwlock(Vec::new());

/// Allocate the next key for values of type `T`.
pub(crate) fn register<T: 'static>() -> u64 {
    let mut entries = REGISTRY.write();
    entries.push(Registration {
        type_id: TypeId::of::<T>(),
        type_name: std::any::type_name::<T>(),
    });
    entries.len() as u64
}

/// Registration for a raw key, if it was ever issued.
pub(crate) fn lookup(raw: u64) -> Option<Registration> {
    let index = usize::try_from(raw.checked_sub(1)?).ok()?;
    REGISTRY.read().get(index).copied()
}
