//! Ambient store: the per-task slot holding the association in effect.
//!
//! Backed by a Tokio task-local. A synchronous scope swaps the slot for the
//! duration of a closure; an asynchronous scope swaps it in on every poll of
//! the wrapped future and back out when the poll returns, so interleaved
//! futures on one thread never observe each other's association. Both restore
//! the previous value on unwind.

use crate::association::Association;
use std::future::Future;

tokio::task_local! {
    static CURRENT: Association;
}

/// Association in effect for the executing task, if any.
pub fn current() -> Option<Association> {
    CURRENT.try_with(Association::clone).ok()
}

/// Run `f` with `association` in effect, restoring the previous slot afterwards.
pub fn run_with<F, R>(association: Association, f: F) -> R
where
    F: FnOnce() -> R,
{
    CURRENT.sync_scope(association, f)
}

/// Attach `association` to `future` for every poll until it completes.
pub fn scope_with<F>(association: Association, future: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    CURRENT.scope(association, future)
}
