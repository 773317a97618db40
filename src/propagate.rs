//! Carrying the current association across spawn and deferred-callback
//! boundaries.
//!
//! Task-local state does not follow `tokio::spawn`, nor a closure stored and
//! called later from somewhere else. Capture the association where the work
//! is scheduled and re-enter it where the work runs.

use crate::association::Association;
use crate::store;
use std::future::Future;
use tokio::task::JoinHandle;

/// The association in effect at the point of [`capture`].
///
/// A snapshot taken outside any runner re-enters the root state, so code run
/// through it sees only defaults.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    association: Association,
}

/// Snapshot the current association.
pub fn capture() -> Snapshot {
    Snapshot {
        association: store::current().unwrap_or_default(),
    }
}

impl Snapshot {
    /// Whether the snapshot was taken inside a runner scope.
    pub fn is_scoped(&self) -> bool {
        self.association.depth() > 0
    }

    pub fn run<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        store::run_with(self.association.clone(), f)
    }

    pub fn scope<F>(&self, future: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        store::scope_with(self.association.clone(), future)
    }
}

/// Wrap `f` so that, whenever and wherever it is called, it runs under the
/// association current at bind time.
pub fn bind<F, R>(f: F) -> impl FnOnce() -> R
where
    F: FnOnce() -> R,
{
    let snapshot = capture();
    move || snapshot.run(f)
}

/// `tokio::spawn` that carries the current association into the new task.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(capture().scope(future))
}

/// `tokio::task::spawn_blocking` that carries the current association.
pub fn spawn_blocking<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(bind(f))
}
