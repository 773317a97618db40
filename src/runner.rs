//! Runners: install a set of overrides for the extent of a callback.
//!
//! A runner is built once from override pairs, which are validated up front,
//! and can then be invoked any number of times. Each invocation layers the
//! runner's pairs over whatever association is current at that moment and
//! runs the callback under the result.

use crate::association::{Association, Binding, Value};
use crate::context::{registry, Context, ContextKey};
use crate::error::{ContextError, InvalidHandleReason};
use crate::store;
use std::any::TypeId;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, trace};

/// A `(context, value)` pair supplied to [`create_runner`].
///
/// Pairs built from a [`Context`] are always well formed. Pairs built from a
/// raw [`ContextKey`] are checked when the runner is constructed.
pub struct OverridePair {
    key: Option<ContextKey>,
    value: Value,
    type_id: TypeId,
    type_name: &'static str,
}

impl OverridePair {
    pub fn new<T>(context: &Context<T>, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self::from_key(Some(context.key()), value)
    }

    /// Pair a late-bound key with a value. `None` stands for a missing context.
    pub fn from_key<T>(key: Option<ContextKey>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self {
            key,
            value: Arc::new(value),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn key(&self) -> Option<ContextKey> {
        self.key
    }

    fn validate(self, index: usize) -> Result<Binding, ContextError> {
        let key = self.key.ok_or(ContextError::MissingHandle { index })?;

        let registration =
            registry::lookup(key.as_raw()).ok_or(ContextError::InvalidHandle {
                index,
                reason: InvalidHandleReason::Unregistered { raw: key.as_raw() },
            })?;

        if registration.type_id != self.type_id {
            return Err(ContextError::InvalidHandle {
                index,
                reason: InvalidHandleReason::TypeMismatch {
                    key,
                    expected: registration.type_name,
                    found: self.type_name,
                },
            });
        }

        Ok(Binding {
            key,
            value: self.value,
        })
    }
}

impl fmt::Debug for OverridePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverridePair")
            .field("key", &self.key)
            .field("type", &self.type_name)
            .finish()
    }
}

/// Validated overrides that can be installed around callbacks and futures.
///
/// Cloning is cheap; clones share the same pairs. Invocations are independent
/// of each other, including concurrent ones.
#[derive(Clone)]
pub struct Runner {
    bindings: Arc<[Binding]>,
}

impl Runner {
    /// Same as [`create_runner`].
    pub fn new<I>(pairs: I) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = OverridePair>,
    {
        create_runner(pairs)
    }

    /// A runner with no overrides; its callbacks inherit the enclosing scope.
    pub fn empty() -> Self {
        Self {
            bindings: Arc::from(Vec::new()),
        }
    }

    /// Derive a runner whose pairs are this runner's followed by `pairs`.
    pub fn extend<I>(&self, pairs: I) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = OverridePair>,
    {
        let offset = self.bindings.len();
        let mut bindings = self.bindings.to_vec();
        for (index, pair) in pairs.into_iter().enumerate() {
            bindings.push(validated(offset + index, pair)?);
        }
        Ok(Self {
            bindings: Arc::from(bindings),
        })
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Run `f` synchronously with this runner's overrides in effect and
    /// return its result unchanged.
    ///
    /// Only the synchronous call is scoped. A future returned by `f` leaves
    /// the scope with it and sees the association of wherever it is polled;
    /// use [`Runner::run_async`] to keep the overrides attached to it.
    pub fn run<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        store::run_with(self.enter(), f)
    }

    /// Attach this runner's overrides to `future`.
    ///
    /// The parent association is read now, not when the future is first
    /// polled, so the future keeps the association of its creation site. In
    /// `inner.scope(shared.scope(fut))`, `fut` does not see `inner`'s
    /// overrides. To nest, call `scope` inside the polled body of the outer
    /// future, or use [`Runner::run_async`]. The returned future is not
    /// awaited here.
    pub fn scope<F>(&self, future: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        store::scope_with(self.enter(), future)
    }

    /// Call `f` inside the scope, then attach the same scope to the future it
    /// returns.
    pub fn run_async<F, Fut>(&self, f: F) -> impl Future<Output = Fut::Output>
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        let association = self.enter();
        let future = store::run_with(association.clone(), f);
        store::scope_with(association, future)
    }

    fn enter(&self) -> Association {
        let parent = store::current();
        let association = Association::merge(parent.as_ref(), &self.bindings);
        trace!(
            depth = association.depth(),
            entries = association.len(),
            overrides = self.bindings.len(),
            "Entering runner scope"
        );
        association
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bindings.iter().map(|b| b.key))
            .finish()
    }
}

fn validated(index: usize, pair: OverridePair) -> Result<Binding, ContextError> {
    pair.validate(index).map_err(|err| {
        debug!(index, error = %err, "Rejected override pair");
        err
    })
}

/// Build a runner from override pairs.
///
/// Fails on the first pair whose context is missing or was not produced by
/// `create_context` for the pair's value type. No runner is returned in that
/// case, so a malformed runner can never be invoked.
pub fn create_runner<I>(pairs: I) -> Result<Runner, ContextError>
where
    I: IntoIterator<Item = OverridePair>,
{
    let bindings = pairs
        .into_iter()
        .enumerate()
        .map(|(index, pair)| validated(index, pair))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(pairs = bindings.len(), "Runner created");

    Ok(Runner {
        bindings: Arc::from(bindings),
    })
}
