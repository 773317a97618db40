//! Lookup of ambient values.

use crate::context::Context;
use crate::store;

/// Value of `context` in the current scope, or its default when no runner
/// in scope overrides it. Never fails.
pub fn perform<T>(context: &Context<T>) -> T
where
    T: Clone + Send + Sync + 'static,
{
    perform_with(context, T::clone)
}

/// Borrow the current value of `context` without cloning it.
pub fn perform_with<T, F, R>(context: &Context<T>, f: F) -> R
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce(&T) -> R,
{
    let association = store::current();
    let value = association
        .as_ref()
        .and_then(|a| a.get::<T>(context.key()))
        .unwrap_or_else(|| context.default_value());
    f(value)
}

/// The override for `context`, or `None` if `perform` would fall back to the
/// default.
pub fn lookup<T>(context: &Context<T>) -> Option<T>
where
    T: Clone + Send + Sync + 'static,
{
    store::current().and_then(|a| a.get::<T>(context.key()).cloned())
}

/// Whether any runner scope is in effect.
pub fn is_scoped() -> bool {
    depth() > 0
}

/// Number of nested runner scopes in effect; zero outside any runner.
pub fn depth() -> usize {
    store::current().map_or(0, |a| a.depth())
}
