//! Ambient: context propagation across nested and asynchronous call chains
//!
//! Values are attached to a dynamic extent rather than passed through every
//! signature. A [`Runner`] installs overrides for the extent of a callback or
//! future; [`perform`] reads the nearest override for a [`Context`], or its
//! default when none is in effect.
//!
//! ```
//! use ambient_context::{create_context, create_runner, perform};
//!
//! let age = create_context(30u32);
//! let run = create_runner([age.with(29)]).unwrap();
//!
//! assert_eq!(run.run(|| perform(&age)), 29);
//! assert_eq!(perform(&age), 30);
//! ```

pub mod association;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod perform;
pub mod propagate;
pub mod runner;
pub mod store;

pub use association::Association;
pub use context::{create_context, Context, ContextKey};
pub use error::{AmbientError, ContextError, InvalidHandleReason};
pub use perform::{depth, is_scoped, lookup, perform, perform_with};
pub use propagate::{bind, capture, spawn, spawn_blocking, Snapshot};
pub use runner::{create_runner, OverridePair, Runner};
