//! Configuration sources, in the order they are layered.

pub mod environment;
pub mod explicit_file;
pub mod global_file;
