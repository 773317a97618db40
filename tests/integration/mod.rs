//! Integration tests for the ambient context engine

mod async_propagation;
mod scoping;
