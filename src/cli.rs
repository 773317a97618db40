//! CLI domain: parse, route, scenarios and output.

mod output;
mod parse;
mod route;
pub mod scenarios;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use route::RunContext;
