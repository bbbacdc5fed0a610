//! Command-line subcommands.

mod probe;

pub use probe::*;
