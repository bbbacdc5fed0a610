//! netprobe - ping and mtr over HTTP as JSON or NDJSON.

pub mod commands;
pub mod config;
pub mod exec;
pub mod parser;
pub mod probe;
pub mod server;
pub mod target;
