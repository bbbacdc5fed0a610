//! Process execution and output delivery.
//!
//! A [`DiagnosticCommand`] is spawned into a [`ProcessHandle`], which is then
//! driven either by [`collect`] (buffered) or [`stream`] (incremental).

mod collect;
mod error;
mod lines;
mod process;
mod sink;
mod stream;

pub use collect::*;
pub use error::*;
pub use lines::*;
pub use process::*;
pub use sink::*;
pub use stream::*;
