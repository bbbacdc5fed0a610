//! Process execution tests.
//!
//! Scripts run through `sh -c` stand in for the real diagnostic tools.

mod collect_test;
mod process_test;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use netprobe::exec::{DiagnosticCommand, EventSink, SinkError};

/// Build a command that runs `script` under `sh`.
pub fn script(script: &str) -> DiagnosticCommand {
    DiagnosticCommand::new("sh").arg("-c").arg(script)
}

/// One call observed by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOp {
    Write(Vec<u8>),
    Flush,
}

/// Sink that records every call, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    ops: Arc<Mutex<Vec<SinkOp>>>,
}

impl RecordingSink {
    pub fn ops(&self) -> Vec<SinkOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Written payloads decoded as text, in order.
    pub fn lines(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SinkOp::Write(buf) => Some(String::from_utf8(buf).unwrap()),
                SinkOp::Flush => None,
            })
            .collect()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn write(&mut self, buf: &[u8]) -> Result<(), SinkError> {
        self.ops.lock().unwrap().push(SinkOp::Write(buf.to_vec()));
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.ops.lock().unwrap().push(SinkOp::Flush);
        Ok(())
    }
}

/// Sink that cannot push partial output.
#[derive(Debug, Clone, Default)]
pub struct NoFlushSink;

#[async_trait]
impl EventSink for NoFlushSink {
    fn supports_flush(&self) -> bool {
        false
    }

    async fn write(&mut self, _buf: &[u8]) -> Result<(), SinkError> {
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink whose consumer has already gone away.
#[derive(Debug, Clone, Default)]
pub struct FailingSink;

#[async_trait]
impl EventSink for FailingSink {
    async fn write(&mut self, _buf: &[u8]) -> Result<(), SinkError> {
        Err(SinkError::Closed)
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        Err(SinkError::Closed)
    }
}
