//! Output sinks for streamed events.
//!
//! A sink accepts ordered writes and an explicit flush. The streaming
//! multiplexer writes one NDJSON line at a time and flushes after each.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};

use super::SinkError;

/// Channel capacity for HTTP body sinks. One chunk in flight keeps the
/// producer in step with the client.
pub const BODY_CHANNEL_CAPACITY: usize = 1;

/// Destination for incrementally delivered output.
#[async_trait]
pub trait EventSink: Send {
    /// Whether writes can be pushed to the consumer before the stream ends.
    fn supports_flush(&self) -> bool {
        true
    }

    /// Write bytes. They may be held until the next [`flush`](Self::flush).
    async fn write(&mut self, buf: &[u8]) -> Result<(), SinkError>;

    /// Deliver everything written so far.
    async fn flush(&mut self) -> Result<(), SinkError>;
}

/// Serialize `value` as one NDJSON line, write it and flush.
///
/// # Errors
///
/// Returns `SinkError` if encoding, writing or flushing fails.
pub async fn write_json_line<S, T>(sink: &mut S, value: &T) -> Result<(), SinkError>
where
    S: EventSink + ?Sized,
    T: Serialize + Sync,
{
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    sink.write(&line).await?;
    sink.flush().await
}

/// Sink feeding a bounded channel, one message per flush.
///
/// The receiving half becomes an HTTP response body. Clones share the
/// channel but keep separate pending buffers, so concurrent writers never
/// split each other's lines.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
    pending: BytesMut,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Bytes>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                tx,
                pending: BytesMut::new(),
            },
            rx,
        )
    }
}

impl Clone for ChannelSink {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            pending: BytesMut::new(),
        }
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn write(&mut self, buf: &[u8]) -> Result<(), SinkError> {
        if self.tx.is_closed() {
            return Err(SinkError::Closed);
        }
        self.pending.extend_from_slice(buf);
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let chunk = self.pending.split().freeze();
        self.tx.send(chunk).await.map_err(|_| SinkError::Closed)
    }
}

/// Sink over any async writer, shared between clones.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> WriterSink<W> {
    /// Wrap a writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }
}

impl<W> Clone for WriterSink<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<W> EventSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write(&mut self, buf: &[u8]) -> Result<(), SinkError> {
        self.inner.lock().await.write_all(buf).await?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.inner.lock().await.flush().await?;
        Ok(())
    }
}
