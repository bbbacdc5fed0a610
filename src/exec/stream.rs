//! Streaming multiplexer: relay parsed stdout and raw stderr to a sink as
//! they are produced.
//!
//! stdout and stderr are each read by their own task. Lines from one pipe
//! stay in order; the two pipes interleave arbitrarily on the sink.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use super::{write_json_line, DiagnosticCommand, EventSink, ExecError, LineReader, ProcessHandle};
use crate::parser::{ErrorEvent, LineParser};

/// Maximum bytes relayed per stderr error event.
pub const STDERR_CHUNK_SIZE: usize = 1024;

/// Grace period between SIGTERM and SIGKILL when the sink goes away.
pub const TERMINATE_TIMEOUT: Duration = Duration::from_secs(2);

/// Spawn `command` and stream its output into `sink`.
///
/// Flush support is checked before anything is spawned.
///
/// # Errors
///
/// Returns `ExecError::StreamingUnsupported` if the sink cannot flush,
/// `ExecError::Spawn` if the process cannot be started, otherwise the errors
/// of [`stream`].
pub async fn stream_command<P, S>(
    command: &DiagnosticCommand,
    parser: P,
    sink: S,
) -> Result<(), ExecError>
where
    P: LineParser + 'static,
    S: EventSink + Clone + 'static,
{
    if !sink.supports_flush() {
        return Err(ExecError::StreamingUnsupported);
    }
    let handle = ProcessHandle::spawn(command)?;
    stream(handle, parser, sink).await
}

/// Relay a running process into `sink` until both pipes close, then wait
/// for it to exit.
///
/// If a write to the sink fails both readers stop, the process is
/// terminated, and it is still waited on.
///
/// # Errors
///
/// Returns `ExecError::Sink` if the sink failed, `ExecError::Io` if a pipe
/// could not be read, or the exit error from [`ProcessHandle::wait`].
pub async fn stream<P, S>(mut handle: ProcessHandle, parser: P, sink: S) -> Result<(), ExecError>
where
    P: LineParser + 'static,
    S: EventSink + Clone + 'static,
{
    if !sink.supports_flush() {
        return Err(ExecError::StreamingUnsupported);
    }
    let stdout = handle
        .take_stdout()
        .ok_or(ExecError::PipeUnavailable("stdout"))?;
    let stderr = handle
        .take_stderr()
        .ok_or(ExecError::PipeUnavailable("stderr"))?;

    let cancel = CancellationToken::new();
    // Stops both readers if this future is dropped, e.g. by a request timeout.
    let guard = cancel.clone().drop_guard();

    let stdout_task = tokio::spawn(pump_stdout(stdout, parser, sink.clone(), cancel.clone()));
    let stderr_task = tokio::spawn(pump_stderr(stderr, sink, cancel.clone()));

    let (stdout_result, stderr_result) = tokio::join!(stdout_task, stderr_task);
    let stdout_result = stdout_result.map_err(|e| ExecError::Io(e.into())).and_then(|r| r);
    let stderr_result = stderr_result.map_err(|e| ExecError::Io(e.into())).and_then(|r| r);

    if cancel.is_cancelled() {
        tracing::info!(
            binary = %handle.binary(),
            pid = ?handle.id(),
            "Sink closed, terminating diagnostic process"
        );
        if let Err(e) = handle.terminate(TERMINATE_TIMEOUT).await {
            tracing::warn!(error = %e, "Failed to terminate diagnostic process");
        }
    }
    guard.disarm();

    let exit = handle.wait().await;
    stdout_result.and(stderr_result).and(exit)
}

/// Parse lines from `reader` and write each event to `sink`, flushing after
/// every event.
///
/// The next line is not read until the previous event has been flushed.
///
/// # Errors
///
/// Returns `ExecError::Sink` (after cancelling `cancel`) if the sink fails,
/// or `ExecError::Io` if reading fails.
pub async fn pump_stdout<R, P, S>(
    reader: R,
    parser: P,
    mut sink: S,
    cancel: CancellationToken,
) -> Result<(), ExecError>
where
    R: AsyncRead + Unpin,
    P: LineParser,
    S: EventSink,
{
    let mut lines = LineReader::new(reader);

    loop {
        let line = tokio::select! {
            () = cancel.cancelled() => return Ok(()),
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            return Ok(());
        };

        let event = match parser.parse(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(parser = parser.name(), error = %e, line = %line, "Skipping line");
                continue;
            }
        };

        tracing::trace!(kind = event.kind(), hop = ?event.hop(), "Relaying event");
        if let Err(e) = write_json_line(&mut sink, &event).await {
            cancel.cancel();
            return Err(e.into());
        }
    }
}

/// Relay raw chunks from `reader` to `sink` as error events, flushing after
/// every chunk.
///
/// # Errors
///
/// Returns `ExecError::Sink` (after cancelling `cancel`) if the sink fails,
/// or `ExecError::Io` if reading fails.
pub async fn pump_stderr<R, S>(
    mut reader: R,
    mut sink: S,
    cancel: CancellationToken,
) -> Result<(), ExecError>
where
    R: AsyncRead + Unpin,
    S: EventSink,
{
    let mut buf = vec![0u8; STDERR_CHUNK_SIZE];

    loop {
        let n = tokio::select! {
            () = cancel.cancelled() => return Ok(()),
            n = reader.read(&mut buf) => n?,
        };
        if n == 0 {
            return Ok(());
        }

        let event = ErrorEvent::new(String::from_utf8_lossy(&buf[..n]));
        if let Err(e) = write_json_line(&mut sink, &event).await {
            cancel.cancel();
            return Err(e.into());
        }
    }
}
