//! Buffered collection: run a tool to completion, then return every event.

use tokio::io::AsyncRead;
use tokio::process::ChildStderr;

use super::{DiagnosticCommand, ExecError, LineReader, ProcessHandle};
use crate::parser::{LineParser, ParsedEvent};

/// Spawn `command` and collect its parsed stdout.
///
/// # Errors
///
/// Returns `ExecError::Spawn` if the process cannot be started, otherwise
/// the errors of [`collect`].
pub async fn collect_command<P>(
    command: &DiagnosticCommand,
    parser: &P,
) -> Result<Vec<ParsedEvent>, ExecError>
where
    P: LineParser + ?Sized,
{
    let handle = ProcessHandle::spawn(command)?;
    collect(handle, parser).await
}

/// Read stdout to the end, parse every line, then wait for exit.
///
/// The result is all-or-nothing: if the process exits unsuccessfully the
/// events read so far are discarded. Stderr is drained and ignored.
///
/// # Errors
///
/// Returns `ExecError::ProcessExit` or `ExecError::Signaled` on a failed
/// exit, and `ExecError::Io` if reading stdout or waiting fails.
pub async fn collect<P>(mut handle: ProcessHandle, parser: &P) -> Result<Vec<ParsedEvent>, ExecError>
where
    P: LineParser + ?Sized,
{
    let stdout = handle
        .take_stdout()
        .ok_or(ExecError::PipeUnavailable("stdout"))?;
    let stderr = handle.take_stderr();

    let (events, ()) = tokio::join!(collect_lines(stdout, parser), discard(stderr));

    handle.wait().await?;
    let events = events?;

    tracing::debug!(parser = parser.name(), count = events.len(), "Collected events");
    Ok(events)
}

/// Parse every line of `reader` in order, skipping lines without an event.
///
/// # Errors
///
/// Returns an error if reading fails.
pub async fn collect_lines<R, P>(reader: R, parser: &P) -> std::io::Result<Vec<ParsedEvent>>
where
    R: AsyncRead + Unpin,
    P: LineParser + ?Sized,
{
    let mut lines = LineReader::new(reader);
    let mut events = Vec::new();

    while let Some(line) = lines.next_line().await? {
        match parser.parse(&line) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(parser = parser.name(), error = %e, line = %line, "Skipping line");
            }
        }
    }

    Ok(events)
}

async fn discard(stderr: Option<ChildStderr>) {
    if let Some(mut stderr) = stderr {
        if let Err(e) = tokio::io::copy(&mut stderr, &mut tokio::io::sink()).await {
            tracing::debug!(error = %e, "Failed to drain stderr");
        }
    }
}
