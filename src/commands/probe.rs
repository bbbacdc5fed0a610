//! One-shot probe command.
//!
//! Runs a single probe from the command line through the same pipeline the
//! HTTP handlers use, writing to any async writer (normally stdout).

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::ToolsConfig;
use crate::exec::{collect_command, stream_command, ExecError, WriterSink};
use crate::probe::ProbeKind;
use crate::target::is_valid_target;

/// How results are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One NDJSON line per event as it arrives, stderr relayed as errors.
    Stream,
    /// A single JSON array once the tool has exited successfully.
    Buffered,
}

/// Errors from the probe command.
#[derive(Debug, thiserror::Error)]
pub enum ProbeCommandError {
    /// The target failed validation.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
    /// The tool could not be run or failed.
    #[error(transparent)]
    Exec(#[from] ExecError),
    /// Writing the output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
    /// Encoding the buffered result failed.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Run one probe against `target`, writing results to `out`.
///
/// # Errors
///
/// Returns `ProbeCommandError` if the target is invalid, the tool fails, or
/// output cannot be written.
pub async fn run_probe<W>(
    kind: ProbeKind,
    tools: &ToolsConfig,
    target: &str,
    mode: OutputMode,
    mut out: W,
) -> Result<(), ProbeCommandError>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    if !is_valid_target(target) {
        return Err(ProbeCommandError::InvalidTarget(target.to_string()));
    }

    let command = kind.command(tools, target);
    tracing::info!(probe = %kind, host = %target, ?mode, "Running probe");

    match mode {
        OutputMode::Stream => {
            stream_command(&command, kind.parser(), WriterSink::new(out)).await?;
        }
        OutputMode::Buffered => {
            let events = collect_command(&command, &kind.parser()).await?;
            let mut json = serde_json::to_vec_pretty(&events)?;
            json.push(b'\n');
            out.write_all(&json).await?;
            out.flush().await?;
        }
    }

    Ok(())
}
