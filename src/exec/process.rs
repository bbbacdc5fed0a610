//! Diagnostic process spawning and control.
//!
//! [`DiagnosticCommand`] describes an invocation; [`ProcessHandle`] owns the
//! running child together with its stdout and stderr pipes.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, ChildStderr, ChildStdout, Command};

use super::{ExecError, SpawnError};

/// Number of echo requests sent per latency probe.
pub const PING_COUNT: u32 = 10;

/// Number of measurement rounds per route trace.
pub const MTR_REPORT_CYCLES: u32 = 10;

/// A diagnostic tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticCommand {
    binary: String,
    args: Vec<String>,
}

impl DiagnosticCommand {
    /// Create a command for the given binary with no arguments.
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new(),
        }
    }

    /// Latency probe: `ping -c 10 -- <target>`.
    #[must_use]
    pub fn ping(binary: impl Into<String>, target: &str) -> Self {
        Self::new(binary)
            .arg("-c")
            .arg(PING_COUNT.to_string())
            .arg("--")
            .arg(target)
    }

    /// Route trace: `mtr --raw --no-dns --report-cycles 10 -- <target>`.
    #[must_use]
    pub fn mtr(binary: impl Into<String>, target: &str) -> Self {
        Self::new(binary)
            .arg("--raw")
            .arg("--no-dns")
            .arg("--report-cycles")
            .arg(MTR_REPORT_CYCLES.to_string())
            .arg("--")
            .arg(target)
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Get the binary name or path.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Get the command-line arguments.
    #[must_use]
    pub fn build_args(&self) -> &[String] {
        &self.args
    }
}

/// A running diagnostic process.
///
/// Each pipe can be taken once. [`wait`](Self::wait) consumes the handle, so
/// the child is reaped exactly once.
#[derive(Debug)]
pub struct ProcessHandle {
    child: Child,
    binary: String,
}

impl ProcessHandle {
    /// Spawn the command with stdout and stderr piped.
    ///
    /// The child is killed if the handle is dropped before it exits.
    ///
    /// # Errors
    ///
    /// Returns `SpawnError` if the process fails to spawn.
    pub fn spawn(command: &DiagnosticCommand) -> Result<Self, SpawnError> {
        let child = Command::new(command.binary())
            .args(command.build_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpawnError::from_io(command.binary(), e))?;

        tracing::debug!(
            binary = %command.binary(),
            args = ?command.build_args(),
            pid = ?child.id(),
            "Spawned diagnostic process"
        );

        Ok(Self {
            child,
            binary: command.binary().to_string(),
        })
    }

    /// Take ownership of the stdout handle.
    ///
    /// This can only be called once; subsequent calls return `None`.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Take ownership of the stderr handle.
    ///
    /// This can only be called once; subsequent calls return `None`.
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Get the process ID, if still running.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Get the binary this process was spawned from.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Wait for the process to exit.
    ///
    /// # Errors
    ///
    /// Returns `ExecError::ProcessExit` or `ExecError::Signaled` if the
    /// process did not exit successfully, or `ExecError::Io` if waiting fails.
    pub async fn wait(mut self) -> Result<(), ExecError> {
        let status = self.child.wait().await?;
        tracing::debug!(binary = %self.binary, %status, "Diagnostic process exited");

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::from_status(status))
        }
    }

    /// Forcefully kill the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the kill signal cannot be sent.
    pub async fn kill(&mut self) -> std::io::Result<()> {
        self.child.kill().await
    }

    /// Attempt graceful termination with a timeout.
    ///
    /// On Unix, sends SIGTERM first, then SIGKILL after the timeout.
    /// On other platforms, falls back to immediate kill.
    ///
    /// # Errors
    ///
    /// Returns an error if termination fails.
    pub async fn terminate(&mut self, timeout: Duration) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            self.terminate_unix(timeout).await
        }

        #[cfg(not(unix))]
        {
            let _ = timeout;
            self.kill().await
        }
    }

    #[cfg(unix)]
    async fn terminate_unix(&mut self, timeout: Duration) -> std::io::Result<()> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let Some(pid) = self.id() else {
            // Already exited
            return Ok(());
        };

        let nix_pid = Pid::from_raw(i32::try_from(pid).unwrap_or(i32::MAX));
        let _ = kill(nix_pid, Signal::SIGTERM);

        match tokio::time::timeout(timeout, self.child.wait()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(e),
            Err(_) => {
                tracing::debug!(pid, "Process ignored SIGTERM, killing");
                self.child.kill().await
            }
        }
    }
}
