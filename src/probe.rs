//! The diagnostic probes offered by the service.

use std::fmt;

use crate::config::ToolsConfig;
use crate::exec::DiagnosticCommand;
use crate::parser::{LineParser, MtrRawParser, PingParser};

/// A kind of probe, pairing an invocation with the parser for its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Round-trip latency to one host (`ping`).
    Latency,
    /// Hop-by-hop route trace (`mtr`).
    Route,
}

impl ProbeKind {
    /// Short name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Latency => "latency",
            Self::Route => "route",
        }
    }

    /// Build the invocation for `target` using the configured binaries.
    ///
    /// `target` must already have passed
    /// [`is_valid_target`](crate::target::is_valid_target).
    #[must_use]
    pub fn command(self, tools: &ToolsConfig, target: &str) -> DiagnosticCommand {
        match self {
            Self::Latency => DiagnosticCommand::ping(&tools.ping_binary, target),
            Self::Route => DiagnosticCommand::mtr(&tools.mtr_binary, target),
        }
    }

    /// Parser for this probe's stdout.
    #[must_use]
    pub fn parser(self) -> Box<dyn LineParser> {
        match self {
            Self::Latency => Box::new(PingParser::new()),
            Self::Route => Box::new(MtrRawParser::new()),
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
