//! Structured events produced from diagnostic tool output.
//!
//! Every event serializes with a `type` discriminator so NDJSON consumers can
//! dispatch on a single key. Error lines from stderr use [`ErrorEvent`],
//! which has no `type` key at all.

use serde::{Deserialize, Serialize};

/// A router discovered at a given hop position (`h` line of `mtr --raw`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    /// Hop position as reported by mtr.
    pub hop: u32,
    /// Address of the responding host.
    #[serde(rename = "ip")]
    pub address: String,
}

/// Start of a measurement round (`x` line of `mtr --raw`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// Round index.
    pub cycle: u32,
    /// Probe sequence identifier for the round.
    pub cycle_id: u64,
}

/// A timed reply for one hop (`p` line of `mtr --raw`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteProbe {
    /// Hop position the reply belongs to.
    pub hop: u32,
    /// Round-trip time in microseconds.
    pub rtt: u64,
    /// Probe sequence identifier.
    pub cycle_id: u64,
}

/// One echo reply from `ping`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingReply {
    /// ICMP sequence number.
    pub seq: u64,
    /// Round-trip time in milliseconds.
    pub rtt_ms: f64,
    /// The unmodified output line.
    #[serde(rename = "rawLine")]
    pub raw_line: String,
}

/// Events emitted by the line parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParsedEvent {
    /// Route-trace hop address.
    Hop(Hop),
    /// Route-trace round marker.
    Cycle(Cycle),
    /// Route-trace per-hop timing.
    Probe(RouteProbe),
    /// Latency-probe reply.
    Ping(PingReply),
}

impl ParsedEvent {
    /// Returns the discriminator written to the `type` key.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hop(_) => "hop",
            Self::Cycle(_) => "cycle",
            Self::Probe(_) => "probe",
            Self::Ping(_) => "ping",
        }
    }

    /// Returns the hop position for route-trace events.
    #[must_use]
    pub fn hop(&self) -> Option<u32> {
        match self {
            Self::Hop(hop) => Some(hop.hop),
            Self::Probe(probe) => Some(probe.hop),
            _ => None,
        }
    }
}

/// Standard error content relayed to a streaming client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// The error text.
    pub error: String,
}

impl ErrorEvent {
    /// Create a new error event.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
