//! Parser for `ping` echo reply lines.
//!
//! Handles both iputils and BusyBox output:
//!
//! ```text
//! 64 bytes from 1.1.1.1: icmp_seq=5 ttl=56 time=11.3 ms
//! 64 bytes from 1.1.1.1: seq=5 ttl=56 time=11.300 ms
//! ```

use super::{LineParser, ParseError, ParsedEvent, PingReply};

const REPLY_MARKER: &str = "bytes from";

/// Latency-probe parser.
///
/// Unlike [`MtrRawParser`](super::MtrRawParser), an unparseable `time=`
/// value is reported as an error instead of being skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingParser;

impl PingParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineParser for PingParser {
    fn parse(&self, line: &str) -> Result<Option<ParsedEvent>, ParseError> {
        if !line.contains(REPLY_MARKER) {
            return Ok(None);
        }

        let mut seq = "";
        let mut time = "";
        for field in line.split_whitespace() {
            if let Some(value) = field.strip_prefix("icmp_seq=") {
                seq = value;
            } else if let Some(value) = field.strip_prefix("seq=") {
                seq = value;
            } else if let Some(value) = field.strip_prefix("time=") {
                time = value.strip_suffix(" ms").unwrap_or(value).trim();
            }
        }

        if seq.is_empty() || time.is_empty() {
            return Ok(None);
        }

        let rtt_ms = time
            .parse::<f64>()
            .ok()
            .filter(|rtt| rtt.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber {
                field: "time",
                value: time.to_string(),
            })?;
        let Ok(seq) = seq.parse::<u64>() else {
            return Ok(None);
        };

        Ok(Some(ParsedEvent::Ping(PingReply {
            seq,
            rtt_ms,
            raw_line: line.to_string(),
        })))
    }

    fn name(&self) -> &'static str {
        "ping"
    }
}
