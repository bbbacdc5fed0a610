//! Parser for `mtr --raw` output.
//!
//! Raw mode prints one record per line, keyed by a single letter:
//!
//! ```text
//! x 0 33000        round 0 starts with probe id 33000
//! h 0 192.168.1.1  hop 0 answered from 192.168.1.1
//! p 0 1250 33000   hop 0 replied in 1250 usec to probe 33000
//! ```
//!
//! Other record types (`d` for DNS names, `s`, `t`) are ignored.

use super::{Cycle, Hop, LineParser, ParseError, ParsedEvent, RouteProbe};

/// Route-trace parser. Never returns an error; bad lines are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MtrRawParser;

impl MtrRawParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parse_fields(parts: &[&str]) -> Option<ParsedEvent> {
        match parts {
            ["x", cycle, cycle_id, ..] => Some(ParsedEvent::Cycle(Cycle {
                cycle: cycle.parse().ok()?,
                cycle_id: cycle_id.parse().ok()?,
            })),
            ["h", hop, address, ..] => Some(ParsedEvent::Hop(Hop {
                hop: hop.parse().ok()?,
                address: (*address).to_string(),
            })),
            ["p", hop, rtt, cycle_id, ..] => Some(ParsedEvent::Probe(RouteProbe {
                hop: hop.parse().ok()?,
                rtt: rtt.parse().ok()?,
                cycle_id: cycle_id.parse().ok()?,
            })),
            _ => None,
        }
    }
}

impl LineParser for MtrRawParser {
    fn parse(&self, line: &str) -> Result<Option<ParsedEvent>, ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        Ok(Self::parse_fields(&parts))
    }

    fn name(&self) -> &'static str {
        "mtr"
    }
}
