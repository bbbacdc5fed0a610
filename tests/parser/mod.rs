//! Line parser tests.

mod mtr_test;
mod ping_test;

use netprobe::parser::{LineParser, MtrRawParser, PingParser};

/// Parsing is pure: the same line always gives the same result.
#[test]
fn test_parsing_is_idempotent() {
    let parsers: [Box<dyn LineParser>; 2] =
        [Box::new(MtrRawParser::new()), Box::new(PingParser::new())];
    let lines = [
        "h 3 10.0.0.1",
        "p 3 1250 7",
        "x 0 1",
        "q unknown",
        "64 bytes from 1.1.1.1: icmp_seq=5 ttl=56 time=11.3 ms",
        "64 bytes from 1.1.1.1: icmp_seq=5 ttl=56 time=oops ms",
        "",
    ];

    for parser in &parsers {
        for line in lines {
            assert_eq!(parser.parse(line), parser.parse(line), "{line}");
        }
    }
}

/// The route-trace parser always skips bad numbers, while the latency
/// parser reports a bad `time=` field. Both behaviors are pinned here.
#[test]
fn test_error_policy_differs_between_parsers() {
    let mtr = MtrRawParser::new();
    let ping = PingParser::new();

    assert_eq!(mtr.parse("p 3 slow 7"), Ok(None));
    assert!(ping
        .parse("64 bytes from 1.1.1.1: icmp_seq=5 ttl=56 time=slow ms")
        .is_err());

    // A bad sequence number is skipped by the latency parser too.
    assert_eq!(
        ping.parse("64 bytes from 1.1.1.1: icmp_seq=x ttl=56 time=1.0 ms"),
        Ok(None)
    );
}

/// Each parser ignores the other tool's output.
#[test]
fn test_parsers_ignore_foreign_output() {
    let mtr = MtrRawParser::new();
    let ping = PingParser::new();

    assert_eq!(
        mtr.parse("64 bytes from 1.1.1.1: icmp_seq=5 ttl=56 time=11.3 ms"),
        Ok(None)
    );
    assert_eq!(ping.parse("h 3 10.0.0.1"), Ok(None));
}
