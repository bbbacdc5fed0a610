//! Tests for the ping parser.

use netprobe::parser::{LineParser, ParseError, ParsedEvent, PingParser};

#[test]
fn reply_line_produces_ping_event() {
    let line = "64 bytes from 1.1.1.1: icmp_seq=5 ttl=56 time=11.3 ms";
    match PingParser::new().parse(line) {
        Ok(Some(ParsedEvent::Ping(reply))) => {
            assert_eq!(reply.seq, 5);
            assert!((reply.rtt_ms - 11.3).abs() < f64::EPSILON);
            assert_eq!(reply.raw_line, line);
        }
        other => panic!("Expected Ping event, got {other:?}"),
    }
}

#[test]
fn line_without_time_produces_nothing() {
    let line = "64 bytes from 1.1.1.1: icmp_seq=5 ttl=56";
    assert_eq!(PingParser::new().parse(line), Ok(None));
}

#[test]
fn unparseable_time_is_an_error() {
    let line = "64 bytes from 1.1.1.1: icmp_seq=5 ttl=56 time=1.2.3 ms";
    let err = PingParser::new().parse(line).unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidNumber {
            field: "time",
            value: "1.2.3".to_string(),
        }
    );
    assert_eq!(err.to_string(), r#"Invalid time value: "1.2.3""#);
}

#[test]
fn serializes_with_raw_line_key() {
    let line = "64 bytes from 1.1.1.1: icmp_seq=1 ttl=56 time=2 ms";
    let event = PingParser::new().parse(line).unwrap().unwrap();
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(value["type"], "ping");
    assert_eq!(value["seq"], 1);
    assert_eq!(value["rtt_ms"], 2.0);
    assert_eq!(value["rawLine"], line);
}

#[test]
fn full_ping_transcript() {
    let output = "\
PING 1.1.1.1 (1.1.1.1) 56(84) bytes of data.
64 bytes from 1.1.1.1: icmp_seq=1 ttl=56 time=11.3 ms
64 bytes from 1.1.1.1: icmp_seq=2 ttl=56 time=10.8 ms
Request timeout for icmp_seq 3
64 bytes from 1.1.1.1: icmp_seq=4 ttl=56 time=12.0 ms

--- 1.1.1.1 ping statistics ---
4 packets transmitted, 3 received, 25% packet loss, time 3004ms
";
    let parser = PingParser::new();
    let seqs: Vec<u64> = output
        .lines()
        .filter_map(|line| match parser.parse(line) {
            Ok(Some(ParsedEvent::Ping(reply))) => Some(reply.seq),
            _ => None,
        })
        .collect();
    assert_eq!(seqs, [1, 2, 4]);
}
