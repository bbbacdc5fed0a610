//! Tests for the `mtr --raw` parser.

use netprobe::parser::{Cycle, Hop, LineParser, MtrRawParser, ParsedEvent, RouteProbe};

fn parse(line: &str) -> Option<ParsedEvent> {
    MtrRawParser::new().parse(line).unwrap()
}

#[test]
fn hop_line_produces_hop_event() {
    assert_eq!(
        parse("h 3 10.0.0.1"),
        Some(ParsedEvent::Hop(Hop {
            hop: 3,
            address: "10.0.0.1".to_string(),
        }))
    );
}

#[test]
fn probe_line_produces_probe_event() {
    assert_eq!(
        parse("p 3 1250 7"),
        Some(ParsedEvent::Probe(RouteProbe {
            hop: 3,
            rtt: 1250,
            cycle_id: 7,
        }))
    );
}

#[test]
fn cycle_line_produces_cycle_event() {
    assert_eq!(
        parse("x 4 33004"),
        Some(ParsedEvent::Cycle(Cycle {
            cycle: 4,
            cycle_id: 33004,
        }))
    );
}

#[test]
fn unknown_line_produces_nothing() {
    assert_eq!(parse("q unknown"), None);
}

#[test]
fn realistic_session() {
    let output = "\
x 0 33000
h 0 192.168.1.1
d 0 gateway
p 0 812 33000
x 1 33001
h 1 10.10.0.1
p 1 9312 33001
";
    let events: Vec<_> = output.lines().filter_map(parse).collect();
    let kinds: Vec<_> = events.iter().map(ParsedEvent::kind).collect();
    assert_eq!(
        kinds,
        ["cycle", "hop", "probe", "cycle", "hop", "probe"]
    );
}

#[test]
fn events_serialize_with_wire_keys() {
    let json = serde_json::to_string(&parse("p 3 1250 7").unwrap()).unwrap();
    assert_eq!(json, r#"{"type":"probe","hop":3,"rtt":1250,"cycle_id":7}"#);

    let json = serde_json::to_string(&parse("x 1 2").unwrap()).unwrap();
    assert_eq!(json, r#"{"type":"cycle","cycle":1,"cycle_id":2}"#);
}
