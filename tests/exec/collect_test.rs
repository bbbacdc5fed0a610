//! Buffered collection tests.

use netprobe::exec::{collect_command, ExecError};
use netprobe::parser::{MtrRawParser, ParsedEvent};

use super::script;

#[tokio::test]
async fn collects_events_in_order() {
    let command = script("echo 'x 0 100'; echo 'h 0 10.0.0.1'; echo 'junk'; echo 'p 0 700 100'");
    let events = collect_command(&command, &MtrRawParser::new())
        .await
        .unwrap();

    let kinds: Vec<_> = events.iter().map(ParsedEvent::kind).collect();
    assert_eq!(kinds, ["cycle", "hop", "probe"]);
}

#[tokio::test]
async fn failed_exit_discards_events() {
    let command = script("for i in 1 2 3 4 5; do echo \"x $i $i\"; done; exit 1");
    let err = collect_command(&command, &MtrRawParser::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecError::ProcessExit { code: 1 }));
    assert_eq!(err.to_string(), "exit status 1");
}

#[tokio::test]
async fn stderr_is_ignored() {
    let command = script("echo 'warning: slow' >&2; echo 'h 1 10.0.0.2'");
    let events = collect_command(&command, &MtrRawParser::new())
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].hop(), Some(1));
}

#[tokio::test]
async fn large_stderr_does_not_block() {
    let command = script("head -c 262144 /dev/zero >&2; echo 'x 0 1'");
    let events = tokio::time::timeout(
        std::time::Duration::from_secs(10),
        collect_command(&command, &MtrRawParser::new()),
    )
    .await
    .expect("collection should not deadlock")
    .unwrap();

    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn missing_binary_is_a_spawn_error() {
    let command = netprobe::exec::DiagnosticCommand::new("netprobe-no-such-binary");
    let err = collect_command(&command, &MtrRawParser::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ExecError::Spawn(_)));
}
