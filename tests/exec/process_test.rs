//! Process handle tests.

use std::time::Duration;

use netprobe::exec::{DiagnosticCommand, ExecError, ProcessHandle, SpawnError};

use super::script;

#[tokio::test]
async fn pipes_can_be_taken_once() {
    let mut handle = ProcessHandle::spawn(&script("true")).unwrap();

    assert!(handle.take_stdout().is_some());
    assert!(handle.take_stdout().is_none());
    assert!(handle.take_stderr().is_some());
    assert!(handle.take_stderr().is_none());

    handle.wait().await.unwrap();
}

#[tokio::test]
async fn missing_binary_reports_not_found() {
    let err = ProcessHandle::spawn(&DiagnosticCommand::new("netprobe-no-such-binary")).unwrap_err();
    match err {
        SpawnError::NotFound { binary } => assert_eq!(binary, "netprobe-no-such-binary"),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn exit_code_is_reported() {
    let handle = ProcessHandle::spawn(&script("exit 7")).unwrap();
    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, ExecError::ProcessExit { code: 7 }));
    assert!(err.is_exit_failure());
}

#[cfg(unix)]
#[tokio::test]
async fn terminate_stops_long_running_process() {
    let mut handle = ProcessHandle::spawn(&script("sleep 30")).unwrap();

    tokio::time::timeout(
        Duration::from_secs(10),
        handle.terminate(Duration::from_secs(2)),
    )
    .await
    .expect("terminate should finish")
    .unwrap();

    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, ExecError::Signaled));
}
