use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_gradebookd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn gradebookd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({ "id": id, "method": method, "params": params });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    serde_json::from_str(line.trim()).expect("parse response json")
}

fn setup() -> (PathBuf, Child, ChildStdin, BufReader<ChildStdout>) {
    let workspace = temp_dir("gradebook-periods");
    let (child, mut stdin, mut reader) = spawn_sidecar();
    let resp = request(
        &mut stdin,
        &mut reader,
        "ws",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(resp["ok"], json!(true));
    (workspace, child, stdin, reader)
}

#[test]
fn set_then_get_returns_the_same_window() {
    let (workspace, mut child, mut stdin, mut reader) = setup();

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "periods.set",
        json!({
            "gradeId": "C101_2025F",
            "startTime": "2025-09-01T08:00",
            "endTime": "2025-09-01T09:00"
        }),
    );
    assert_eq!(resp["ok"], json!(true), "periods.set failed: {resp}");
    assert_eq!(resp["result"]["period"]["gradeId"], json!("C101_2025F"));

    let resp = request(
        &mut stdin,
        &mut reader,
        "2",
        "periods.get",
        json!({ "gradeId": "C101_2025F" }),
    );
    assert_eq!(resp["ok"], json!(true));
    assert_eq!(resp["result"]["startTime"], json!("2025-09-01T08:00"));
    assert_eq!(resp["result"]["endTime"], json!("2025-09-01T09:00"));
    assert!(resp["result"]["updatedAt"].as_str().is_some());

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn reversed_window_is_rejected() {
    let (workspace, mut child, mut stdin, mut reader) = setup();

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "periods.set",
        json!({
            "gradeId": "C101_2025F",
            "startTime": "2025-09-01T09:00",
            "endTime": "2025-09-01T08:00"
        }),
    );
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(resp["error"]["code"].as_str(), Some("range_order"));

    let resp = request(
        &mut stdin,
        &mut reader,
        "2",
        "periods.get",
        json!({ "gradeId": "C101_2025F" }),
    );
    assert_eq!(resp["error"]["code"].as_str(), Some("not_found"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn malformed_keys_and_timestamps_are_rejected() {
    let (workspace, mut child, mut stdin, mut reader) = setup();

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "periods.set",
        json!({
            "gradeId": "C1012025F",
            "startTime": "2025-09-01T08:00",
            "endTime": "2025-09-01T09:00"
        }),
    );
    assert_eq!(resp["error"]["code"].as_str(), Some("key_format"));

    let resp = request(
        &mut stdin,
        &mut reader,
        "2",
        "periods.set",
        json!({
            "gradeId": "C101_2025F",
            "startTime": "next tuesday",
            "endTime": "2025-09-01T09:00"
        }),
    );
    assert_eq!(resp["error"]["code"].as_str(), Some("time_format"));

    let resp = request(
        &mut stdin,
        &mut reader,
        "3",
        "periods.set",
        json!({
            "gradeId": "  ",
            "startTime": "2025-09-01T08:00",
            "endTime": "2025-09-01T09:00"
        }),
    );
    assert_eq!(resp["error"]["code"].as_str(), Some("empty_key"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn second_write_replaces_the_first() {
    let (workspace, mut child, mut stdin, mut reader) = setup();

    for (id, start, end) in [
        ("1", "2025-09-01T08:00", "2025-09-01T09:00"),
        ("2", "2025-10-01T10:00", "2025-10-01T12:00"),
    ] {
        let resp = request(
            &mut stdin,
            &mut reader,
            id,
            "periods.set",
            json!({ "gradeId": "C101_2025F", "startTime": start, "endTime": end }),
        );
        assert_eq!(resp["ok"], json!(true));
    }

    let resp = request(
        &mut stdin,
        &mut reader,
        "3",
        "periods.get",
        json!({ "gradeId": "C101_2025F" }),
    );
    assert_eq!(resp["result"]["startTime"], json!("2025-10-01T10:00"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}
