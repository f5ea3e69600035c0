use std::process::Command;

fn bin() -> String {
    env!("CARGO_BIN_EXE_ipv6-parse").to_string()
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin()).args(args).output().unwrap()
}

#[test]
fn cli_round_trip_ok() {
    let out = run(&["1:2:0:0:0:3:4:5"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "OK (1:2::3:4:5)"
    );
}

#[test]
fn cli_parse_failure_exit_code() {
    let out = run(&["111.222.333.444"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed to parse"), "{stderr}");
    assert!(stderr.contains("offset 8"), "{stderr}");
}

#[test]
fn cli_missing_argument_is_usage_error() {
    let out = run(&[]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn cli_quiet_prints_nothing() {
    let out = run(&["-q", "[::1]:80"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_json_output() {
    let out = run(&["--json", "[::ffff:1.2.3.4/32]:5678"]);
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["canonical"], "[::ffff:1.2.3.4/32]:5678");
    assert_eq!(json["port"], 5678);
    assert_eq!(json["mask"], 32);
    assert_eq!(json["ipv4_embed"], true);
}
