use std::io::Write;
use std::process::{Command, Stdio};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "westward-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_strategies_writes_output() {
    let exe = env!("CARGO_BIN_EXE_westward");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["list-strategies", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available strategies"));
    for name in ["steady", "hustle", "cautious", "random"] {
        assert!(content.contains(name), "missing {name}");
    }
}

#[test]
fn cli_auto_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_westward");
    let output_path = temp_path("auto-json");
    let output = Command::new(exe)
        .args([
            "auto",
            "--strategies",
            "steady,hustle",
            "--seeds",
            "5,8..10",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report["runs"].as_array().map(Vec::len), Some(6));
    assert_eq!(report["strategies"][0]["strategy"], "steady");
    assert_eq!(report["strategies"][1]["runs"], 3);
}

#[test]
fn cli_auto_markdown_is_reproducible() {
    let exe = env!("CARGO_BIN_EXE_westward");
    let run = || {
        let output = Command::new(exe)
            .args([
                "--no-color",
                "auto",
                "--strategies",
                "cautious",
                "--seeds",
                "42",
                "--report",
                "markdown",
            ])
            .output()
            .expect("run cli");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    };
    let first = run();
    assert!(first.contains("# Westward Automated Runs"));
    assert!(first.contains("| cautious | 1 |"));
    assert_eq!(first, run());
}

#[test]
fn cli_rejects_unknown_strategy() {
    let exe = env!("CARGO_BIN_EXE_westward");
    let output = Command::new(exe)
        .args(["auto", "--strategies", "reckless"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown strategy"));
}

#[test]
fn cli_reports_bad_config_path() {
    let exe = env!("CARGO_BIN_EXE_westward");
    let output = Command::new(exe)
        .args(["auto", "--config", "/nonexistent/westward-trail.json"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("westward-trail.json"));
}

#[test]
fn cli_play_quits_from_piped_input() {
    let exe = env!("CARGO_BIN_EXE_westward");
    let mut child = Command::new(exe)
        .args(["--no-color", "play", "--leader", "Ada", "--seed", "7"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"7\ny\n")
        .expect("write script");
    let output = child.wait_with_output().expect("wait for cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("What do you want to do today?"));
    assert!(stdout.contains("You abandon the journey. Game over."));
    assert!(stdout.contains("Survivors: Ada"));
}
