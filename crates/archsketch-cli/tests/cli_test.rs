//! End-to-end tests for the archsketch binary

use std::{fs, process::Command};

const SUCCESS_LINE: &str = "Deployment architecture diagram created successfully!\n";

fn archsketch() -> Command {
    Command::new(env!("CARGO_BIN_EXE_archsketch"))
}

#[test]
fn test_renders_png_and_prints_single_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vercel_architecture_diagram.png");

    let output = archsketch()
        .arg("--output")
        .arg(&path)
        .output()
        .expect("Failed to run archsketch");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), SUCCESS_LINE);

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn test_missing_directory_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("diagram.png");

    let output = archsketch()
        .arg("-o")
        .arg(&path)
        .output()
        .expect("Failed to run archsketch");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "No success line on failure");
    assert!(String::from_utf8_lossy(&output.stderr).contains("archsketch::io"));
    assert!(!path.exists());
}

#[test]
fn test_logs_stay_off_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.svg");

    let output = archsketch()
        .args(["--log-level", "debug", "-o"])
        .arg(&path)
        .output()
        .expect("Failed to run archsketch");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), SUCCESS_LINE);
    assert!(!output.stderr.is_empty(), "Debug logs should go to stderr");
    assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
}

#[test]
fn test_explicit_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[export]\ndpi = 72\n").unwrap();
    let path = dir.path().join("diagram.png");

    let output = archsketch()
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&path)
        .output()
        .expect("Failed to run archsketch");
    assert!(output.status.success());

    let decoder = png::Decoder::new(fs::File::open(&path).unwrap());
    let reader = decoder.read_info().unwrap();
    // 72 DPI maps one point to one pixel
    assert!(reader.info().width < 1100);
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.png");

    let output = archsketch()
        .args(["-c", "does-not-exist.toml", "-o"])
        .arg(&path)
        .output()
        .expect("Failed to run archsketch");

    assert_eq!(output.status.code(), Some(1));
    assert!(!path.exists());
}
