//! End-to-end tests that run the `ducklink` binary.

use std::path::Path;
use std::process::{Command, Output};

fn ducklink(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ducklink"))
        .arg("--config")
        .arg(config)
        .arg("--log-level")
        .arg("error")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("ducklink should run")
}

#[test]
fn test_encode_then_decode_through_the_binary() {
    // Arrange
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.toml");

    // Act
    let encoded = ducklink(
        &config,
        &["encode", "UpSpeedReport", "--set", "vtheta=15", "--set", "vx=-200", "--set", "vy=50"],
    );
    let hex = String::from_utf8_lossy(&encoded.stdout).trim().to_string();
    let decoded = ducklink(&config, &["decode", &hex]);

    // Assert
    assert!(encoded.status.success());
    assert_eq!(hex.len(), 14);
    assert!(decoded.status.success());
    let text = String::from_utf8_lossy(&decoded.stdout);
    assert!(text.contains("vtheta  10"), "{text}");
    assert!(text.contains("vx      -128"), "{text}");
}

#[test]
fn test_corrupted_input_fails_with_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.toml");

    let out = ducklink(&config, &["decode", "03 0a 80 0a 00 00 00"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("checksum mismatch"), "{stderr}");
}

#[test]
fn test_config_file_sets_output_format() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[output]\nformat = \"json\"\n").expect("write config");

    let out = ducklink(&config, &["checksum", "0102"]);

    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");
    assert_eq!(json["checksum"], 0x0304);
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("ducklink").join("config.toml");

    let init = ducklink(&config, &["config", "init"]);
    let show = ducklink(&config, &["config", "show"]);

    assert!(init.status.success());
    assert!(config.exists());
    let text = String::from_utf8_lossy(&show.stdout);
    assert!(text.contains("hex_uppercase = false"), "{text}");
}
