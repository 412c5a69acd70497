//! End-to-end integration tests for CLI commands
//!
//! These tests verify the full pipeline for:
//! - `efrt run` - Execute program files
//! - `efrt random` - Generate and execute random bytes
//! - `efrt completions` - Shell completion scripts
//!
//! Every command runs with HOME and the working directory pointed at a
//! temporary directory so no user configuration leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a temporary directory with a program file
fn create_test_file(filename: &str, content: &[u8]) -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    (temp_dir, file_path.to_str().unwrap().to_string())
}

/// `efrt` isolated from the user's home, project and environment config
fn efrt(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("efrt");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("EFRT_STACK_CAPACITY")
        .env_remove("EFRT_HEAP_CAPACITY")
        .env_remove("EFRT_MAX_CYCLES")
        .env_remove("EFRT_SEED")
        .env_remove("EFRT_AUTO_ZERO")
        .env_remove("EFRT_NO_PROGRESS")
        .env_remove("EFRT_JSON");
    cmd
}

// ============================================================================
// efrt run - Success Cases
// ============================================================================

#[test]
fn test_run_prints_sum() {
    let (dir, path) = create_test_file("add.ef", b"53+N");

    efrt(dir.path())
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout("104\n")
        .stderr(predicate::str::contains("Running file \"add.ef\"."))
        .stderr(predicate::str::contains("Executed 4 bytes (4 cycles) in"))
        .stderr(predicate::str::contains("Finished running file \"add.ef\"."));
}

#[test]
fn test_run_prints_characters() {
    let (dir, path) = create_test_file("hi.ef", b"HCiC\n");

    efrt(dir.path())
        .args(["run", &path])
        .assert()
        .success()
        .stdout("Hi");
}

#[test]
fn test_run_reads_stdin() {
    let (dir, path) = create_test_file("echo.ef", b"DNON");

    efrt(dir.path())
        .args(["run", &path])
        .write_stdin("A12\n")
        .assert()
        .success()
        .stdout("65\n12\n");
}

#[test]
fn test_run_auto_zero_ignores_stdin() {
    let (dir, path) = create_test_file("echo.ef", b"DN");

    efrt(dir.path())
        .args(["run", &path, "--auto-zero"])
        .write_stdin("A")
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_run_multiple_files_in_order() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.ef"), b"AC").unwrap();
    fs::write(temp_dir.path().join("b.ef"), b"BC").unwrap();

    efrt(temp_dir.path())
        .args(["run", "a.ef", "b.ef"])
        .assert()
        .success()
        .stdout("AB");
}

#[test]
fn test_run_quiet_keeps_stderr_clean() {
    let (dir, path) = create_test_file("add.ef", b"53+N");

    efrt(dir.path())
        .args(["run", &path, "--quiet"])
        .assert()
        .success()
        .stdout("104\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_run_json_summary() {
    let (dir, path) = create_test_file("add.ef", b"53+N");

    let output = efrt(dir.path())
        .args(["run", &path, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let line = stderr
        .lines()
        .find(|line| line.starts_with('{'))
        .expect("JSON summary line");
    let json: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(json["bytes"], 4);
    assert_eq!(json["cycles"], 4);
    assert_eq!(json["termination"], "completed");
    assert!(json["elapsed_ms"].is_number());
}

#[test]
fn test_run_cycle_limit() {
    let (dir, path) = create_test_file("loop.ef", b"1J");

    efrt(dir.path())
        .args(["run", &path, "--max-cycles", "1000"])
        .assert()
        .success()
        .stderr(predicate::str::contains("(1000 cycles)"))
        .stderr(predicate::str::contains("cycle limit"));
}

#[test]
fn test_run_empty_file() {
    let (dir, path) = create_test_file("empty.ef", b"");

    efrt(dir.path())
        .args(["run", &path])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Executed 0 bytes (0 cycles)"));
}

// ============================================================================
// efrt run - Error Cases
// ============================================================================

#[test]
fn test_run_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    efrt(temp_dir.path())
        .args(["run", "missing.ef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be found"));
}

#[test]
fn test_run_missing_file_continues_with_next() {
    let (dir, path) = create_test_file("good.ef", b"AC");

    efrt(dir.path())
        .args(["run", "missing.ef", &path])
        .assert()
        .failure()
        .stdout("A")
        .stderr(predicate::str::contains("Finished running file \"good.ef\"."))
        .stderr(predicate::str::contains("1 of 2 files failed"));
}

#[test]
fn test_run_requires_file_argument() {
    let temp_dir = TempDir::new().unwrap();

    efrt(temp_dir.path()).arg("run").assert().failure();
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_project_config_enables_auto_zero() {
    let (dir, path) = create_test_file("echo.ef", b"DN");
    fs::write(dir.path().join("efrt.toml"), "[runtime]\nauto_zero = true\n").unwrap();

    efrt(dir.path())
        .args(["run", &path])
        .write_stdin("A")
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_project_config_found_from_subdirectory() {
    let (dir, path) = create_test_file("loop.ef", b"1J");
    fs::write(dir.path().join("efrt.toml"), "[runtime]\nmax_cycles = 50\n").unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();

    efrt(&nested)
        .env("HOME", dir.path())
        .args(["run", &path])
        .assert()
        .success()
        .stderr(predicate::str::contains("(50 cycles)"));
}

#[test]
fn test_explicit_config_file() {
    let (dir, path) = create_test_file("add.ef", b"53+N");
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[display]\nsummary = false\n").unwrap();

    efrt(dir.path())
        .args(["run", &path, "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout("104\n")
        .stderr(predicate::str::contains("Executed").not());
}

#[test]
fn test_invalid_config_is_rejected() {
    let (dir, path) = create_test_file("add.ef", b"53+N");
    fs::write(dir.path().join("efrt.toml"), "[runtime]\nstack_capacity = 0\n").unwrap();

    efrt(dir.path())
        .args(["run", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("runtime.stack_capacity"));
}

#[test]
fn test_unknown_config_key_is_rejected() {
    let (dir, path) = create_test_file("add.ef", b"53+N");
    fs::write(dir.path().join("efrt.toml"), "[runtime]\nstack_size = 4\n").unwrap();

    efrt(dir.path()).args(["run", &path]).assert().failure();
}

#[test]
fn test_environment_overrides_project_config() {
    let (dir, path) = create_test_file("echo.ef", b"DN");
    fs::write(dir.path().join("efrt.toml"), "[runtime]\nauto_zero = false\n").unwrap();

    efrt(dir.path())
        .env("EFRT_AUTO_ZERO", "1")
        .args(["run", &path])
        .write_stdin("A")
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_cli_flag_overrides_environment() {
    let (dir, path) = create_test_file("loop.ef", b"1J");

    efrt(dir.path())
        .env("EFRT_MAX_CYCLES", "10")
        .args(["run", &path, "--max-cycles", "20"])
        .assert()
        .success()
        .stderr(predicate::str::contains("(20 cycles)"));
}

#[test]
fn test_global_config_is_lowest_priority() {
    let (dir, path) = create_test_file("loop.ef", b"1J");
    let global_dir = dir.path().join(".efrt");
    fs::create_dir(&global_dir).unwrap();
    fs::write(global_dir.join("config.toml"), "[runtime]\nmax_cycles = 30\n").unwrap();

    efrt(dir.path())
        .args(["run", &path])
        .assert()
        .success()
        .stderr(predicate::str::contains("(30 cycles)"));

    fs::write(dir.path().join("efrt.toml"), "[runtime]\nmax_cycles = 40\n").unwrap();
    efrt(dir.path())
        .args(["run", &path])
        .assert()
        .success()
        .stderr(predicate::str::contains("(40 cycles)"));
}

// ============================================================================
// efrt random
// ============================================================================

#[test]
fn test_random_saves_reproducible_program() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.ef");
    let second = temp_dir.path().join("second.ef");

    for target in [&first, &second] {
        efrt(temp_dir.path())
            .args(["random", "64", "--seed", "5", "--max-cycles", "10000", "--save"])
            .arg(target)
            .assert()
            .success()
            .stderr(predicate::str::contains("Running file \"Random Bytes\"."))
            .stderr(predicate::str::contains("Finished running file \"Random Bytes\"."));
    }

    let first = fs::read(first).unwrap();
    assert_eq!(first.len(), 64);
    assert_eq!(first, fs::read(second).unwrap());
}

#[test]
fn test_random_zero_length() {
    let temp_dir = TempDir::new().unwrap();

    efrt(temp_dir.path())
        .args(["random", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Executed 0 bytes"));
}

#[test]
fn test_random_rejects_non_integer_length() {
    let temp_dir = TempDir::new().unwrap();

    efrt(temp_dir.path())
        .args(["random", "many"])
        .assert()
        .failure();
}

// ============================================================================
// efrt completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let temp_dir = TempDir::new().unwrap();

    efrt(temp_dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("efrt"));
}
