//! Integration tests for the `hastynoise` binary.

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn hastynoise() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hastynoise"))
}

fn dump_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "ns"))
        .count()
}

#[test]
fn test_no_flags_is_an_error() {
    let output = hastynoise().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_bad_flag_value_is_a_usage_error() {
    let output = hastynoise().args(["--size", "lots"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_oversized_grid_is_rejected() {
    let dir = tempdir().unwrap();
    let output = hastynoise()
        .args(["-g", "--size", "4294967296", "--data"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("too large"));
    assert_eq!(dump_count(dir.path()), 0);
}

#[test]
fn test_generate_then_compare() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");

    let output = hastynoise()
        .args(["-g", "-c", "--size", "6", "--data"])
        .arg(&data)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(!stdout.contains("DIVERGED"));

    // 12 noise types per registered level
    let count = dump_count(&data);
    assert!(count >= 12 && count % 12 == 0, "{count} dumps");
    for entry in std::fs::read_dir(&data).unwrap() {
        assert_eq!(entry.unwrap().metadata().unwrap().len(), 6 * 6 * 6 * 4);
    }
}

#[test]
fn test_level_cap_limits_generation() {
    let dir = tempdir().unwrap();
    let output = hastynoise()
        .args(["-g", "-m", "0", "--size", "4", "--data"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(dump_count(dir.path()), 12);
    assert!(dir.path().join("Cellular_None.ns").is_file());
}

#[test]
fn test_compare_flags_diverging_dumps() {
    let dir = tempdir().unwrap();
    let floats = |v: f32| -> Vec<u8> { (0..8).flat_map(|_| v.to_ne_bytes()).collect() };
    std::fs::write(dir.path().join("Perlin_None.ns"), floats(0.0)).unwrap();
    std::fs::write(dir.path().join("Perlin_SSE2.ns"), floats(0.25)).unwrap();

    let output = hastynoise()
        .args(["-c", "--size", "2", "--data"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("DIVERGED"));
}
