// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end tests for the `logoconv` binary.

use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logoconv"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to spawn logoconv")
}

#[test]
fn clean_directory_gets_both_files_and_one_line() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_in(dir.path());

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "Generated logo.pgm and logo.jpg\n");

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["logo.jpg", "logo.pgm"]);

    let pgm = std::fs::read(dir.path().join("logo.pgm")).unwrap();
    let jpg = std::fs::read(dir.path().join("logo.jpg")).unwrap();
    assert!(pgm.starts_with(b"P5"));
    assert!(jpg.starts_with(&[0xFF, 0xD8, 0xFF]));

    let decoded = image::open(dir.path().join("logo.jpg")).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 480));
}

#[test]
fn rerun_overwrites_previous_outputs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("logo.pgm"), b"stale").unwrap();
    std::fs::write(dir.path().join("logo.jpg"), b"stale").unwrap();

    assert!(run_in(dir.path()).status.success());

    let pgm = std::fs::read(dir.path().join("logo.pgm")).unwrap();
    assert!(pgm.starts_with(b"P5"));
}

#[test]
fn blocked_first_output_fails_before_anything_is_written() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("logo.pgm")).unwrap();

    let output = run_in(dir.path());

    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("logo.pgm could not be written"));
    assert!(dir.path().join("logo.pgm").is_dir());
    assert!(!dir.path().join("logo.jpg").exists());
}

#[test]
fn blocked_second_output_keeps_the_first() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("logo.jpg")).unwrap();

    let output = run_in(dir.path());

    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("logo.jpg could not be written"));
    let pgm = std::fs::read(dir.path().join("logo.pgm")).unwrap();
    assert!(pgm.starts_with(b"P5"));
}
