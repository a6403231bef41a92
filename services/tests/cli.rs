use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn it_prints_chunks() {
    let output = Command::cargo_bin("arcrest-cli")
        .unwrap()
        .args(["chunks", "10", "3"])
        .output()
        .unwrap();

    assert!(output.status.success(), "failed to run CLI: {output:?}");
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "1-3\n4-6\n7-9\n10-10\n"
    );
}

#[test]
fn it_fails_on_zero_chunk_size() {
    let output = Command::cargo_bin("arcrest-cli")
        .unwrap()
        .args(["chunks", "10", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Chunk size must be at least 1"));
}
