//! Tests for the multi-file orchestrator on the filesystem.

use std::path::PathBuf;

use mytail::orchestrator::{BatchOptions, Orchestrator};
use mytail::source::FsOpener;
use mytail::tail::{ReadRequest, ReadStatus};
use tempfile::TempDir;

fn run(paths: &[PathBuf], options: BatchOptions) -> (String, String, ReadStatus) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let report = Orchestrator::new(&FsOpener::new(), options)
        .run(paths, &mut out, &mut err)
        .unwrap();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
        report.status,
    )
}

fn two_lines() -> BatchOptions {
    BatchOptions {
        request: ReadRequest::Lines(2),
        ..Default::default()
    }
}

#[test]
fn two_files_in_request_order() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    std::fs::write(&first, "1\n2\n3\n").unwrap();
    std::fs::write(&second, "x\ny\n").unwrap();

    let (out, err, status) = run(&[second.clone(), first.clone()], two_lines());
    let expected = format!(
        "==> {} <==\nx\ny\n\n==> {} <==\n2\n3\n",
        second.display(),
        first.display()
    );
    assert_eq!(out, expected);
    assert!(err.is_empty());
    assert_eq!(status, ReadStatus::Success);
}

#[test]
fn missing_file_fails_batch_but_others_print() {
    let dir = TempDir::new().unwrap();
    let present = dir.path().join("present.txt");
    let missing = dir.path().join("missing.txt");
    std::fs::write(&present, "hello\n").unwrap();

    let (out, err, status) = run(&[present.clone(), missing.clone()], two_lines());
    assert!(out.contains("hello\n"));
    assert_eq!(
        err,
        format!("mytail: {}: No such file or directory\n", missing.display())
    );
    assert_eq!(status, ReadStatus::Failure);
}

#[test]
fn only_missing_file() {
    let (out, err, status) = run(&[PathBuf::from("not_exists")], two_lines());
    assert!(out.is_empty());
    assert_eq!(err, "mytail: not_exists: No such file or directory\n");
    assert_eq!(status, ReadStatus::Failure);
}
