//! Tests for tail-by-lines and tail-by-bytes on the filesystem.

use std::io::Write;
use std::path::Path;

use mytail::source::{FsOpener, SourceOpener};
use mytail::tail::{read_tail, tail_bytes, tail_lines, ReadRequest, ReadStatus};
use tempfile::NamedTempFile;

const SIX_LINES: &str = "aaa\nbbbb\nccccc\ndddddd\nfffffff\ngggggggg\n";

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn numbered(count: usize) -> String {
    (1..=count).map(|i| format!("line {i}\n")).collect()
}

#[test]
fn last_two_of_six_lines() {
    let file = temp_file(SIX_LINES);
    let mut source = FsOpener::new().open(file.path()).unwrap();

    let result = tail_lines(&mut source, file.path(), 2);
    assert_eq!(result.units, vec!["fffffff", "gggggggg"]);
    assert_eq!(result.status(), ReadStatus::Success);
}

#[test]
fn last_twelve_bytes_of_six_lines() {
    let file = temp_file(SIX_LINES.trim_end());
    let mut source = FsOpener::new().open(file.path()).unwrap();

    let result = tail_bytes(&mut source, file.path(), 12);
    assert_eq!(result.units, vec!["fff\ngggggggg"]);
    assert_eq!(result.status(), ReadStatus::Success);
}

#[test]
fn short_file_returns_all_lines() {
    for count in 1..=6 {
        let content = numbered(count);
        let file = temp_file(&content);
        let mut source = FsOpener::new().open(file.path()).unwrap();

        let result = tail_lines(&mut source, file.path(), 6);
        let expected: Vec<String> = content.lines().map(str::to_owned).collect();
        assert_eq!(result.units, expected);
    }
}

#[test]
fn long_file_returns_exact_tail_in_order() {
    let content = numbered(5000);
    let file = temp_file(&content);
    let mut source = FsOpener::new().open(file.path()).unwrap();

    let result = tail_lines(&mut source, file.path(), 10);
    let expected: Vec<String> = (4991..=5000).map(|i| format!("line {i}")).collect();
    assert_eq!(result.units, expected);
}

#[test]
fn long_tail_lines_after_short_head() {
    // Short first lines make the initial window far too small.
    let mut content = String::from("a\nb\nc\n");
    for i in 0..50 {
        content.push_str(&format!("{i}:{}\n", "x".repeat(200)));
    }
    let file = temp_file(&content);
    let mut source = FsOpener::new().open(file.path()).unwrap();

    let result = tail_lines(&mut source, file.path(), 3);
    assert_eq!(result.units.len(), 3);
    assert!(result.units[0].starts_with("47:"));
    assert!(result.units[2].starts_with("49:"));
    assert!(result.units.iter().all(|l| l.len() == 203));
}

#[test]
fn repeated_reads_are_identical() {
    let file = temp_file(&numbered(100));
    let mut source = FsOpener::new().open(file.path()).unwrap();

    let first = read_tail(&mut source, file.path(), ReadRequest::Lines(7));
    let second = read_tail(&mut source, file.path(), ReadRequest::Lines(7));
    assert_eq!(first.units, second.units);
}

#[test]
fn byte_count_clamped_to_file_size() {
    let file = temp_file(SIX_LINES);
    let mut source = FsOpener::new().open(file.path()).unwrap();

    for count in [0u64, 1, 20, 39, 500] {
        let result = tail_bytes(&mut source, file.path(), count);
        let expected = usize::try_from(count).unwrap().min(SIX_LINES.len());
        assert_eq!(result.units.len(), 1);
        assert_eq!(result.units[0].len(), expected);
    }
}

#[test]
fn empty_file_is_success() {
    let file = temp_file("");
    let mut source = FsOpener::new().open(file.path()).unwrap();

    let result = tail_lines(&mut source, Path::new("empty"), 5);
    assert!(result.units.is_empty());
    assert_eq!(result.status(), ReadStatus::Success);
}
