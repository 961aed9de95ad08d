use std::fs;

use jobfetch_engine::{ensure_output_dir, write_file_atomic, AtomicFileWriter, FailureKind, FetchError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("postings").join("2024");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_posting() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("acme-engineer-posting.md", "old").unwrap();
    assert_eq!(first.file_name().unwrap(), "acme-engineer-posting.md");
    assert_eq!(fs::read_to_string(&first).unwrap(), "old");

    let second = writer.write("acme-engineer-posting.md", "new").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "new");

    let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "temp files must not linger");
}

#[test]
fn write_file_atomic_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("local").join("cv.json");

    let written = write_file_atomic(&target, "{}\n").unwrap();

    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "{}\n");
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let err = writer.write("doc.md", "data").unwrap_err();
    assert!(!file_path.with_file_name("doc.md").exists());

    let fetch_err: FetchError = err.into();
    assert_eq!(fetch_err.kind, FailureKind::Filesystem);
}
