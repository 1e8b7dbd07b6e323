use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use fileops::{FileOps, FileOpsError, FsEvent, RecordingSink};
use tempfile::tempdir;

#[test]
fn temp_file_in_missing_directory_is_created_empty() {
    let td = tempdir().unwrap();
    let dir = td.path().join("spool/incoming");

    let p = FileOps::new()
        .create_temp_file("upload-", ".part", Some(&dir))
        .unwrap();
    assert_eq!(p.parent().unwrap(), dir);
    let name = p.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("upload-") && name.ends_with(".part"), "{name}");
    assert_eq!(fs::metadata(&p).unwrap().len(), 0);
}

#[test]
fn temp_files_are_unique() {
    let td = tempdir().unwrap();
    let ops = FileOps::new();
    let names: HashSet<_> = (0..32)
        .map(|_| ops.create_temp_file("t", "", Some(td.path())).unwrap())
        .collect();
    assert_eq!(names.len(), 32);
}

#[test]
fn temp_file_defaults_to_system_temp_dir() {
    let ops = FileOps::new();
    let p = ops.create_temp_file("fileops-it-", ".tmp", None).unwrap();
    assert!(p.starts_with(std::env::temp_dir()));
    assert!(p.is_file());
    assert!(ops.delete(&p));
}

#[test]
fn temp_file_dir_blocked_by_regular_file() {
    let td = tempdir().unwrap();
    let blocker = td.path().join("blocker");
    fs::write(&blocker, b"").unwrap();

    let err = FileOps::new()
        .create_temp_file("x", ".tmp", Some(&blocker.join("sub")))
        .unwrap_err();
    assert!(matches!(err, FileOpsError::DirectoryCreation { .. }), "{err:?}");
}

#[test]
fn create_directory_is_idempotent_and_silent_when_present() {
    let td = tempdir().unwrap();
    let dir = td.path().join("a/b/c");
    let sink = Arc::new(RecordingSink::new());
    let ops = FileOps::builder().sink(sink.clone()).build();

    ops.create_directory(&dir).unwrap();
    assert!(dir.is_dir());
    assert_eq!(sink.take().len(), 1);

    ops.create_directory(&dir).unwrap();
    assert!(sink.events().is_empty());
}

#[test]
fn create_parent_directory_leaves_child_alone() {
    let td = tempdir().unwrap();
    let child = td.path().join("logs/2024/app.log");

    let sink = Arc::new(RecordingSink::new());
    let ops = FileOps::builder().sink(sink.clone()).build();
    ops.create_parent_directory(&child).unwrap();
    assert!(td.path().join("logs/2024").is_dir());
    assert!(!child.exists());
    assert!(matches!(
        sink.events().as_slice(),
        [FsEvent::DirectoryCreated { path }] if path == &td.path().join("logs/2024")
    ));
}

#[test]
fn bare_file_name_has_no_parent_to_create() {
    FileOps::new()
        .create_parent_directory(std::path::Path::new("plain.txt"))
        .unwrap();
}
