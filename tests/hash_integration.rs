use std::fs;
use std::sync::Arc;

use fileops::{DigestAlgorithm, FileOps, FileOpsError, FsEvent, RecordingSink};
use tempfile::tempdir;

#[test]
fn hash_of_known_content() {
    let td = tempdir().unwrap();
    let f = td.path().join("abc.txt");
    fs::write(&f, b"abc").unwrap();

    let ops = FileOps::new();
    assert_eq!(ops.hash_of(&f).unwrap(), "900150983CD24FB0D6963F7D28E17F72");
}

#[test]
fn hash_of_empty_file() {
    let td = tempdir().unwrap();
    let f = td.path().join("empty");
    fs::write(&f, b"").unwrap();

    assert_eq!(
        FileOps::new().hash_of(&f).unwrap(),
        "D41D8CD98F00B204E9800998ECF8427E"
    );
}

#[test]
fn hash_spanning_many_chunks_matches_single_read() {
    let td = tempdir().unwrap();
    let f = td.path().join("data.bin");
    let data: Vec<u8> = (0..50_000u32).map(|i| (i * 7 % 256) as u8).collect();
    fs::write(&f, &data).unwrap();

    let small = FileOps::builder().chunk_size(13).build().hash_of(&f).unwrap();
    let large = FileOps::builder().chunk_size(1 << 20).build().hash_of(&f).unwrap();
    assert_eq!(small, large);
}

#[test]
fn configured_digest_is_used() {
    let td = tempdir().unwrap();
    let f = td.path().join("abc.txt");
    fs::write(&f, b"abc").unwrap();

    let ops = FileOps::builder().digest(DigestAlgorithm::Sha256).build();
    let h = ops.hash_of(&f).unwrap();
    assert_eq!(h.len(), 64);
    assert!(h.starts_with("BA7816BF"));
}

#[test]
fn hashing_leaves_file_untouched_and_records_events() {
    let td = tempdir().unwrap();
    let f = td.path().join("keep.txt");
    fs::write(&f, b"unchanged").unwrap();

    let sink = Arc::new(RecordingSink::new());
    let ops = FileOps::builder().sink(sink.clone()).build();
    ops.hash_of(&f).unwrap();

    assert_eq!(fs::read(&f).unwrap(), b"unchanged");
    let events = sink.events();
    assert!(matches!(events.first(), Some(FsEvent::HashStarted { .. })));
    assert!(matches!(events.last(), Some(FsEvent::Hashed { .. })));
}

#[test]
fn missing_file_is_access_error() {
    let td = tempdir().unwrap();
    let missing = td.path().join("nope");
    let err = FileOps::new().hash_of(&missing).unwrap_err();
    match err {
        FileOpsError::FileAccess { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn directory_cannot_be_hashed() {
    let td = tempdir().unwrap();
    assert!(FileOps::new().hash_of(td.path()).is_err());
}
