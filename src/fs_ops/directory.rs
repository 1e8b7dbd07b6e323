//! Idempotent recursive directory creation.

use std::fs;
use std::path::Path;

use super::FileOps;
use crate::errors::{FileOpsError, Result};
use crate::events::FsEvent;

impl FileOps {
    /// Create `dir` and any missing ancestors. An existing directory is a no-op.
    pub fn create_directory(&self, dir: &Path) -> Result<()> {
        if dir.as_os_str().is_empty() || dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|source| FileOpsError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        })?;
        self.emit(FsEvent::DirectoryCreated {
            path: dir.to_path_buf(),
        });
        Ok(())
    }

    /// Create the directory containing `child`. Roots and bare file names have
    /// nothing to create.
    pub fn create_parent_directory(&self, child: &Path) -> Result<()> {
        match child.parent() {
            Some(parent) => self.create_directory(parent),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn recording() -> (FileOps, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        (FileOps::builder().sink(sink.clone()).build(), sink)
    }

    #[test]
    fn creates_nested_and_is_idempotent() {
        let td = tempdir().unwrap();
        let (ops, sink) = recording();
        let nested = td.path().join("a").join("b").join("c");
        ops.create_directory(&nested).unwrap();
        assert!(nested.is_dir());
        ops.create_directory(&nested).unwrap();
        assert_eq!(
            sink.events(),
            vec![FsEvent::DirectoryCreated { path: nested }],
            "second call must not report a creation"
        );
    }

    #[test]
    fn file_in_the_way_is_a_creation_error() {
        let td = tempdir().unwrap();
        let (ops, _) = recording();
        let blocker = td.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let target = blocker.join("sub");
        let err = ops.create_directory(&target).unwrap_err();
        match err {
            FileOpsError::DirectoryCreation { path, .. } => assert_eq!(path, target),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parent_of_root_is_noop() {
        let (ops, sink) = recording();
        ops.create_parent_directory(Path::new("/")).unwrap();
        ops.create_parent_directory(Path::new("bare-name.txt")).unwrap();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn parent_is_created_for_child() {
        let td = tempdir().unwrap();
        let (ops, _) = recording();
        let child = td.path().join("x").join("y").join("file.bin");
        ops.create_parent_directory(&child).unwrap();
        assert!(child.parent().unwrap().is_dir());
        assert!(!child.exists());
    }
}
