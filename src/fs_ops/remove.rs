//! Idempotent delete.
//!
//! Delete answers with a bool instead of an error so cleanup paths (notably the move
//! fallback) can branch on the outcome without unwinding anything.

use std::fs;
use std::io;
use std::path::Path;

use super::FileOps;
use crate::events::FsEvent;

/// Default remove primitive: `remove_dir` for directories, `remove_file` for
/// everything else (symlinks are removed, never followed).
pub fn native_remove(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

impl FileOps {
    /// Remove a file, symlink or empty directory. Returns true when `path` is gone
    /// afterwards, including when it never existed.
    pub fn delete(&self, path: &Path) -> bool {
        match fs::symlink_metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.emit(FsEvent::DeleteSkipped {
                    path: path.to_path_buf(),
                });
                return true;
            }
            Err(e) => return self.delete_failed(path, &e),
        }

        match (self.remover)(path) {
            Ok(()) => {
                self.emit(FsEvent::Deleted {
                    path: path.to_path_buf(),
                });
                true
            }
            // Someone else removed it in between; the end state is what we wanted.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.emit(FsEvent::DeleteSkipped {
                    path: path.to_path_buf(),
                });
                true
            }
            Err(e) => self.delete_failed(path, &e),
        }
    }

    /// `delete` for an optional path; `None` counts as success.
    pub fn delete_if_present(&self, path: Option<&Path>) -> bool {
        path.is_none_or(|p| self.delete(p))
    }

    fn delete_failed(&self, path: &Path, e: &io::Error) -> bool {
        self.emit(FsEvent::DeleteFailed {
            path: path.to_path_buf(),
            error: super::helpers::explain(e),
        });
        false
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
    fn missing_path_is_success() {
        let td = tempdir().unwrap();
        let (ops, sink) = recording();
        let ghost = td.path().join("ghost");
        assert!(ops.delete(&ghost));
        assert_eq!(sink.events(), vec![FsEvent::DeleteSkipped { path: ghost }]);
    }

    #[test]
    fn deletes_file_and_empty_dir() {
        let td = tempdir().unwrap();
        let (ops, _) = recording();
        let f = td.path().join("f.txt");
        fs::write(&f, b"data").unwrap();
        let d = td.path().join("empty");
        fs::create_dir(&d).unwrap();
        assert!(ops.delete(&f));
        assert!(ops.delete(&d));
        assert!(!f.exists());
        assert!(!d.exists());
    }

    #[test]
    fn non_empty_dir_reports_false_with_warning() {
        let td = tempdir().unwrap();
        let (ops, sink) = recording();
        let d = td.path().join("full");
        fs::create_dir(&d).unwrap();
        fs::write(d.join("inner"), b"x").unwrap();
        assert!(!ops.delete(&d));
        assert!(d.exists());
        assert!(matches!(
            sink.events().as_slice(),
            [FsEvent::DeleteFailed { path, .. }] if *path == d
        ));
    }

    #[test]
    fn none_is_trivially_deleted() {
        let (ops, sink) = recording();
        assert!(ops.delete_if_present(None));
        assert!(sink.events().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_removed() {
        let td = tempdir().unwrap();
        let (ops, _) = recording();
        let link = td.path().join("dangling");
        std::os::unix::fs::symlink(td.path().join("nowhere"), &link).unwrap();
        assert!(ops.delete_if_present(Some(&link)));
        assert!(fs::symlink_metadata(&link).is_err());
    }

    #[test]
    fn injected_remover_failure_reports_false() {
        let td = tempdir().unwrap();
        let sink = Arc::new(RecordingSink::new());
        let ops = FileOps::builder()
            .sink(sink.clone())
            .remover(|_| Err(io::Error::from(io::ErrorKind::PermissionDenied)))
            .build();
        let f = td.path().join("pinned");
        fs::write(&f, b"x").unwrap();
        assert!(!ops.delete(&f));
        assert!(f.exists());
        assert!(matches!(sink.events().as_slice(), [FsEvent::DeleteFailed { .. }]));
    }

    #[test]
    fn remover_racing_to_not_found_counts_as_deleted() {
        let td = tempdir().unwrap();
        let f = td.path().join("racy");
        fs::write(&f, b"x").unwrap();
        let ops = FileOps::builder()
            .sink(Arc::new(RecordingSink::new()))
            .remover(|p| {
                fs::remove_file(p)?;
                Err(io::Error::from(io::ErrorKind::NotFound))
            })
            .build();
        assert!(ops.delete(&f));
        assert!(!f.exists());
    }
}
