//! File move implementation.
//! Attempts the rename primitive; when it fails (cross-filesystem, permissions on the
//! rename path, ...) falls back to copy+delete with cleanup so that at most one of
//! source and destination survives.

use std::fs;
use std::path::Path;

use super::FileOps;
use super::helpers::explain;
use super::util::same_entry;
use crate::errors::{FileOpsError, Result};
use crate::events::{FsEvent, MoveVia};

/// How a successful move was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Fast path: the rename primitive succeeded.
    Renamed,
    /// Fallback: content copied, then the source deleted.
    CopiedAndDeleted,
    /// Source and destination are the same directory entry; nothing was touched.
    AlreadyInPlace,
}

impl FileOps {
    /// Move `src` to `dest`, replacing any existing `dest`.
    ///
    /// Errors:
    /// - the copy's own error if the fallback copy fails (the partial `dest` is deleted);
    /// - [`FileOpsError::SourceNotRemoved`] if the fallback copied but could not delete
    ///   `src`. `dest` is deleted again in that case so no duplicate is left behind.
    pub fn move_file(&self, src: &Path, dest: &Path) -> Result<MoveOutcome> {
        if same_entry(src, dest) {
            self.emit(FsEvent::MoveSkipped {
                path: src.to_path_buf(),
            });
            return Ok(MoveOutcome::AlreadyInPlace);
        }

        if fs::symlink_metadata(dest).is_ok() {
            self.delete(dest);
        } else {
            self.create_parent_directory(dest)?;
        }

        match (self.renamer)(src, dest) {
            Ok(()) => {
                self.emit(FsEvent::Moved {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    via: MoveVia::Rename,
                });
                return Ok(MoveOutcome::Renamed);
            }
            Err(e) => self.emit(FsEvent::MoveFallback {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: explain(&e),
            }),
        }

        if let Err(copy_err) = self.copy(src, dest) {
            self.emit(FsEvent::MoveCopyFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                error: copy_err.to_string(),
            });
            self.delete(dest);
            return Err(copy_err);
        }

        if self.delete(src) {
            self.emit(FsEvent::Moved {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                via: MoveVia::CopyAndDelete,
            });
            return Ok(MoveOutcome::CopiedAndDeleted);
        }

        self.emit(FsEvent::MoveSourceOrphaned {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        });
        let dest_removed = self.delete(dest);
        Err(FileOpsError::SourceNotRemoved {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            dest_removed,
        })
    }
}
