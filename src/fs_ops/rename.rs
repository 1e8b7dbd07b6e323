//! Native rename.
//! - Creates the destination's parent first.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

use super::FileOps;
use crate::errors::{FileOpsError, Result};
use crate::events::FsEvent;
use crate::platform::fsync_dir;

/// Default rename primitive: `fs::rename`, then persist the directory entry.
pub fn native_rename(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;
    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        // The rename already happened; a failed fsync must not turn it into an error.
        let _ = fsync_dir(parent);
    }
    Ok(())
}

impl FileOps {
    /// Rename `src` to `dest` with the configured rename primitive. No fallback.
    pub fn rename(&self, src: &Path, dest: &Path) -> Result<()> {
        self.create_parent_directory(dest)?;
        (self.renamer)(src, dest).map_err(|source| FileOpsError::Rename {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            source,
        })?;
        self.emit(FsEvent::Renamed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        });
        Ok(())
    }
}
