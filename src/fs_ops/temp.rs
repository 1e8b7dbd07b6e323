//! Temporary file allocation.
//! Naming and uniqueness come from the `tempfile` crate; the file is kept on disk.

use std::env;
use std::path::{Path, PathBuf};

use super::FileOps;
use crate::errors::{FileOpsError, Result};
use crate::events::FsEvent;

impl FileOps {
    /// Create a new empty file named `<prefix><random><suffix>`.
    ///
    /// With `dir`, the directory (and ancestors) is created first and the file placed
    /// inside it; without, the platform temp directory is used as-is.
    pub fn create_temp_file(&self, prefix: &str, suffix: &str, dir: Option<&Path>) -> Result<PathBuf> {
        let dir = match dir {
            Some(d) => {
                self.create_directory(d)?;
                d.to_path_buf()
            }
            None => env::temp_dir(),
        };

        let named = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(&dir)
            .map_err(|e| FileOpsError::access("create temporary file in", &dir, e))?;
        let (file, path) = named
            .keep()
            .map_err(|e| FileOpsError::access("keep temporary file in", &dir, e.error))?;
        self.close_quietly(Some(file), &format!("temporary file {}", path.display()));

        self.emit(FsEvent::TempFileCreated { path: path.clone() });
        Ok(path)
    }
}
