//! Typed error definitions for fileops.
//! Every fallible operation except delete reports one of these; delete answers with a bool.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::helpers::{describe_io, explain};

#[derive(Debug, Error)]
pub enum FileOpsError {
    /// Open, read, write or create failed on `path`.
    #[error("{}", describe_io(.op, .path, .source))]
    FileAccess {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}", describe_io("create directory", .path, .source))]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The native rename primitive refused to rename `src` to `dest`.
    #[error("rename '{}' -> '{}': {}", .src.display(), .dest.display(), explain(.source))]
    Rename {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' and '{}' refer to the same file", .src.display(), .dest.display())]
    SameFile { src: PathBuf, dest: PathBuf },

    /// Move fell back to copy+delete, copied successfully, but the source stayed behind.
    /// `dest_removed` tells whether the copied duplicate was cleaned up again.
    #[error(
        "copied '{}' to '{}' but could not remove the source; {}",
        .src.display(),
        .dest.display(),
        cleanup_note(.dest_removed)
    )]
    SourceNotRemoved {
        src: PathBuf,
        dest: PathBuf,
        dest_removed: bool,
    },

    /// Unknown digest name. This is a configuration fault, not a runtime condition.
    #[error("digest algorithm not available: '{0}' (expected md5, sha256 or blake3)")]
    DigestUnavailable(String),
}

impl FileOpsError {
    pub(crate) fn access(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        FileOpsError::FileAccess {
            op,
            path: path.into(),
            source,
        }
    }

    /// Stable numeric code, used as the process exit status by the CLI.
    pub fn code(&self) -> u8 {
        match self {
            FileOpsError::FileAccess { .. } => 10,
            FileOpsError::DirectoryCreation { .. } => 11,
            FileOpsError::Rename { .. } => 12,
            FileOpsError::SameFile { .. } => 13,
            FileOpsError::SourceNotRemoved { .. } => 14,
            FileOpsError::DigestUnavailable(_) => 20,
        }
    }

    /// Short machine-friendly name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FileOpsError::FileAccess { .. } => "file_access",
            FileOpsError::DirectoryCreation { .. } => "directory_creation",
            FileOpsError::Rename { .. } => "rename",
            FileOpsError::SameFile { .. } => "same_file",
            FileOpsError::SourceNotRemoved { .. } => "source_not_removed",
            FileOpsError::DigestUnavailable(_) => "digest_unavailable",
        }
    }
}

fn cleanup_note(dest_removed: &bool) -> &'static str {
    if *dest_removed {
        "the copy was removed again"
    } else {
        "both files now exist"
    }
}

pub type Result<T, E = FileOpsError> = std::result::Result<T, E>;
