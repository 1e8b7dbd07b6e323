//! Core library for `fileops`.
//!
//! Small, stateless file-system helpers: content hashing, temporary files, idempotent
//! directory creation and deletion, copy, rename, and move with a copy+delete fallback.
//! Every operation is a method on [`FileOps`]; what happens is reported as typed
//! [`FsEvent`]s to an injected [`EventSink`] (by default, `tracing`).
//!
//! ```no_run
//! use fileops::FileOps;
//! use std::path::Path;
//!
//! # fn main() -> fileops::Result<()> {
//! let ops = FileOps::new();
//! let hash = ops.hash_of(Path::new("report.pdf"))?;
//! ops.move_file(Path::new("report.pdf"), Path::new("archive/2026/report.pdf"))?;
//! println!("{hash}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod events;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod release;

pub use config::{Config, LogLevel, default_config_path, load_config, path_has_symlink_ancestor};
pub use errors::{FileOpsError, Result};
pub use events::{EventSink, FsEvent, MoveVia, RecordingSink, TracingSink};
pub use fs_ops::{
    DEFAULT_CHUNK_SIZE, DigestAlgorithm, DurabilityMode, FileOps, FileOpsBuilder, MoveOutcome,
    hash_reader,
};
pub use release::{Release, Scoped, close_quietly};
