//! File-system operations.
//!
//! Everything hangs off [`FileOps`], a cheap-to-clone handle carrying the event sink,
//! the rename primitive and a few tunables. Each operation lives in its own module as
//! an `impl FileOps` block; none keeps state between calls.

mod copy;
mod directory;
mod file_move;
mod hash;
pub(crate) mod helpers;
mod remove;
mod rename;
mod temp;
mod util;

pub use copy::DurabilityMode;
pub use file_move::MoveOutcome;
pub use hash::{DigestAlgorithm, hash_reader};
pub use remove::native_remove;
pub use rename::native_rename;

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::events::{EventSink, FsEvent, TracingSink};
use crate::release::{self, Release, Scoped};

/// Read size used by [`FileOps::hash_of`] unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Signature of the rename primitive used by `rename` and by `move_file`'s fast path.
pub type RenameFn = dyn Fn(&Path, &Path) -> io::Result<()> + Send + Sync;

/// Signature of the remove primitive used by `delete` once the path is known to exist.
pub type RemoveFn = dyn Fn(&Path) -> io::Result<()> + Send + Sync;

/// Handle for all operations.
#[derive(Clone)]
pub struct FileOps {
    sink: Arc<dyn EventSink>,
    renamer: Arc<RenameFn>,
    remover: Arc<RemoveFn>,
    digest: DigestAlgorithm,
    chunk_size: usize,
    durability: DurabilityMode,
}

impl FileOps {
    /// Defaults: tracing sink, native rename and remove, MD5, 4 KiB chunks, fsynced copies.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> FileOpsBuilder {
        FileOpsBuilder::default()
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::builder()
            .digest(cfg.digest)
            .chunk_size(cfg.chunk_size)
            .durability(cfg.durability)
            .build()
    }

    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn sink(&self) -> &dyn EventSink {
        self.sink.as_ref()
    }

    /// Guard `resource` so it is released (and any failure logged) when the guard drops.
    pub fn scoped<R: Release>(&self, resource: R, label: impl Into<String>) -> Scoped<'_, R> {
        Scoped::new(resource, label, self.sink())
    }

    /// Release `resource` if present. Never fails; release errors become warn events.
    pub fn close_quietly<R: Release>(&self, resource: Option<R>, label: &str) {
        release::close_quietly(self.sink(), resource, label);
    }

    fn emit(&self, event: FsEvent) {
        self.sink.record(&event);
    }
}

impl Default for FileOps {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FileOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileOps")
            .field("digest", &self.digest)
            .field("chunk_size", &self.chunk_size)
            .field("durability", &self.durability)
            .finish_non_exhaustive()
    }
}

/// Builder for [`FileOps`].
pub struct FileOpsBuilder {
    sink: Arc<dyn EventSink>,
    renamer: Arc<RenameFn>,
    remover: Arc<RemoveFn>,
    digest: DigestAlgorithm,
    chunk_size: usize,
    durability: DurabilityMode,
}

impl Default for FileOpsBuilder {
    fn default() -> Self {
        Self {
            sink: Arc::new(TracingSink),
            renamer: Arc::new(native_rename),
            remover: Arc::new(native_remove),
            digest: DigestAlgorithm::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            durability: DurabilityMode::Full,
        }
    }
}

impl FileOpsBuilder {
    /// Share an existing sink, e.g. an `Arc<RecordingSink>` a test keeps a handle to.
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the rename primitive (e.g. to simulate a cross-device move).
    pub fn renamer<F>(mut self, f: F) -> Self
    where
        F: Fn(&Path, &Path) -> io::Result<()> + Send + Sync + 'static,
    {
        self.renamer = Arc::new(f);
        self
    }

    /// Replace the remove primitive (e.g. to simulate a source that cannot be deleted).
    pub fn remover<F>(mut self, f: F) -> Self
    where
        F: Fn(&Path) -> io::Result<()> + Send + Sync + 'static,
    {
        self.remover = Arc::new(f);
        self
    }

    pub fn digest(mut self, digest: DigestAlgorithm) -> Self {
        self.digest = digest;
        self
    }

    /// Zero is treated as one byte.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = mode;
        self
    }

    pub fn build(self) -> FileOps {
        FileOps {
            sink: self.sink,
            renamer: self.renamer,
            remover: self.remover,
            digest: self.digest,
            chunk_size: self.chunk_size,
            durability: self.durability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn from_config_carries_tunables() {
        let cfg = Config {
            log_level: LogLevel::Debug,
            log_file: None,
            digest: DigestAlgorithm::Sha256,
            chunk_size: 512,
            durability: DurabilityMode::Data,
        };
        let ops = FileOps::from_config(&cfg);
        assert_eq!(ops.digest(), DigestAlgorithm::Sha256);
        assert_eq!(ops.chunk_size(), 512);
        assert!(matches!(ops.durability, DurabilityMode::Data));
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let ops = FileOps::builder().chunk_size(0).build();
        assert_eq!(ops.chunk_size(), 1);
    }

    #[test]
    fn ops_handle_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileOps>();
    }
}
