//! Operation events and the sinks that receive them.
//!
//! Operations never call a global logger directly. They describe what happened as an
//! [`FsEvent`] and hand it to the [`EventSink`] held by their [`FileOps`](crate::FileOps).
//! The default [`TracingSink`] forwards to `tracing` with structured fields;
//! [`RecordingSink`] keeps events in memory so callers can assert on them.

use std::backtrace::Backtrace;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::{Level, debug, error, trace, warn};

use crate::fs_ops::DigestAlgorithm;

/// How a move completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveVia {
    Rename,
    CopyAndDelete,
}

/// Something an operation did, or failed to do without raising an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FsEvent {
    HashStarted {
        path: PathBuf,
    },
    Hashed {
        path: PathBuf,
        algorithm: DigestAlgorithm,
        hash: String,
    },
    TempFileCreated {
        path: PathBuf,
    },
    DirectoryCreated {
        path: PathBuf,
    },
    Renamed {
        src: PathBuf,
        dest: PathBuf,
    },
    Copied {
        src: PathBuf,
        dest: PathBuf,
        bytes: u64,
    },
    /// Native rename failed; move continues with copy+delete.
    MoveFallback {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },
    Moved {
        src: PathBuf,
        dest: PathBuf,
        via: MoveVia,
    },
    /// src and dest are the same file; nothing to do.
    MoveSkipped {
        path: PathBuf,
    },
    /// Fallback copy failed; dest is being removed.
    MoveCopyFailed {
        src: PathBuf,
        dest: PathBuf,
        error: String,
    },
    /// Fallback copied but could not delete src; dest is being removed.
    MoveSourceOrphaned {
        src: PathBuf,
        dest: PathBuf,
    },
    Deleted {
        path: PathBuf,
    },
    DeleteSkipped {
        path: PathBuf,
    },
    DeleteFailed {
        path: PathBuf,
        error: String,
    },
    CloseFailed {
        resource: String,
        error: String,
    },
}

impl FsEvent {
    /// Severity the event is reported at.
    pub fn level(&self) -> Level {
        match self {
            FsEvent::HashStarted { .. } | FsEvent::MoveFallback { .. } => Level::TRACE,
            FsEvent::MoveCopyFailed { .. } | FsEvent::MoveSourceOrphaned { .. } => Level::ERROR,
            FsEvent::DeleteFailed { .. } | FsEvent::CloseFailed { .. } => Level::WARN,
            _ => Level::DEBUG,
        }
    }
}

/// Receives events from operations. Must be shareable across threads.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &FsEvent);
}

/// Default sink: forwards events to the current `tracing` subscriber.
///
/// When TRACE is enabled for this crate, every event is followed by a trace event
/// carrying the backtrace of the call that produced it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &FsEvent) {
        match event {
            FsEvent::HashStarted { path } => {
                trace!(path = %path.display(), "Computing file hash")
            }
            FsEvent::Hashed {
                path,
                algorithm,
                hash,
            } => debug!(path = %path.display(), %algorithm, %hash, "Computed file hash"),
            FsEvent::TempFileCreated { path } => {
                debug!(path = %path.display(), "Created temporary file")
            }
            FsEvent::DirectoryCreated { path } => {
                debug!(path = %path.display(), "Created directory")
            }
            FsEvent::Renamed { src, dest } => {
                debug!(src = %src.display(), dest = %dest.display(), "Renamed file")
            }
            FsEvent::Copied { src, dest, bytes } => {
                debug!(src = %src.display(), dest = %dest.display(), bytes, "Copied file")
            }
            FsEvent::MoveFallback { src, dest, reason } => trace!(
                src = %src.display(),
                dest = %dest.display(),
                %reason,
                "Move via rename failed, trying copy+delete"
            ),
            FsEvent::Moved { src, dest, via } => match via {
                MoveVia::Rename => {
                    debug!(src = %src.display(), dest = %dest.display(), "Moved file (via rename)")
                }
                MoveVia::CopyAndDelete => debug!(
                    src = %src.display(),
                    dest = %dest.display(),
                    "Moved file (via copy+delete)"
                ),
            },
            FsEvent::MoveSkipped { path } => {
                debug!(path = %path.display(), "Move skipped: source and destination are the same file")
            }
            FsEvent::MoveCopyFailed { src, dest, error } => error!(
                src = %src.display(),
                dest = %dest.display(),
                %error,
                "Error moving file (via copy+delete); deleting destination"
            ),
            FsEvent::MoveSourceOrphaned { src, dest } => error!(
                src = %src.display(),
                dest = %dest.display(),
                "Error moving file (via copy+delete): source deletion failed; deleting destination"
            ),
            FsEvent::Deleted { path } => debug!(path = %path.display(), "Deleted file"),
            FsEvent::DeleteSkipped { path } => {
                debug!(path = %path.display(), "File deletion ignored: not found")
            }
            FsEvent::DeleteFailed { path, error } => {
                warn!(path = %path.display(), %error, "File deletion failed")
            }
            FsEvent::CloseFailed { resource, error } => {
                warn!(%resource, %error, "Error closing resource")
            }
        }

        if tracing::enabled!(Level::TRACE) {
            trace!(backtrace = %Backtrace::force_capture(), "event origin");
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<FsEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    pub fn events(&self) -> Vec<FsEvent> {
        self.lock().clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<FsEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Recorded events at or above `level` in severity (ERROR is the most severe).
    pub fn at_least(&self, level: Level) -> Vec<FsEvent> {
        self.lock()
            .iter()
            .filter(|e| e.level() <= level)
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FsEvent>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: &FsEvent) {
        self.lock().push(event.clone());
    }
}
