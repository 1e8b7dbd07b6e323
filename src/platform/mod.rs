//! Platform-specific helpers.
//! Hides Unix/Windows differences behind a small uniform API so the
//! operations in `fs_ops` stay platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{close_file, fsync_dir, is_cross_device, open_log_file_secure_append};

#[cfg(not(unix))]
pub use windows::{close_file, fsync_dir, is_cross_device, open_log_file_secure_append};
