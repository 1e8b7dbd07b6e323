//! I/O error wording.
//!
//! Turns a raw io::Error into a short message with an actionable hint, used by the
//! Display impls in `errors.rs` and by the move fallback when it logs why rename failed.

use std::io;
use std::path::Path;

use crate::platform::is_cross_device;

/// Platform-aware hint for an I/O error, if one applies.
pub(crate) fn hint_for(e: &io::Error) -> Option<&'static str> {
    if is_cross_device(e) {
        return Some("cross-filesystem; atomic rename not possible");
    }
    let hint = match e.kind() {
        io::ErrorKind::PermissionDenied => "permission denied; check ownership and write permissions",
        io::ErrorKind::NotFound => "path not found; verify it exists",
        io::ErrorKind::AlreadyExists => "already exists; remove it or pick another name",
        io::ErrorKind::StorageFull => "insufficient space on device",
        io::ErrorKind::ReadOnlyFilesystem => "read-only filesystem; cannot write here",
        io::ErrorKind::NotADirectory => "a path component is a file, not a directory",
        io::ErrorKind::IsADirectory => "path is a directory",
        io::ErrorKind::DirectoryNotEmpty => "directory is not empty",
        io::ErrorKind::ResourceBusy => "resource busy; another process may hold it",
        _ => return None,
    };
    Some(hint)
}

/// `<error>[ — <hint>][ [os code: N]]`
pub(crate) fn explain(e: &io::Error) -> String {
    let mut msg = e.to_string();
    if let Some(hint) = hint_for(e) {
        msg.push_str(" — ");
        msg.push_str(hint);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// `<op> '<path>': <explained error>`
pub(crate) fn describe_io(op: &str, path: &Path, e: &io::Error) -> String {
    format!("{} '{}': {}", op, path.display(), explain(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_path_and_hint() {
        let p = Path::new("/nonexistent/path/for/test");
        let msg = describe_io("open", p, &io::Error::from(io::ErrorKind::NotFound));
        assert!(msg.starts_with("open '/nonexistent/path/for/test'"), "{msg}");
        assert!(msg.contains("path not found"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_errors_carry_code() {
        let msg = explain(&io::Error::from_raw_os_error(libc::ENOSPC));
        assert!(msg.contains("insufficient space"), "{msg}");
        assert!(msg.contains(&format!("[os code: {}]", libc::ENOSPC)), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn exdev_is_reported_as_cross_filesystem() {
        let e = io::Error::from_raw_os_error(libc::EXDEV);
        assert_eq!(hint_for(&e), Some("cross-filesystem; atomic rename not possible"));
    }

    #[test]
    fn unknown_kinds_have_no_hint() {
        let e = io::Error::other("boom");
        assert_eq!(hint_for(&e), None);
        assert_eq!(explain(&e), "boom");
    }
}
