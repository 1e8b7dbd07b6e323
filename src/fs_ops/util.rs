//! Path identity checks.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Both paths resolve to the same location (symlinks and `..` resolved).
#[cfg(any(not(unix), test))]
pub(super) fn same_path(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

/// Both paths name the same directory entry. Ancestors are resolved but the final
/// component is not, so a symlink is never the same entry as its target.
pub(super) fn same_entry(a: &Path, b: &Path) -> bool {
    match (entry_path(a), entry_path(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

// Canonical parent joined with the unresolved last component; the entry must exist.
fn entry_path(p: &Path) -> io::Result<PathBuf> {
    fs::symlink_metadata(p)?;
    match (p.parent(), p.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            Ok(dunce::canonicalize(parent)?.join(name))
        }
        // Roots and paths ending in `..` have no entry name of their own.
        _ => dunce::canonicalize(p),
    }
}

/// Both paths name the same underlying file, hard links included.
pub(super) fn same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        match (fs::metadata(a), fs::metadata(b)) {
            (Ok(x), Ok(y)) => x.dev() == y.dev() && x.ino() == y.ino(),
            _ => false,
        }
    }
    #[cfg(not(unix))]
    {
        fs::metadata(b).is_ok() && same_path(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dotted_path_is_same() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        fs::write(&f, b"x").unwrap();
        let dotted = td.path().join("sub").join("..").join("f");
        fs::create_dir(td.path().join("sub")).unwrap();
        assert!(same_path(&f, &dotted));
        assert!(same_file(&f, &dotted));
    }

    #[test]
    fn missing_paths_are_never_same() {
        let td = tempdir().unwrap();
        let f = td.path().join("missing");
        assert!(!same_path(&f, &f));
        assert!(!same_file(&f, &f));
    }

    #[test]
    fn relative_and_absolute_spellings_are_same_entry() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        fs::write(&f, b"x").unwrap();
        fs::create_dir(td.path().join("sub")).unwrap();
        let dotted = td.path().join("sub").join("..").join("f");
        assert!(same_entry(&f, &dotted));
        assert!(!same_entry(&f, &td.path().join("missing")));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_not_same_entry_as_target() {
        let td = tempdir().unwrap();
        let target = td.path().join("target");
        let link = td.path().join("link");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();
        assert!(same_path(&target, &link));
        assert!(!same_entry(&target, &link));
        assert!(same_entry(&link, &link));
    }

    #[cfg(unix)]
    #[test]
    fn hard_links_are_same_file_not_same_path() {
        let td = tempdir().unwrap();
        let a = td.path().join("a");
        let b = td.path().join("b");
        fs::write(&a, b"x").unwrap();
        fs::hard_link(&a, &b).unwrap();
        assert!(same_file(&a, &b));
        assert!(!same_path(&a, &b));
    }
}
