//! Whole-file copy.
//!
//! Features:
//! - Creates the destination's parent directory, then truncates or creates the destination.
//! - Linux: in-kernel `copy_file_range`; falls back to buffered streaming when the
//!   filesystem pair does not support it.
//! - Optional fsync of the destination before the handles are released.
//! - Both handles are scope-guarded and released in reverse order of acquisition.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes appended
//! concurrently may or may not be included. A failure partway leaves a partial
//! destination behind; callers that care (move) clean it up.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use super::FileOps;
use super::util::same_file;
use crate::errors::{FileOpsError, Result};
use crate::events::FsEvent;
use crate::release::Scoped;

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Data reaches the OS page cache (`flush`) but no disk barrier is forced.
    Data,
    /// Data and metadata are forced to stable storage (`sync_all`).
    #[default]
    Full,
}

impl FileOps {
    /// Copy the full content of `src` into `dest`. Returns the number of bytes copied.
    pub fn copy(&self, src: &Path, dest: &Path) -> Result<u64> {
        if same_file(src, dest) {
            return Err(FileOpsError::SameFile {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
            });
        }
        self.create_parent_directory(dest)?;

        let input =
            File::open(src).map_err(|e| FileOpsError::access("open for reading", src, e))?;
        let input = self.scoped(input, format!("copy source {}", src.display()));

        let output = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(dest)
            .map_err(|e| FileOpsError::access("open for writing", dest, e))?;
        let output = self.scoped(output, format!("copy destination {}", dest.display()));

        let bytes = transfer(input, output, self.durability)
            .map_err(|e| FileOpsError::access("copy into", dest, e))?;

        self.emit(FsEvent::Copied {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            bytes,
        });
        Ok(bytes)
    }
}

/// Move every byte from `input` to `output`, consuming both guards.
fn transfer(input: Scoped<'_, File>, output: Scoped<'_, File>, mode: DurabilityMode) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        if let Some(bytes) = kernel_copy(&input, &output)? {
            if matches!(mode, DurabilityMode::Full) {
                output.sync_all()?;
            }
            return Ok(bytes);
        }
    }

    // Streaming fallback (or non-Linux default). Declared in acquisition order so the
    // writer is flushed and released before the reader.
    let mut reader = input.map(|f| BufReader::with_capacity(BUF_SIZE, f));
    let mut writer = output.map(|f| BufWriter::with_capacity(BUF_SIZE, f));
    let bytes = io::copy(&mut *reader, &mut *writer)?;
    writer.flush()?;

    if matches!(mode, DurabilityMode::Full) {
        writer.get_ref().sync_all()?;
    }
    Ok(bytes)
}

/// In-kernel copy. `Ok(None)` means nothing was written (unsupported here, or no
/// bytes on the first call), so the caller can stream instead.
#[cfg(target_os = "linux")]
fn kernel_copy(input: &File, output: &File) -> io::Result<Option<u64>> {
    use std::os::unix::io::AsRawFd;

    const CHUNK: usize = 16 * 1024 * 1024; // 16 MiB per call
    let mut total: u64 = 0;
    loop {
        // SAFETY: both descriptors are owned by live Files; null offsets use and
        // advance the file positions.
        let rc = unsafe {
            libc::copy_file_range(
                input.as_raw_fd(),
                std::ptr::null_mut(),
                output.as_raw_fd(),
                std::ptr::null_mut(),
                CHUNK,
                0,
            )
        };
        if rc > 0 {
            total += rc as u64;
            continue;
        }
        if rc == 0 {
            // EOF on the first call is ambiguous: some kernels report 0 for pseudo
            // files (procfs, sysfs) that do have content. Let the stream decide.
            return Ok((total > 0).then_some(total));
        }

        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            continue;
        }
        let unsupported = matches!(
            err.raw_os_error(),
            Some(libc::EXDEV | libc::ENOSYS | libc::EINVAL | libc::EPERM | libc::EOPNOTSUPP)
        );
        return if unsupported && total == 0 {
            Ok(None)
        } else {
            Err(err)
        };
    }
}
