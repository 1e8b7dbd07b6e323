//! Content hashing.
//!
//! Streams a file through a digest in fixed-size chunks and renders the result as
//! uppercase hex. The chunk size only affects performance, never the result.

use md5::Md5;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use super::FileOps;
use crate::errors::{FileOpsError, Result};
use crate::events::FsEvent;

/// Supported digests. MD5 is the default (128-bit output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
    Blake3,
}

impl DigestAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    /// Raw digest length in bytes; the hex string is twice as long.
    pub fn output_len(self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha256 | DigestAlgorithm::Blake3 => 32,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = FileOpsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "md5" => Ok(DigestAlgorithm::Md5),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "blake3" => Ok(DigestAlgorithm::Blake3),
            _ => Err(FileOpsError::DigestUnavailable(s.trim().to_string())),
        }
    }
}

/// Running digest state.
enum Accumulator {
    Md5(Md5),
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl Accumulator {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Md5 => Accumulator::Md5(Md5::new()),
            DigestAlgorithm::Sha256 => Accumulator::Sha256(Sha256::new()),
            DigestAlgorithm::Blake3 => Accumulator::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Accumulator::Md5(h) => h.update(chunk),
            Accumulator::Sha256(h) => h.update(chunk),
            Accumulator::Blake3(h) => {
                h.update(chunk);
            }
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            Accumulator::Md5(h) => h.finalize().to_vec(),
            Accumulator::Sha256(h) => h.finalize().to_vec(),
            Accumulator::Blake3(h) => h.finalize().as_bytes().to_vec(),
        }
    }
}

/// Digest everything `reader` yields, reading `chunk_size` bytes at a time.
/// Returns uppercase hex, high nibble first.
pub fn hash_reader<R: Read + ?Sized>(
    reader: &mut R,
    algorithm: DigestAlgorithm,
    chunk_size: usize,
) -> io::Result<String> {
    let mut acc = Accumulator::new(algorithm);
    let mut buf = vec![0u8; chunk_size.max(1)];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => acc.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(hex::encode_upper(acc.finalize()))
}

impl FileOps {
    /// Hash the whole content of `path` with the configured digest and chunk size.
    pub fn hash_of(&self, path: &Path) -> Result<String> {
        self.hash_of_with(path, self.digest, self.chunk_size)
    }

    pub fn hash_of_with(
        &self,
        path: &Path,
        algorithm: DigestAlgorithm,
        chunk_size: usize,
    ) -> Result<String> {
        self.emit(FsEvent::HashStarted {
            path: path.to_path_buf(),
        });

        let file = File::open(path).map_err(|e| FileOpsError::access("open for hashing", path, e))?;
        let mut file = self.scoped(file, format!("hash input {}", path.display()));
        let hash = hash_reader(&mut *file, algorithm, chunk_size)
            .map_err(|e| FileOpsError::access("read for hashing", path, e))?;

        self.emit(FsEvent::Hashed {
            path: path.to_path_buf(),
            algorithm,
            hash: hash.clone(),
        });
        Ok(hash)
    }
}
