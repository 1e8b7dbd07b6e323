//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Global flags may appear before or after the subcommand.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Careful file operations from the command line.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Hash, copy, move and clean up files safely")]
pub struct Args {
    /// Config file to read instead of $FILEOPS_CONFIG or the default location.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Also write logs to this file.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the uppercase hex digest of a file.
    Hash {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
        /// md5 (default), sha256 or blake3.
        #[arg(short = 'a', long)]
        algorithm: Option<String>,
        /// Read size in bytes.
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// Copy SRC to DEST, creating DEST's directory.
    Copy {
        #[arg(value_hint = ValueHint::FilePath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dest: PathBuf,
    },
    /// Move SRC to DEST, falling back to copy+delete across filesystems.
    Move {
        #[arg(value_hint = ValueHint::FilePath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dest: PathBuf,
    },
    /// Rename SRC to DEST without fallback.
    Rename {
        #[arg(value_hint = ValueHint::FilePath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dest: PathBuf,
    },
    /// Create a directory and its ancestors.
    Mkdir {
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
        /// Create PATH's parent instead of PATH itself.
        #[arg(long)]
        parent: bool,
    },
    /// Delete a file or empty directory; a missing path is not an error.
    Rm {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// Create an empty, uniquely named file and print its path.
    Tempfile {
        #[arg(long, default_value = "tmp")]
        prefix: String,
        #[arg(long, default_value = ".tmp")]
        suffix: String,
        /// Directory to create the file in (created if missing). Defaults to the system temp dir.
        #[arg(long, value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },
    /// Print which config file would be used, then exit.
    PrintConfig,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Command::Hash {
            chunk_size: Some(n),
            ..
        } = self.command
        {
            cfg.chunk_size = n.max(1);
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::parse_from(["fileops", "rm", "/tmp/x", "--debug", "--json"]);
        assert!(args.debug);
        assert!(args.json);
        assert_eq!(
            args.command,
            Command::Rm {
                path: PathBuf::from("/tmp/x")
            }
        );
    }

    #[test]
    fn effective_log_level_precedence() {
        let args = Args::parse_from(["fileops", "--debug", "--log-level", "quiet", "print-config"]);
        assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));

        let args = Args::parse_from(["fileops", "--log-level", "info", "print-config"]);
        assert_eq!(args.effective_log_level(), Some(LogLevel::Info));
    }

    #[test]
    fn apply_overrides_sets_fields() {
        let args = Args::parse_from([
            "fileops",
            "--log-level",
            "quiet",
            "--log-file",
            "/var/log/fileops.log",
            "hash",
            "--chunk-size",
            "1024",
            "f.bin",
        ]);
        let mut cfg = Config::default();
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.log_level, LogLevel::Quiet);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log/fileops.log")));
        assert_eq!(cfg.chunk_size, 1024);
    }

    #[test]
    fn tempfile_defaults() {
        let args = Args::parse_from(["fileops", "tempfile"]);
        assert_eq!(
            args.command,
            Command::Tempfile {
                prefix: "tmp".into(),
                suffix: ".tmp".into(),
                dir: None
            }
        );
    }
}
