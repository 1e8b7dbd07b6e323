//! Application orchestrator.
//! Loads/merges config, initializes logging, builds the FileOps handle and dispatches
//! the requested subcommand. Results go to stdout; diagnostics go to the log.

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info};

use fileops::cli::{Args, Command};
use fileops::config::{CONFIG_ENV, default_config_path, load_config, resolve_config_path};
use fileops::output as out;
use fileops::{DigestAlgorithm, FileOps, FileOpsError, MoveOutcome};

use crate::logging::init_tracing;

/// Exit status for usage and configuration problems that carry no FileOpsError.
const EXIT_GENERAL: u8 = 2;
/// Exit status when `rm` could not delete an existing path.
const EXIT_NOT_DELETED: u8 = 1;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle print-config before logging init
    if args.command == Command::PrintConfig {
        print_config(&args);
        return Ok(ExitCode::SUCCESS);
    }

    let (mut cfg, cfg_path) = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);

    // Hold the guard until return so buffered file logs are flushed.
    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!(config = ?cfg_path, settings = ?cfg, "Starting fileops: {:?}", args.command);
    let ops = FileOps::from_config(&cfg);

    let result = dispatch(&ops, &args.command);
    if let Err(e) = &result {
        log_failure(e);
    }
    result
}

fn dispatch(ops: &FileOps, command: &Command) -> Result<ExitCode> {
    match command {
        Command::Hash {
            path, algorithm, ..
        } => {
            let algorithm = match algorithm {
                Some(name) => name.parse::<DigestAlgorithm>()?,
                None => ops.digest(),
            };
            let hash = ops.hash_of_with(path, algorithm, ops.chunk_size())?;
            out::print_user(&format!("{hash}  {}", path.display()));
        }
        Command::Copy { src, dest } => {
            let bytes = ops.copy(src, dest)?;
            info!(source = %src.display(), dest = %dest.display(), bytes, "Copy completed");
            out::print_user(&bytes.to_string());
        }
        Command::Move { src, dest } => {
            let outcome = ops.move_file(src, dest)?;
            let how = match outcome {
                MoveOutcome::Renamed => "renamed",
                MoveOutcome::CopiedAndDeleted => "copied+deleted",
                MoveOutcome::AlreadyInPlace => "unchanged",
            };
            info!(source = %src.display(), dest = %dest.display(), how, "Move completed");
            out::print_user(how);
        }
        Command::Rename { src, dest } => {
            ops.rename(src, dest)?;
            info!(source = %src.display(), dest = %dest.display(), "Rename completed");
            out::print_success(&format!("renamed '{}' -> '{}'", src.display(), dest.display()));
        }
        Command::Mkdir { path, parent } => {
            let dir = if *parent {
                ops.create_parent_directory(path)?;
                path.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."))
            } else {
                ops.create_directory(path)?;
                path.as_path()
            };
            out::print_success(&format!("directory '{}' exists", dir.display()));
        }
        Command::Rm { path } => {
            if !ops.delete(path) {
                out::print_error(&format!("Could not delete '{}'", path.display()));
                return Ok(ExitCode::from(EXIT_NOT_DELETED));
            }
        }
        Command::Tempfile {
            prefix,
            suffix,
            dir,
        } => {
            let path = ops.create_temp_file(prefix, suffix, dir.as_deref())?;
            out::print_user(&path.display().to_string());
        }
        // Answered in run() before logging starts.
        Command::PrintConfig => {}
    }
    Ok(ExitCode::SUCCESS)
}

fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<FileOpsError>() {
        Some(fe) => error!(code = fe.code(), kind = fe.kind(), error = %fe, "Operation failed"),
        None => error!(error = %format!("{e:#}"), "Operation failed"),
    }
}

fn print_config(args: &Args) {
    match resolve_config_path(args.config.as_deref()) {
        Some(p) if args.config.is_some() => {
            out::print_info(&format!("Using config from --config:\n  {}", p.display()))
        }
        Some(p) if std::env::var_os(CONFIG_ENV).is_some_and(|v| !v.is_empty()) => {
            out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}", p.display()));
            out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        }
        Some(p) => out::print_info(&format!("Using default config file:\n  {}", p.display())),
        None => print_config_paths(),
    }
}

fn print_config_paths() {
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default fileops config path:\n  {}", p.display()));
            out::print_info("No config file exists there yet; built-in defaults apply.");
        }
        None => out::print_error("Could not determine a default config path"),
    }
}

/// Map an error to the process exit status: FileOpsError codes, else a general failure.
pub fn exit_code(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<FileOpsError>()
        .map(FileOpsError::code)
        .unwrap_or(EXIT_GENERAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_prefers_typed_errors() {
        let typed: anyhow::Error = FileOpsError::DigestUnavailable("crc".into()).into();
        assert_eq!(exit_code(&typed), 20);

        let other = anyhow::anyhow!("bad config");
        assert_eq!(exit_code(&other), EXIT_GENERAL);

        let wrapped = anyhow::Error::from(FileOpsError::SameFile {
            src: "/a".into(),
            dest: "/a".into(),
        })
        .context("copy");
        assert_eq!(exit_code(&wrapped), 13);
    }
}
