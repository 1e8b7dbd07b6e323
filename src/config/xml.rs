//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Unknown elements are rejected so typos surface instead of being ignored.
//! - Values are trimmed; an empty `log_file` means "no file logging".
//!
//! Lookup order: explicit path (CLI), then $FILEOPS_CONFIG, then the OS default path
//! if a file exists there. With none of those, defaults apply.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::CONFIG_ENV;
use super::paths::default_config_path;
use super::types::{Config, LogLevel};
use crate::fs_ops::{DigestAlgorithm, DurabilityMode};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    digest: Option<String>,
    chunk_size: Option<String>,
    sync_copies: Option<String>,
}

fn trimmed(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config, validating every present value.
fn xml_to_config(parsed: &XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = trimmed(&parsed.log_level) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    cfg.log_file = trimmed(&parsed.log_file).map(PathBuf::from);
    if let Some(s) = trimmed(&parsed.digest) {
        cfg.digest = s.parse::<DigestAlgorithm>()?;
    }
    if let Some(s) = trimmed(&parsed.chunk_size) {
        let n: usize = s
            .parse()
            .with_context(|| format!("chunk_size must be a positive integer, got '{s}'"))?;
        if n == 0 {
            bail!("chunk_size must be greater than zero");
        }
        cfg.chunk_size = n;
    }
    if let Some(s) = trimmed(&parsed.sync_copies) {
        cfg.durability = match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => DurabilityMode::Full,
            "false" | "no" | "0" => DurabilityMode::Data,
            other => bail!("sync_copies must be true or false, got '{other}'"),
        };
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(&parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Pick the config file to read, if any.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(p));
    }
    default_config_path().filter(|p| p.is_file())
}

/// Resolve and load the config. Returns the file used alongside the settings.
/// An explicitly named file (flag or env) must exist; the default one is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    match resolve_config_path(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "Loading config");
            let cfg = load_config_from_xml_path(&path)?;
            Ok((cfg, Some(path)))
        }
        None => Ok((Config::default(), None)),
    }
}
