//! Configuration.
//! Provides the runtime settings type, default paths and XML loading.
//! The operations themselves only read a few tunables from here (digest, chunk size,
//! copy durability); the rest configures logging for the command-line wrapper.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path, resolve_config_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FILEOPS_CONFIG";
