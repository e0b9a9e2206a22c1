use thiserror::Error;

use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum RestrictorError {
    #[error("firewall policy store is unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("firewall policy store rejected rule '{rule}': {reason}")]
    StoreWrite { rule: String, reason: String },

    #[error("invalid file path or file is not an executable: {path} ({reason})")]
    InvalidInput { path: String, reason: String },

    #[error("no file was selected")]
    NoSelection,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },
}
