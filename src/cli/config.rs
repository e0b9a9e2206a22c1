use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::RestrictorError;

/// Which policy store the shell manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Windows Defender Firewall through netsh
    #[default]
    Netsh,
    /// In-process store, for dry runs
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct StoreConfig {
    pub backend: Option<Backend>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct RulesConfig {
    /// Prefix of created rule names
    pub prefix: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct SelectionConfig {
    /// Extension of selectable programs, without the dot
    pub extension: Option<String>,
}

impl ConfigFile {
    /// Load configuration file
    pub fn load(path: &Path) -> Result<Self, RestrictorError> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| RestrictorError::ConfigParse {
            path: PathBuf::from(path),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_full_config() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            r#"
[store]
backend = "memory"

[rules]
prefix = "Offline"

[selection]
extension = "bin"
"#
        )
        .unwrap();

        let config = ConfigFile::load(tmp.path()).unwrap();
        assert_eq!(config.store.backend, Some(Backend::Memory));
        assert_eq!(config.rules.prefix.as_deref(), Some("Offline"));
        assert_eq!(config.selection.extension.as_deref(), Some("bin"));
    }

    #[test]
    fn load_empty_config() {
        let tmp = tempfile::NamedTempFile::new().unwrap();

        let config = ConfigFile::load(tmp.path()).unwrap();
        assert_eq!(config.store.backend, None);
        assert_eq!(config.rules.prefix, None);
        assert_eq!(config.selection.extension, None);
    }

    #[test]
    fn unknown_backend_is_parse_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[store]\nbackend = \"iptables\"\n").unwrap();

        let result = ConfigFile::load(tmp.path());
        assert!(matches!(result, Err(RestrictorError::ConfigParse { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = ConfigFile::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(RestrictorError::Io(_))));
    }
}
