use crate::{
    engine::lifecycle::DEFAULT_EXTENSION,
    error::RestrictorError,
    rule::DEFAULT_PREFIX,
};

use super::args::Args;
use super::config::{Backend, ConfigFile};

/// Effective settings after merging defaults, config file and CLI flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: Backend,
    pub prefix: String,
    pub extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Load and merge settings from command line arguments and config file
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings; command line flags override the config file
    pub fn load(args: &Args) -> Result<Settings, RestrictorError> {
        let mut settings = Settings::default();

        if let Some(config_path) = args.config.as_ref() {
            let config = ConfigFile::load(config_path)?;
            if let Some(backend) = config.store.backend {
                settings.backend = backend;
            }
            if let Some(prefix) = config.rules.prefix {
                settings.prefix = prefix;
            }
            if let Some(extension) = config.selection.extension {
                settings.extension = extension;
            }
        }

        if let Some(backend) = args.backend {
            settings.backend = backend;
        }
        if let Some(prefix) = args.prefix.as_ref() {
            settings.prefix = prefix.clone();
        }
        if let Some(extension) = args.extension.as_ref() {
            settings.extension = extension.clone();
        }

        settings.extension = settings.extension.trim().trim_start_matches('.').to_string();
        if settings.prefix.trim().is_empty() {
            return Err(RestrictorError::InvalidConfig {
                key: "prefix".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if settings.extension.is_empty() {
            return Err(RestrictorError::InvalidConfig {
                key: "extension".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        log::debug!("Loaded settings: {settings:?}");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args() -> Args {
        Args {
            config: None,
            backend: None,
            prefix: None,
            extension: None,
        }
    }

    #[test]
    fn load_defaults() {
        let settings = SettingsLoader::load(&args()).unwrap();
        assert_eq!(settings.backend, Backend::Netsh);
        assert_eq!(settings.prefix, "Internet Restricted");
        assert_eq!(settings.extension, "exe");
    }

    #[test]
    fn cli_overrides_config_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "[store]\nbackend = \"memory\"\n[rules]\nprefix = \"Offline\"\n[selection]\nextension = \".bin\"\n"
        )
        .unwrap();

        let mut cli = args();
        cli.config = Some(tmp.path().to_path_buf());
        cli.prefix = Some("Blocked".to_string());

        let settings = SettingsLoader::load(&cli).unwrap();
        assert_eq!(settings.backend, Backend::Memory);
        assert_eq!(settings.prefix, "Blocked");
        assert_eq!(settings.extension, "bin");
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let mut cli = args();
        cli.prefix = Some("  ".to_string());

        let result = SettingsLoader::load(&cli);
        assert!(matches!(
            result,
            Err(RestrictorError::InvalidConfig { key, .. }) if key == "prefix"
        ));
    }

    #[test]
    fn empty_extension_is_rejected() {
        let mut cli = args();
        cli.extension = Some(".".to_string());

        let result = SettingsLoader::load(&cli);
        assert!(matches!(
            result,
            Err(RestrictorError::InvalidConfig { key, .. }) if key == "extension"
        ));
    }
}
