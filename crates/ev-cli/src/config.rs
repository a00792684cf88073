//! # CLI Configuration
//!
//! Settings come from an optional TOML file, overridden by flags and
//! environment variables.
//!
//! ```toml
//! admin = "0xadadadadadadadadadadadadadadadadadadadad"
//! data_file = "/var/lib/evault/registry.db"
//! max_text_len = 4096
//! ```

use anyhow::{anyhow, Context, Result};
use ev_registry::{Identity, RegistryConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "evault.db";

/// Config file contents; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    admin: Option<String>,
    data_file: Option<PathBuf>,
    max_text_len: Option<usize>,
}

/// Settings as read from a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileSettings {
    pub admin: Option<Identity>,
    pub data_file: Option<PathBuf>,
    pub max_text_len: Option<usize>,
}

impl FileSettings {
    /// Load settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parse settings from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let admin = file
            .admin
            .map(|raw| raw.parse::<Identity>())
            .transpose()
            .context("invalid admin identity")?;
        Ok(Self {
            admin,
            data_file: file.data_file,
            max_text_len: file.max_text_len,
        })
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub admin: Identity,
    pub data_file: PathBuf,
    pub max_text_len: usize,
}

impl Settings {
    /// Merge flag overrides over file settings. Flags win.
    pub fn resolve(
        file: FileSettings,
        admin: Option<Identity>,
        data_file: Option<PathBuf>,
    ) -> Result<Self> {
        let admin = admin
            .or(file.admin)
            .ok_or_else(|| anyhow!("no admin identity: set `admin` in the config file or pass --admin"))?;
        Ok(Self {
            admin,
            data_file: data_file
                .or(file.data_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            max_text_len: file
                .max_text_len
                .unwrap_or(RegistryConfig::DEFAULT_MAX_TEXT_LEN),
        })
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig::new(self.admin).with_max_text_len(self.max_text_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_HEX: &str = "0xadadadadadadadadadadadadadadadadadadadad";

    #[test]
    fn test_parse_full_file() {
        let settings = FileSettings::parse(&format!(
            "admin = \"{ADMIN_HEX}\"\ndata_file = \"/tmp/registry.db\"\nmax_text_len = 512\n"
        ))
        .unwrap();
        assert_eq!(settings.admin, Some(Identity::new([0xAD; 20])));
        assert_eq!(settings.data_file, Some(PathBuf::from("/tmp/registry.db")));
        assert_eq!(settings.max_text_len, Some(512));
    }

    #[test]
    fn test_parse_empty_file() {
        assert_eq!(FileSettings::parse("").unwrap(), FileSettings::default());
    }

    #[test]
    fn test_bad_admin_rejected() {
        assert!(FileSettings::parse("admin = \"0x1234\"").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileSettings::parse("admn = \"0x00\"").is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileSettings {
            admin: Some(Identity::new([0xAD; 20])),
            data_file: Some(PathBuf::from("from-file.db")),
            max_text_len: None,
        };
        let settings = Settings::resolve(
            file,
            Some(Identity::new([0x01; 20])),
            Some(PathBuf::from("from-flag.db")),
        )
        .unwrap();
        assert_eq!(settings.admin, Identity::new([0x01; 20]));
        assert_eq!(settings.data_file, PathBuf::from("from-flag.db"));
        assert_eq!(settings.max_text_len, RegistryConfig::DEFAULT_MAX_TEXT_LEN);
    }

    #[test]
    fn test_missing_admin_is_an_error() {
        assert!(Settings::resolve(FileSettings::default(), None, None).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("evault.toml");
        fs::write(&path, format!("admin = \"{ADMIN_HEX}\"\n")).unwrap();

        let settings = FileSettings::load(&path).unwrap();
        assert_eq!(settings.admin, Some(Identity::new([0xAD; 20])));
        assert!(settings.data_file.is_none());
    }
}
