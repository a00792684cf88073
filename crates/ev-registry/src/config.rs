//! # Registry Configuration

use crate::domain::identity::Identity;
use thiserror::Error;

/// Configuration for a registry instance.
///
/// `admin` is fixed for the lifetime of the instance; there is no rotation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// The only identity allowed to register participants and open cases.
    pub admin: Identity,

    /// Maximum byte length of names, descriptions and document hashes
    /// (default: 4096).
    pub max_text_len: usize,
}

impl RegistryConfig {
    pub const DEFAULT_MAX_TEXT_LEN: usize = 4096;

    pub fn new(admin: Identity) -> Self {
        Self {
            admin,
            max_text_len: Self::DEFAULT_MAX_TEXT_LEN,
        }
    }

    /// Set the maximum text length.
    pub fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.is_zero() {
            return Err(ConfigError::NullAdmin);
        }
        if self.max_text_len == 0 {
            return Err(ConfigError::ZeroTextLimit);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("admin identity must not be the null identity")]
    NullAdmin,

    #[error("max_text_len must be greater than zero")]
    ZeroTextLimit,
}
