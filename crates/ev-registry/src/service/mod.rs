//! # Registry Service
//!
//! The service implementing `CaseRegistryApi` over any `KeyValueStore`.
//!
//! ## Architecture
//!
//! Every operation:
//! 1. Checks the caller against the access predicate for the operation
//! 2. Validates its input against the stored records
//! 3. Stages its writes in a `WriteSet` (read-your-writes within the call)
//! 4. Commits the write set as one `atomic_batch_write`
//!
//! A failure in any step returns before step 4, so the store is unchanged.

mod api;
mod cases;
mod documents;
mod helpers;
mod participants;
mod write_set;
#[cfg(test)]
mod tests;

use crate::adapters::codec::BincodeCodec;
use crate::config::RegistryConfig;
use crate::domain::entities::RegistryMetadata;
use crate::domain::errors::RegistryError;
use crate::domain::identity::Identity;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::KeyValueStore;
use tracing::{debug, info};
use write_set::WriteSet;

/// The E-Vault case registry.
///
/// Holds no in-memory copy of registry state; every call reads through to
/// the store, so there is nothing to roll back when a call fails.
pub struct RegistryService<KV: KeyValueStore> {
    /// Key-value store holding all records.
    pub(crate) kv_store: KV,
    /// Service configuration.
    pub(crate) config: RegistryConfig,
    /// Record codec for read-only paths.
    pub(crate) codec: BincodeCodec,
}

impl<KV: KeyValueStore> RegistryService<KV> {
    /// Create the service over `kv_store`.
    ///
    /// On an empty store this writes the initial metadata record. On an
    /// existing store the recorded admin must equal `config.admin`.
    ///
    /// ## Errors
    ///
    /// - `InvalidInput`: invalid config, or the store belongs to another admin
    /// - `Storage`/`Serialization`: the metadata record cannot be read or written
    pub fn new(mut kv_store: KV, config: RegistryConfig) -> Result<Self, RegistryError> {
        config
            .validate()
            .map_err(|e| RegistryError::invalid(e.to_string()))?;

        let existing: Option<RegistryMetadata> =
            WriteSet::new(&kv_store).load(&KeyPrefix::metadata_key())?;

        match existing {
            Some(metadata) if metadata.admin != config.admin => {
                return Err(RegistryError::invalid(format!(
                    "store was created for admin {}, not {}",
                    metadata.admin, config.admin
                )));
            }
            Some(metadata) => {
                debug!(
                    admin = %metadata.admin,
                    cases = metadata.case_count(),
                    "Reopened registry store"
                );
            }
            None => {
                let mut ws = WriteSet::new(&kv_store);
                ws.stage(
                    KeyPrefix::metadata_key(),
                    &RegistryMetadata::new(config.admin),
                )?;
                let batch = ws.into_batch();
                kv_store.atomic_batch_write(batch)?;
                info!(admin = %config.admin, "Initialized registry store");
            }
        }

        Ok(Self {
            kv_store,
            config,
            codec: BincodeCodec,
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn admin(&self) -> Identity {
        self.config.admin
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &KV {
        &self.kv_store
    }

    /// Consume the service and return its store.
    pub fn into_store(self) -> KV {
        self.kv_store
    }
}
