//! Shared read and validation helpers for the service.

use super::RegistryService;
use crate::adapters::codec::RecordCodec;
use crate::domain::entities::{Case, RegistryMetadata};
use crate::domain::errors::RegistryError;
use crate::domain::identity::CaseId;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use serde::de::DeserializeOwned;

impl<KV: KeyValueStore> RegistryService<KV> {
    /// Read and decode one record straight from the store.
    pub(crate) fn read_record<T: DeserializeOwned>(
        &self,
        key: &[u8],
    ) -> Result<Option<T>, RegistryError> {
        match self.kv_store.get(key)? {
            Some(bytes) => Ok(Some(self.codec.decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Decode every record under `prefix`, in key order.
    pub(crate) fn scan_records<T: DeserializeOwned>(
        &self,
        prefix: &[u8],
    ) -> Result<Vec<T>, RegistryError> {
        self.kv_store
            .prefix_scan(prefix)?
            .into_iter()
            .map(|(_, value)| self.codec.decode(&value).map_err(RegistryError::from))
            .collect()
    }

    pub(crate) fn read_metadata(&self) -> Result<RegistryMetadata, RegistryError> {
        self.read_record(&KeyPrefix::metadata_key())?
            .ok_or_else(|| RegistryError::Storage {
                message: "registry metadata record is missing".to_string(),
            })
    }

    pub(crate) fn read_case(&self, case_id: CaseId) -> Result<Case, RegistryError> {
        self.read_record(&KeyPrefix::case_key(case_id))?
            .ok_or(RegistryError::CaseNotFound { case_id })
    }

    /// Reject text longer than `max_text_len` bytes.
    pub(crate) fn check_text_len(&self, field: &str, value: &str) -> Result<(), RegistryError> {
        let limit = self.config.max_text_len;
        if value.len() > limit {
            return Err(RegistryError::invalid(format!(
                "{field} is {} bytes, limit is {limit}",
                value.len()
            )));
        }
        Ok(())
    }

    /// Reject empty or oversized text.
    pub(crate) fn check_required_text(&self, field: &str, value: &str) -> Result<(), RegistryError> {
        if value.is_empty() {
            return Err(RegistryError::invalid(format!("{field} must not be empty")));
        }
        self.check_text_len(field, value)
    }

    pub(crate) fn commit(&mut self, batch: Vec<BatchOperation>) -> Result<(), RegistryError> {
        self.kv_store.atomic_batch_write(batch)?;
        Ok(())
    }
}
