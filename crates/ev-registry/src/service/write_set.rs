//! # Staged Writes
//!
//! A `WriteSet` collects every write of one registry call. Reads go through
//! the staged writes first, so later steps of a call see earlier ones. The
//! store itself is untouched until the set is turned into a single atomic
//! batch; dropping the set (any early `?` return) discards the call.

use crate::adapters::codec::{BincodeCodec, RecordCodec};
use crate::domain::entities::RegistryMetadata;
use crate::domain::errors::RegistryError;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

pub(crate) struct WriteSet<'a, KV: KeyValueStore> {
    store: &'a KV,
    codec: BincodeCodec,
    pending: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl<'a, KV: KeyValueStore> WriteSet<'a, KV> {
    pub(crate) fn new(store: &'a KV) -> Self {
        Self {
            store,
            codec: BincodeCodec,
            pending: BTreeMap::new(),
        }
    }

    /// Read a record, preferring a value staged earlier in this call.
    pub(crate) fn load<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, RegistryError> {
        let bytes = match self.pending.get(key) {
            Some(staged) => Some(staged.clone()),
            None => self.store.get(key)?,
        };
        match bytes {
            Some(bytes) => Ok(Some(self.codec.decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn contains(&self, key: &[u8]) -> Result<bool, RegistryError> {
        if self.pending.contains_key(key) {
            return Ok(true);
        }
        Ok(self.store.exists(key)?)
    }

    /// Stage `record` under `key`, replacing anything staged there before.
    pub(crate) fn stage<T: Serialize>(&mut self, key: Vec<u8>, record: &T) -> Result<(), RegistryError> {
        let bytes = self.codec.encode(record)?;
        self.pending.insert(key, bytes);
        Ok(())
    }

    /// The metadata record. Always present once the service is constructed.
    pub(crate) fn metadata(&self) -> Result<RegistryMetadata, RegistryError> {
        self.load(&KeyPrefix::metadata_key())?
            .ok_or_else(|| RegistryError::Storage {
                message: "registry metadata record is missing".to_string(),
            })
    }

    pub(crate) fn into_batch(self) -> Vec<BatchOperation> {
        self.pending
            .into_iter()
            .map(|(key, value)| BatchOperation::put(key, value))
            .collect()
    }
}
