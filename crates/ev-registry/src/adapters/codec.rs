//! Record encoding for values written to the key-value store.

use crate::domain::errors::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes and decodes registry records.
pub trait RecordCodec {
    fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, CodecError>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// Default record codec using bincode.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeCodec;

impl RecordCodec for BincodeCodec {
    fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(record).map_err(|e| CodecError {
            message: e.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        bincode::deserialize(bytes).map_err(|e| CodecError {
            message: e.to_string(),
        })
    }
}
