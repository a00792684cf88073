//! # Adapters
//!
//! Implementations of the outbound ports.
//!
//! - `memory` - `InMemoryKVStore`
//! - `file` - `FileBackedKVStore`, single-file persistence
//! - `rocksdb` - `RocksDbStore` (feature `rocksdb`)
//! - `codec` - bincode record encoding

pub mod codec;
pub mod file;
pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocksdb;

pub use codec::{BincodeCodec, RecordCodec};
pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use self::rocksdb::{RocksDbConfig, RocksDbStore};
