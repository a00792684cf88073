//! # E-Vault Case Registry
//!
//! Authoritative registry of legal cases, the participants listed on them
//! (judges, lawyers, clients) and the content-hash references of documents
//! attached to each case. File content lives outside the registry.
//!
//! ## Roles
//!
//! ```text
//! admin ──add_judge/add_lawyer/add_client──→ participants
//!   │
//!   └────create_case(judges, clients, lawyers)──→ case ←──add_document── judge | lawyer
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Admin Gate | Only the admin registers participants and opens cases |
//! | 2 | Referential Integrity | Every listed identity is registered in its role |
//! | 3 | Monotonic Case Ids | First case is 1, +1 per success, never reused |
//! | 4 | Back-References | A participant lists case N exactly once iff it is on case N |
//! | 5 | Document Gate | Only judges and lawyers of a case attach documents |
//! | 6 | Atomic Calls | A call commits all of its writes or none |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Records, keys, access predicates, errors
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `service/` - Application service implementing the API
//! - `adapters/` - In-memory, file and RocksDB stores; bincode codec
//! - `config` - `RegistryConfig`
//!
//! ## Usage
//!
//! ```ignore
//! use ev_registry::{CaseRegistryApi, InMemoryKVStore, NewCase, RegistryConfig, RegistryService};
//!
//! let mut registry = RegistryService::new(InMemoryKVStore::new(), RegistryConfig::new(admin))?;
//! registry.add_judge(admin, judge, "Hon. Ada Park".into())?;
//! let case_id = registry.create_case(admin, NewCase::new("Doe v. Roe", "").with_judges([judge]))?;
//! let index = registry.add_document(judge, case_id, "Qm...".into(), "Complaint".into())?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{BincodeCodec, FileBackedKVStore, InMemoryKVStore, RecordCodec};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use config::{ConfigError, RegistryConfig};
pub use domain::access::{require_admin, require_case_participant, AccessTier};
pub use domain::entities::{Case, Document, NewCase, Participant, RegistryMetadata};
pub use domain::errors::{CodecError, ErrorKind, KVStoreError, RegistryError};
pub use domain::identity::{CaseId, DocumentIndex, Identity, IdentityParseError, ParticipantKind};
pub use domain::keys::KeyPrefix;
pub use ports::inbound::CaseRegistryApi;
pub use ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
pub use service::RegistryService;
