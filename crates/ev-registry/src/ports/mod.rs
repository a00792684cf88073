//! # Ports
//!
//! - `inbound` - `CaseRegistryApi`, implemented by `RegistryService`
//! - `outbound` - `KeyValueStore`, implemented by the storage adapters

pub mod inbound;
pub mod outbound;

pub use inbound::CaseRegistryApi;
pub use outbound::{BatchOperation, KeyValueStore, ScanResult};
