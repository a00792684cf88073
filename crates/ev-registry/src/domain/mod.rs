//! # Domain Layer
//!
//! Pure registry logic. No I/O.
//!
//! ## Modules
//!
//! - `identity` - `Identity`, `ParticipantKind`, id aliases
//! - `entities` - persisted records
//! - `keys` - key-value layout
//! - `access` - authorization predicates
//! - `errors` - error taxonomy

pub mod access;
pub mod entities;
pub mod errors;
pub mod identity;
pub mod keys;

pub use access::{require_admin, require_case_participant, AccessTier};
pub use entities::{Case, Document, NewCase, Participant, RegistryMetadata};
pub use errors::{CodecError, ErrorKind, KVStoreError, RegistryError};
pub use identity::{CaseId, DocumentIndex, Identity, IdentityParseError, ParticipantKind};
pub use keys::KeyPrefix;
