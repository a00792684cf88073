//! # Domain Errors
//!
//! Every registry operation returns `RegistryError`. An error always aborts
//! the whole call: nothing staged during the call reaches the store.

use super::access::AccessTier;
use super::identity::{CaseId, DocumentIndex, Identity, ParticipantKind};
use thiserror::Error;

/// Caller-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input, including unknown referenced identities.
    Validation,
    /// Re-registration of an existing identity.
    Duplicate,
    /// Caller failed an access-control predicate.
    PermissionDenied,
    /// Lookup of a case, document or participant that does not exist.
    Reference,
    /// The storage substrate failed or returned unreadable data.
    Storage,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Duplicate => "DuplicateError",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::Reference => "ReferenceError",
            ErrorKind::Storage => "StorageError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// `create_case` referenced an identity not registered as `kind`.
    #[error("unknown {kind} {identity}: not registered")]
    UnknownParticipant {
        kind: ParticipantKind,
        identity: Identity,
    },

    #[error("{kind} {identity} is already registered")]
    DuplicateParticipant {
        kind: ParticipantKind,
        identity: Identity,
    },

    #[error("permission denied for {caller}: requires {required}")]
    PermissionDenied {
        caller: Identity,
        required: AccessTier,
    },

    #[error("case {case_id} not found")]
    CaseNotFound { case_id: CaseId },

    #[error("document {index} not found in case {case_id} ({count} recorded)")]
    DocumentNotFound {
        case_id: CaseId,
        index: DocumentIndex,
        count: u64,
    },

    #[error("{kind} {identity} not found")]
    ParticipantNotFound {
        kind: ParticipantKind,
        identity: Identity,
    },

    #[error("case identifier space exhausted")]
    CaseIdsExhausted,

    #[error("storage error: {message}")]
    Storage { message: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl RegistryError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        RegistryError::InvalidInput {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::InvalidInput { .. } | RegistryError::UnknownParticipant { .. } => {
                ErrorKind::Validation
            }
            RegistryError::DuplicateParticipant { .. } => ErrorKind::Duplicate,
            RegistryError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            RegistryError::CaseNotFound { .. }
            | RegistryError::DocumentNotFound { .. }
            | RegistryError::ParticipantNotFound { .. } => ErrorKind::Reference,
            RegistryError::CaseIdsExhausted
            | RegistryError::Storage { .. }
            | RegistryError::Serialization { .. } => ErrorKind::Storage,
        }
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
    /// Another process holds the store.
    #[error("KV store locked: {message}")]
    Locked { message: String },
}

impl From<KVStoreError> for RegistryError {
    fn from(err: KVStoreError) -> Self {
        RegistryError::Storage {
            message: err.to_string(),
        }
    }
}

/// Record encoding/decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("codec error: {message}")]
pub struct CodecError {
    pub message: String,
}

impl From<CodecError> for RegistryError {
    fn from(err: CodecError) -> Self {
        RegistryError::Serialization {
            message: err.message,
        }
    }
}
