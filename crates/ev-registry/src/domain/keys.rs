//! # Key Layout
//!
//! All registry records share one key-value namespace, separated by prefix.

use super::identity::{CaseId, DocumentIndex, Identity, ParticipantKind};

/// Key prefixes for the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Judge records: `j:{identity}` -> Participant
    Judge,
    /// Lawyer records: `l:{identity}` -> Participant
    Lawyer,
    /// Client records: `c:{identity}` -> Participant
    Client,
    /// Case records: `k:{case_id}` -> Case
    Case,
    /// Document records: `d:{case_id}{index}` -> Document
    Document,
    /// Registry metadata: `m:metadata` -> RegistryMetadata
    Metadata,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Judge => b"j:",
            KeyPrefix::Lawyer => b"l:",
            KeyPrefix::Client => b"c:",
            KeyPrefix::Case => b"k:",
            KeyPrefix::Document => b"d:",
            KeyPrefix::Metadata => b"m:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// Prefix of the collection holding `kind`.
    pub fn for_kind(kind: ParticipantKind) -> Self {
        match kind {
            ParticipantKind::Judge => KeyPrefix::Judge,
            ParticipantKind::Lawyer => KeyPrefix::Lawyer,
            ParticipantKind::Client => KeyPrefix::Client,
        }
    }

    pub fn participant_key(kind: ParticipantKind, identity: &Identity) -> Vec<u8> {
        Self::for_kind(kind).key(identity.as_bytes())
    }

    /// Case ids are big-endian so a prefix scan returns them in order.
    pub fn case_key(case_id: CaseId) -> Vec<u8> {
        KeyPrefix::Case.key(&case_id.to_be_bytes())
    }

    /// Prefix shared by every document of `case_id`.
    pub fn case_documents_prefix(case_id: CaseId) -> Vec<u8> {
        KeyPrefix::Document.key(&case_id.to_be_bytes())
    }

    pub fn document_key(case_id: CaseId, index: DocumentIndex) -> Vec<u8> {
        let mut key = Self::case_documents_prefix(case_id);
        key.extend_from_slice(&index.to_be_bytes());
        key
    }

    pub fn metadata_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(b"metadata")
    }
}
