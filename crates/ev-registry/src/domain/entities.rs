//! # Domain Entities
//!
//! Records persisted by the registry.
//!
//! - `Participant` - a registered judge, lawyer or client
//! - `Case` - a named matter with its membership and document counter
//! - `Document` - a content-hash reference attached to a case
//! - `RegistryMetadata` - allocator and collection counters

use super::identity::{CaseId, DocumentIndex, Identity, ParticipantKind};
use serde::{Deserialize, Serialize};

/// A registered judge, lawyer or client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identity, unique within `kind`.
    pub identity: Identity,
    /// Collection this record belongs to.
    pub kind: ParticipantKind,
    /// Display name (never empty).
    pub name: String,
    /// Cases this participant was listed on, in creation order.
    pub case_ids: Vec<CaseId>,
    /// Zero-based registration position within `kind`.
    pub ordinal: u64,
}

impl Participant {
    pub fn new(kind: ParticipantKind, identity: Identity, name: String, ordinal: u64) -> Self {
        Self {
            identity,
            kind,
            name,
            case_ids: Vec::new(),
            ordinal,
        }
    }

    /// Records membership in `case_id`. Case ids are never reused, so a
    /// participant is listed on each case exactly once.
    pub(crate) fn append_case_id(&mut self, case_id: CaseId) {
        debug_assert!(!self.case_ids.contains(&case_id));
        self.case_ids.push(case_id);
    }
}

/// A case and its membership.
///
/// Documents are stored as separate records; `document_count` is the number
/// recorded so far and the index the next one receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub case_id: CaseId,
    pub name: String,
    pub description: String,
    pub judges: Vec<Identity>,
    pub lawyers: Vec<Identity>,
    pub clients: Vec<Identity>,
    pub document_count: u64,
}

impl Case {
    /// Membership list for one role.
    #[must_use]
    pub fn members(&self, kind: ParticipantKind) -> &[Identity] {
        match kind {
            ParticipantKind::Judge => &self.judges,
            ParticipantKind::Lawyer => &self.lawyers,
            ParticipantKind::Client => &self.clients,
        }
    }

    #[must_use]
    pub fn is_judge(&self, identity: &Identity) -> bool {
        self.judges.contains(identity)
    }

    #[must_use]
    pub fn is_lawyer(&self, identity: &Identity) -> bool {
        self.lawyers.contains(identity)
    }

    #[must_use]
    pub fn is_client(&self, identity: &Identity) -> bool {
        self.clients.contains(identity)
    }
}

/// Input to `create_case`. Lists are in the same order as the operation's
/// positional arguments: judges, clients, lawyers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCase {
    pub name: String,
    pub description: String,
    pub judges: Vec<Identity>,
    pub clients: Vec<Identity>,
    pub lawyers: Vec<Identity>,
}

impl NewCase {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_judges(mut self, judges: impl IntoIterator<Item = Identity>) -> Self {
        self.judges = judges.into_iter().collect();
        self
    }

    pub fn with_clients(mut self, clients: impl IntoIterator<Item = Identity>) -> Self {
        self.clients = clients.into_iter().collect();
        self
    }

    pub fn with_lawyers(mut self, lawyers: impl IntoIterator<Item = Identity>) -> Self {
        self.lawyers = lawyers.into_iter().collect();
        self
    }

    /// Requested membership list for one role.
    #[must_use]
    pub fn members(&self, kind: ParticipantKind) -> &[Identity] {
        match kind {
            ParticipantKind::Judge => &self.judges,
            ParticipantKind::Lawyer => &self.lawyers,
            ParticipantKind::Client => &self.clients,
        }
    }
}

/// A document reference. The content itself lives outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub case_id: CaseId,
    pub index: DocumentIndex,
    /// Opaque content hash, only checked for non-emptiness.
    pub document_hash: String,
    pub description: String,
    pub uploader: Identity,
}

/// Registry-wide counters, stored under `m:metadata`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryMetadata {
    /// Admin the store was created with. Reopening with another admin fails.
    pub admin: Identity,
    /// Identifier the next successful `create_case` receives.
    pub next_case_id: CaseId,
    pub judge_count: u64,
    pub lawyer_count: u64,
    pub client_count: u64,
}

impl RegistryMetadata {
    /// First case receives id 1.
    pub const FIRST_CASE_ID: CaseId = 1;

    pub fn new(admin: Identity) -> Self {
        Self {
            admin,
            next_case_id: Self::FIRST_CASE_ID,
            judge_count: 0,
            lawyer_count: 0,
            client_count: 0,
        }
    }

    /// Number of cases created so far.
    #[must_use]
    pub fn case_count(&self) -> u64 {
        self.next_case_id - Self::FIRST_CASE_ID
    }

    #[must_use]
    pub fn participant_count(&self, kind: ParticipantKind) -> u64 {
        match kind {
            ParticipantKind::Judge => self.judge_count,
            ParticipantKind::Lawyer => self.lawyer_count,
            ParticipantKind::Client => self.client_count,
        }
    }

    pub(crate) fn participant_count_mut(&mut self, kind: ParticipantKind) -> &mut u64 {
        match kind {
            ParticipantKind::Judge => &mut self.judge_count,
            ParticipantKind::Lawyer => &mut self.lawyer_count,
            ParticipantKind::Client => &mut self.client_count,
        }
    }
}
