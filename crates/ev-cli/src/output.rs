//! JSON views of registry records. Identities render as `0x`-prefixed hex.

use ev_registry::{Case, CaseId, Document, DocumentIndex, Identity, Participant, RegistryError};
use serde::Serialize;

fn hex_list(ids: &[Identity]) -> Vec<String> {
    ids.iter().map(Identity::to_string).collect()
}

#[derive(Debug, Serialize)]
pub struct ParticipantView {
    pub kind: &'static str,
    pub identity: String,
    pub name: String,
    pub case_ids: Vec<CaseId>,
}

impl From<Participant> for ParticipantView {
    fn from(p: Participant) -> Self {
        Self {
            kind: p.kind.label(),
            identity: p.identity.to_string(),
            name: p.name,
            case_ids: p.case_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CaseView {
    pub case_id: CaseId,
    pub name: String,
    pub description: String,
    pub judges: Vec<String>,
    pub lawyers: Vec<String>,
    pub clients: Vec<String>,
    pub document_count: u64,
}

impl From<Case> for CaseView {
    fn from(case: Case) -> Self {
        Self {
            case_id: case.case_id,
            judges: hex_list(&case.judges),
            lawyers: hex_list(&case.lawyers),
            clients: hex_list(&case.clients),
            name: case.name,
            description: case.description,
            document_count: case.document_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub case_id: CaseId,
    pub index: DocumentIndex,
    pub document_hash: String,
    pub description: String,
    pub uploader: String,
}

impl From<Document> for DocumentView {
    fn from(doc: Document) -> Self {
        Self {
            case_id: doc.case_id,
            index: doc.index,
            document_hash: doc.document_hash,
            description: doc.description,
            uploader: doc.uploader.to_string(),
        }
    }
}

/// Body printed when a registry operation fails.
#[derive(Debug, Serialize)]
pub struct ErrorView {
    pub error: &'static str,
    pub reason: String,
}

impl From<&RegistryError> for ErrorView {
    fn from(err: &RegistryError) -> Self {
        Self {
            error: err.kind().as_str(),
            reason: err.to_string(),
        }
    }
}
