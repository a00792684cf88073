//! `CaseRegistryApi` implementation.

use super::RegistryService;
use crate::domain::entities::{Case, Document, NewCase, Participant};
use crate::domain::errors::RegistryError;
use crate::domain::identity::{CaseId, DocumentIndex, Identity, ParticipantKind};
use crate::ports::inbound::CaseRegistryApi;
use crate::ports::outbound::KeyValueStore;
use tracing::debug;

impl<KV: KeyValueStore> CaseRegistryApi for RegistryService<KV> {
    fn admin(&self) -> Identity {
        self.config.admin
    }

    fn add_participant(
        &mut self,
        caller: Identity,
        kind: ParticipantKind,
        identity: Identity,
        name: String,
    ) -> Result<(), RegistryError> {
        self.register_participant(caller, kind, identity, name)
    }

    fn participant_exists(
        &self,
        kind: ParticipantKind,
        identity: &Identity,
    ) -> Result<bool, RegistryError> {
        self.has_participant(kind, identity)
    }

    fn get_participant(
        &self,
        kind: ParticipantKind,
        identity: &Identity,
    ) -> Result<Participant, RegistryError> {
        debug!(%kind, %identity, "Getting participant");
        self.read_participant(kind, identity)
    }

    fn list_participants(&self, kind: ParticipantKind) -> Result<Vec<Participant>, RegistryError> {
        self.read_participants(kind)
    }

    fn create_case(&mut self, caller: Identity, request: NewCase) -> Result<CaseId, RegistryError> {
        self.open_case(caller, request)
    }

    fn get_case(&self, case_id: CaseId) -> Result<Case, RegistryError> {
        debug!(case_id, "Getting case");
        self.read_case(case_id)
    }

    fn list_cases(&self) -> Result<Vec<Case>, RegistryError> {
        self.read_cases()
    }

    fn case_count(&self) -> Result<u64, RegistryError> {
        Ok(self.read_metadata()?.case_count())
    }

    fn search_cases(&self, query: &str) -> Result<Vec<Case>, RegistryError> {
        self.find_cases(query)
    }

    fn add_document(
        &mut self,
        caller: Identity,
        case_id: CaseId,
        document_hash: String,
        description: String,
    ) -> Result<DocumentIndex, RegistryError> {
        self.record_document(caller, case_id, document_hash, description)
    }

    fn get_document(
        &self,
        case_id: CaseId,
        index: DocumentIndex,
    ) -> Result<Document, RegistryError> {
        debug!(case_id, index, "Getting document");
        self.read_document(case_id, index)
    }

    fn list_documents(&self, case_id: CaseId) -> Result<Vec<Document>, RegistryError> {
        self.read_documents(case_id)
    }
}
