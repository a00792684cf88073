//! # Inbound Ports (Driving Ports)
//!
//! The public operation surface of the registry.
//!
//! Every mutating operation takes the caller identity explicitly. The host
//! establishes and vouches for that identity; the registry never re-derives it.

use crate::domain::entities::{Case, Document, NewCase, Participant};
use crate::domain::errors::RegistryError;
use crate::domain::identity::{CaseId, DocumentIndex, Identity, ParticipantKind};

/// Primary API of the case registry.
///
/// ## Atomicity
///
/// Each call either commits all of its writes or none of them. Any error
/// discards every write staged during that call.
pub trait CaseRegistryApi {
    /// The admin identity fixed at construction.
    fn admin(&self) -> Identity;

    // === IdentityRegistry ===

    /// Register a participant in the `kind` collection.
    ///
    /// ## Errors
    ///
    /// - `PermissionDenied`: caller is not the admin
    /// - `InvalidInput`: null identity, empty or oversized name
    /// - `DuplicateParticipant`: identity already registered as `kind`
    fn add_participant(
        &mut self,
        caller: Identity,
        kind: ParticipantKind,
        identity: Identity,
        name: String,
    ) -> Result<(), RegistryError>;

    fn add_judge(
        &mut self,
        caller: Identity,
        identity: Identity,
        name: String,
    ) -> Result<(), RegistryError> {
        self.add_participant(caller, ParticipantKind::Judge, identity, name)
    }

    fn add_lawyer(
        &mut self,
        caller: Identity,
        identity: Identity,
        name: String,
    ) -> Result<(), RegistryError> {
        self.add_participant(caller, ParticipantKind::Lawyer, identity, name)
    }

    fn add_client(
        &mut self,
        caller: Identity,
        identity: Identity,
        name: String,
    ) -> Result<(), RegistryError> {
        self.add_participant(caller, ParticipantKind::Client, identity, name)
    }

    /// Whether `identity` is registered as `kind`.
    fn participant_exists(
        &self,
        kind: ParticipantKind,
        identity: &Identity,
    ) -> Result<bool, RegistryError>;

    /// ## Errors
    ///
    /// - `ParticipantNotFound`: identity not registered as `kind`
    fn get_participant(
        &self,
        kind: ParticipantKind,
        identity: &Identity,
    ) -> Result<Participant, RegistryError>;

    /// Every participant of `kind`, in registration order.
    fn list_participants(&self, kind: ParticipantKind) -> Result<Vec<Participant>, RegistryError>;

    // === CaseRegistry ===

    /// Open a case and return its identifier.
    ///
    /// ## Errors
    ///
    /// - `PermissionDenied`: caller is not the admin
    /// - `UnknownParticipant`: a listed identity is not registered in its role
    /// - `InvalidInput`: an identity repeated within one role, oversized text
    fn create_case(&mut self, caller: Identity, request: NewCase) -> Result<CaseId, RegistryError>;

    /// ## Errors
    ///
    /// - `CaseNotFound`
    fn get_case(&self, case_id: CaseId) -> Result<Case, RegistryError>;

    /// Every case, in identifier order.
    fn list_cases(&self) -> Result<Vec<Case>, RegistryError>;

    /// Number of cases created so far.
    fn case_count(&self) -> Result<u64, RegistryError>;

    /// Cases whose name, or any member's display name, contains `query`
    /// (case-insensitive). An empty query matches every case.
    fn search_cases(&self, query: &str) -> Result<Vec<Case>, RegistryError>;

    // === DocumentRegistry ===

    /// Attach a document reference to a case and return its index.
    ///
    /// ## Errors
    ///
    /// - `CaseNotFound`: no such case
    /// - `PermissionDenied`: caller is not a judge or lawyer of the case
    /// - `InvalidInput`: empty or oversized hash, oversized description
    fn add_document(
        &mut self,
        caller: Identity,
        case_id: CaseId,
        document_hash: String,
        description: String,
    ) -> Result<DocumentIndex, RegistryError>;

    /// ## Errors
    ///
    /// - `CaseNotFound`, `DocumentNotFound`
    fn get_document(&self, case_id: CaseId, index: DocumentIndex)
        -> Result<Document, RegistryError>;

    /// Every document of a case, in index order.
    fn list_documents(&self, case_id: CaseId) -> Result<Vec<Document>, RegistryError>;
}
