//! Document references attached to cases.

use super::write_set::WriteSet;
use super::RegistryService;
use crate::domain::access::require_case_participant;
use crate::domain::entities::{Case, Document};
use crate::domain::errors::RegistryError;
use crate::domain::identity::{CaseId, DocumentIndex, Identity};
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::KeyValueStore;
use tracing::{debug, info};

impl<KV: KeyValueStore> RegistryService<KV> {
    pub(crate) fn record_document(
        &mut self,
        caller: Identity,
        case_id: CaseId,
        document_hash: String,
        description: String,
    ) -> Result<DocumentIndex, RegistryError> {
        let (batch, index) = {
            let mut ws = WriteSet::new(&self.kv_store);
            let case_key = KeyPrefix::case_key(case_id);
            let mut case: Case = ws
                .load(&case_key)?
                .ok_or(RegistryError::CaseNotFound { case_id })?;

            require_case_participant(&case, &caller)?;
            self.check_required_text("document hash", &document_hash)?;
            self.check_text_len("document description", &description)?;

            let index = case.document_count;
            case.document_count = index.checked_add(1).ok_or_else(|| {
                RegistryError::invalid(format!("case {case_id} cannot hold more documents"))
            })?;

            let document = Document {
                case_id,
                index,
                document_hash,
                description,
                uploader: caller,
            };
            ws.stage(KeyPrefix::document_key(case_id, index), &document)?;
            ws.stage(case_key, &case)?;
            (ws.into_batch(), index)
        };

        self.commit(batch)?;
        info!(case_id, index, uploader = %caller, "Document recorded");
        Ok(index)
    }

    pub(crate) fn read_document(
        &self,
        case_id: CaseId,
        index: DocumentIndex,
    ) -> Result<Document, RegistryError> {
        let case = self.read_case(case_id)?;
        if index >= case.document_count {
            return Err(RegistryError::DocumentNotFound {
                case_id,
                index,
                count: case.document_count,
            });
        }
        self.read_record(&KeyPrefix::document_key(case_id, index))?
            .ok_or_else(|| RegistryError::Storage {
                message: format!("document {index} of case {case_id} is counted but not stored"),
            })
    }

    /// All documents of a case in index order.
    pub(crate) fn read_documents(&self, case_id: CaseId) -> Result<Vec<Document>, RegistryError> {
        let case = self.read_case(case_id)?;
        let documents: Vec<Document> =
            self.scan_records(&KeyPrefix::case_documents_prefix(case_id))?;
        debug!(
            case_id,
            count = documents.len(),
            expected = case.document_count,
            "Listed documents"
        );
        Ok(documents)
    }
}
