//! Judge, lawyer and client registration.

use super::write_set::WriteSet;
use super::RegistryService;
use crate::domain::access::require_admin;
use crate::domain::entities::Participant;
use crate::domain::errors::RegistryError;
use crate::domain::identity::{Identity, ParticipantKind};
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::KeyValueStore;
use tracing::{debug, info};

impl<KV: KeyValueStore> RegistryService<KV> {
    pub(crate) fn register_participant(
        &mut self,
        caller: Identity,
        kind: ParticipantKind,
        identity: Identity,
        name: String,
    ) -> Result<(), RegistryError> {
        require_admin(&self.config.admin, &caller)?;

        if identity.is_zero() {
            return Err(RegistryError::invalid(format!(
                "{kind} identity must not be the null identity"
            )));
        }
        self.check_required_text(&format!("{kind} name"), &name)?;

        let key = KeyPrefix::participant_key(kind, &identity);
        let (batch, ordinal) = {
            let mut ws = WriteSet::new(&self.kv_store);
            if ws.contains(&key)? {
                return Err(RegistryError::DuplicateParticipant { kind, identity });
            }

            let mut metadata = ws.metadata()?;
            let counter = metadata.participant_count_mut(kind);
            let ordinal = *counter;
            *counter += 1;

            ws.stage(key, &Participant::new(kind, identity, name, ordinal))?;
            ws.stage(KeyPrefix::metadata_key(), &metadata)?;
            (ws.into_batch(), ordinal)
        };

        self.commit(batch)?;
        info!(%kind, %identity, ordinal, "Participant registered");
        Ok(())
    }

    pub(crate) fn has_participant(
        &self,
        kind: ParticipantKind,
        identity: &Identity,
    ) -> Result<bool, RegistryError> {
        Ok(self
            .kv_store
            .exists(&KeyPrefix::participant_key(kind, identity))?)
    }

    pub(crate) fn read_participant(
        &self,
        kind: ParticipantKind,
        identity: &Identity,
    ) -> Result<Participant, RegistryError> {
        self.read_record(&KeyPrefix::participant_key(kind, identity))?
            .ok_or(RegistryError::ParticipantNotFound {
                kind,
                identity: *identity,
            })
    }

    /// All participants of `kind` in registration order.
    pub(crate) fn read_participants(
        &self,
        kind: ParticipantKind,
    ) -> Result<Vec<Participant>, RegistryError> {
        let mut participants: Vec<Participant> =
            self.scan_records(KeyPrefix::for_kind(kind).as_bytes())?;
        participants.sort_by_key(|p| p.ordinal);
        debug!(%kind, count = participants.len(), "Listed participants");
        Ok(participants)
    }
}
