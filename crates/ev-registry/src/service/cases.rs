//! Case creation, lookup and search.

use super::write_set::WriteSet;
use super::RegistryService;
use crate::domain::access::require_admin;
use crate::domain::entities::{Case, NewCase, Participant};
use crate::domain::errors::RegistryError;
use crate::domain::identity::{CaseId, Identity, ParticipantKind};
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::KeyValueStore;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

impl<KV: KeyValueStore> RegistryService<KV> {
    #[instrument(skip_all, fields(%caller, case_name = %request.name))]
    pub(crate) fn open_case(
        &mut self,
        caller: Identity,
        request: NewCase,
    ) -> Result<CaseId, RegistryError> {
        require_admin(&self.config.admin, &caller)?;
        self.check_text_len("case name", &request.name)?;
        self.check_text_len("case description", &request.description)?;

        for kind in ParticipantKind::ALL {
            let mut seen = HashSet::new();
            if let Some(repeated) = request.members(kind).iter().find(|id| !seen.insert(**id)) {
                return Err(RegistryError::invalid(format!(
                    "{kind} {repeated} is listed more than once"
                )));
            }
        }

        let (batch, case_id) = {
            let mut ws = WriteSet::new(&self.kv_store);

            // Judges, then clients, then lawyers; the first missing identity is reported.
            for kind in ParticipantKind::ALL {
                for identity in request.members(kind) {
                    if !ws.contains(&KeyPrefix::participant_key(kind, identity))? {
                        return Err(RegistryError::UnknownParticipant {
                            kind,
                            identity: *identity,
                        });
                    }
                }
            }

            let mut metadata = ws.metadata()?;
            let case_id = metadata.next_case_id;
            metadata.next_case_id = case_id
                .checked_add(1)
                .ok_or(RegistryError::CaseIdsExhausted)?;

            let case = Case {
                case_id,
                name: request.name,
                description: request.description,
                judges: request.judges,
                lawyers: request.lawyers,
                clients: request.clients,
                document_count: 0,
            };

            for kind in ParticipantKind::ALL {
                for identity in case.members(kind) {
                    let key = KeyPrefix::participant_key(kind, identity);
                    let mut participant: Participant =
                        ws.load(&key)?.ok_or(RegistryError::ParticipantNotFound {
                            kind,
                            identity: *identity,
                        })?;
                    participant.append_case_id(case_id);
                    ws.stage(key, &participant)?;
                }
            }

            ws.stage(KeyPrefix::case_key(case_id), &case)?;
            ws.stage(KeyPrefix::metadata_key(), &metadata)?;
            (ws.into_batch(), case_id)
        };

        self.commit(batch)?;
        info!(case_id, "Case created");
        Ok(case_id)
    }

    /// All cases in identifier order.
    pub(crate) fn read_cases(&self) -> Result<Vec<Case>, RegistryError> {
        let cases: Vec<Case> = self.scan_records(KeyPrefix::Case.as_bytes())?;
        debug!(count = cases.len(), "Listed cases");
        Ok(cases)
    }

    /// Case-insensitive substring search over case names and member names.
    pub(crate) fn find_cases(&self, query: &str) -> Result<Vec<Case>, RegistryError> {
        let cases = self.read_cases()?;
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Ok(cases);
        }

        let mut names: HashMap<(ParticipantKind, Identity), String> = HashMap::new();
        let mut matches = Vec::new();
        for case in cases {
            if case.name.to_lowercase().contains(&needle)
                || self.member_name_matches(&case, &needle, &mut names)?
            {
                matches.push(case);
            }
        }

        debug!(query, count = matches.len(), "Searched cases");
        Ok(matches)
    }

    /// Whether any member's lowercased display name contains `needle`.
    /// `names` caches lookups across the cases of one search.
    fn member_name_matches(
        &self,
        case: &Case,
        needle: &str,
        names: &mut HashMap<(ParticipantKind, Identity), String>,
    ) -> Result<bool, RegistryError> {
        for kind in ParticipantKind::ALL {
            for identity in case.members(kind) {
                if !names.contains_key(&(kind, *identity)) {
                    let name = self.read_participant(kind, identity)?.name.to_lowercase();
                    names.insert((kind, *identity), name);
                }
                if names
                    .get(&(kind, *identity))
                    .is_some_and(|name| name.contains(needle))
                {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
