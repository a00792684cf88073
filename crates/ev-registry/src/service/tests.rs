//! # Registry Service Tests

use super::*;
use crate::adapters::InMemoryKVStore;
use crate::domain::entities::NewCase;
use crate::domain::errors::{ErrorKind, KVStoreError};
use crate::domain::identity::{CaseId, ParticipantKind};
use crate::ports::inbound::CaseRegistryApi;
use crate::ports::outbound::{BatchOperation, ScanResult};

const ADMIN: Identity = Identity([0xAD; 20]);
const JUDGE: Identity = Identity([0x11; 20]);
const JUDGE_2: Identity = Identity([0x12; 20]);
const LAWYER: Identity = Identity([0x22; 20]);
const CLIENT: Identity = Identity([0x33; 20]);
const STRANGER: Identity = Identity([0x44; 20]);

fn make_test_service() -> RegistryService<InMemoryKVStore> {
    RegistryService::new(InMemoryKVStore::new(), RegistryConfig::new(ADMIN)).unwrap()
}

/// Service with JUDGE, JUDGE_2, LAWYER and CLIENT registered.
fn make_populated_service() -> RegistryService<InMemoryKVStore> {
    let mut service = make_test_service();
    service.add_judge(ADMIN, JUDGE, "Hon. Ada Park".into()).unwrap();
    service.add_judge(ADMIN, JUDGE_2, "Hon. Ben Ortiz".into()).unwrap();
    service.add_lawyer(ADMIN, LAWYER, "Carla Reyes".into()).unwrap();
    service.add_client(ADMIN, CLIENT, "Dmitri Volkov".into()).unwrap();
    service
}

fn standard_case() -> NewCase {
    NewCase::new("Volkov v. Northwind", "Breach of lease")
        .with_judges([JUDGE])
        .with_clients([CLIENT])
        .with_lawyers([LAWYER])
}

/// Store whose batch writes can be switched to fail.
#[derive(Default)]
struct FailingKVStore {
    inner: InMemoryKVStore,
    fail_writes: bool,
}

impl KeyValueStore for FailingKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.inner.exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        self.inner.prefix_scan(prefix)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        if self.fail_writes {
            return Err(KVStoreError::IOError {
                message: "injected write failure".to_string(),
            });
        }
        self.inner.atomic_batch_write(operations)
    }
}

// =========================================================================
// Construction
// =========================================================================

#[test]
fn test_new_store_starts_empty() {
    let service = make_test_service();
    assert_eq!(service.admin(), ADMIN);
    assert_eq!(service.case_count().unwrap(), 0);
    assert!(service.list_cases().unwrap().is_empty());
    assert!(service.store().exists(&KeyPrefix::metadata_key()).unwrap());
}

#[test]
fn test_null_admin_config_rejected() {
    let result = RegistryService::new(InMemoryKVStore::new(), RegistryConfig::new(Identity::ZERO));
    assert!(matches!(result, Err(RegistryError::InvalidInput { .. })));
}

#[test]
fn test_reopen_with_other_admin_rejected() {
    let store = make_test_service().into_store();
    let result = RegistryService::new(store, RegistryConfig::new(STRANGER));
    assert!(matches!(result, Err(RegistryError::InvalidInput { .. })));
}

#[test]
fn test_reopen_continues_case_sequence() {
    let mut service = make_populated_service();
    assert_eq!(service.create_case(ADMIN, standard_case()).unwrap(), 1);

    let mut reopened =
        RegistryService::new(service.into_store(), RegistryConfig::new(ADMIN)).unwrap();
    assert_eq!(reopened.case_count().unwrap(), 1);
    assert_eq!(reopened.create_case(ADMIN, standard_case()).unwrap(), 2);
}

// =========================================================================
// Identity Registry
// =========================================================================

#[test]
fn test_add_participant_records_empty_case_list() {
    let service = make_populated_service();
    let judge = service.get_participant(ParticipantKind::Judge, &JUDGE).unwrap();
    assert_eq!(judge.name, "Hon. Ada Park");
    assert!(judge.case_ids.is_empty());
    assert!(service.participant_exists(ParticipantKind::Client, &CLIENT).unwrap());
    assert!(!service.participant_exists(ParticipantKind::Judge, &CLIENT).unwrap());
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut service = make_populated_service();
    let result = service.add_judge(ADMIN, JUDGE, "Someone Else".into());

    assert_eq!(
        result,
        Err(RegistryError::DuplicateParticipant {
            kind: ParticipantKind::Judge,
            identity: JUDGE
        })
    );
    assert_eq!(service.list_participants(ParticipantKind::Judge).unwrap().len(), 2);
    let judge = service.get_participant(ParticipantKind::Judge, &JUDGE).unwrap();
    assert_eq!(judge.name, "Hon. Ada Park");
}

#[test]
fn test_same_identity_may_hold_several_roles() {
    let mut service = make_populated_service();
    service.add_lawyer(ADMIN, JUDGE, "Ada Park".into()).unwrap();
    assert!(service.participant_exists(ParticipantKind::Judge, &JUDGE).unwrap());
    assert!(service.participant_exists(ParticipantKind::Lawyer, &JUDGE).unwrap());
}

#[test]
fn test_null_identity_and_empty_name_rejected() {
    let mut service = make_test_service();

    let result = service.add_client(ADMIN, Identity::ZERO, "Nobody".into());
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);

    let result = service.add_client(ADMIN, CLIENT, String::new());
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);

    assert!(service.list_participants(ParticipantKind::Client).unwrap().is_empty());
}

#[test]
fn test_oversized_name_rejected() {
    let config = RegistryConfig::new(ADMIN).with_max_text_len(8);
    let mut service = RegistryService::new(InMemoryKVStore::new(), config).unwrap();

    let result = service.add_lawyer(ADMIN, LAWYER, "Carla Reyes".into());
    assert!(matches!(result, Err(RegistryError::InvalidInput { .. })));
    service.add_lawyer(ADMIN, LAWYER, "Carla".into()).unwrap();
}

#[test]
fn test_non_admin_cannot_register() {
    let mut service = make_test_service();
    let result = service.add_judge(JUDGE, JUDGE, "Self Appointed".into());

    assert_eq!(result.unwrap_err().kind(), ErrorKind::PermissionDenied);
    assert!(!service.participant_exists(ParticipantKind::Judge, &JUDGE).unwrap());
}

#[test]
fn test_participants_listed_in_registration_order() {
    let mut service = make_test_service();
    // Registered against key order so the listing must follow the ordinal.
    for (byte, name) in [(0x90u8, "first"), (0x10, "second"), (0x50, "third")] {
        service
            .add_client(ADMIN, Identity::new([byte; 20]), name.into())
            .unwrap();
    }

    let names: Vec<String> = service
        .list_participants(ParticipantKind::Client)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn test_get_missing_participant() {
    let service = make_test_service();
    let err = service.get_participant(ParticipantKind::Lawyer, &LAWYER).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reference);
}

// =========================================================================
// Case Registry
// =========================================================================

#[test]
fn test_case_ids_are_sequential() {
    let mut service = make_populated_service();
    for expected in 1..=5 {
        assert_eq!(service.create_case(ADMIN, standard_case()).unwrap(), expected);
    }
    assert_eq!(service.case_count().unwrap(), 5);
    let ids: Vec<CaseId> = service.list_cases().unwrap().iter().map(|c| c.case_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_create_case_stores_membership() {
    let mut service = make_populated_service();
    let case_id = service.create_case(ADMIN, standard_case()).unwrap();

    let case = service.get_case(case_id).unwrap();
    assert_eq!(case.name, "Volkov v. Northwind");
    assert_eq!(case.description, "Breach of lease");
    assert_eq!(case.judges, vec![JUDGE]);
    assert_eq!(case.lawyers, vec![LAWYER]);
    assert_eq!(case.clients, vec![CLIENT]);
    assert_eq!(case.document_count, 0);
}

#[test]
fn test_create_case_appends_back_references() {
    let mut service = make_populated_service();
    let first = service.create_case(ADMIN, standard_case()).unwrap();
    let second = service
        .create_case(ADMIN, NewCase::new("Second", "").with_judges([JUDGE]))
        .unwrap();

    let judge = service.get_participant(ParticipantKind::Judge, &JUDGE).unwrap();
    assert_eq!(judge.case_ids, vec![first, second]);
    let lawyer = service.get_participant(ParticipantKind::Lawyer, &LAWYER).unwrap();
    assert_eq!(lawyer.case_ids, vec![first]);
    let client = service.get_participant(ParticipantKind::Client, &CLIENT).unwrap();
    assert_eq!(client.case_ids, vec![first]);
    let unlisted = service.get_participant(ParticipantKind::Judge, &JUDGE_2).unwrap();
    assert!(unlisted.case_ids.is_empty());
}

#[test]
fn test_identity_in_two_roles_gets_one_reference_per_role() {
    let mut service = make_populated_service();
    service.add_lawyer(ADMIN, JUDGE, "Ada Park".into()).unwrap();

    let case_id = service
        .create_case(
            ADMIN,
            NewCase::new("Dual", "").with_judges([JUDGE]).with_lawyers([JUDGE]),
        )
        .unwrap();

    let as_judge = service.get_participant(ParticipantKind::Judge, &JUDGE).unwrap();
    let as_lawyer = service.get_participant(ParticipantKind::Lawyer, &JUDGE).unwrap();
    assert_eq!(as_judge.case_ids, vec![case_id]);
    assert_eq!(as_lawyer.case_ids, vec![case_id]);
}

#[test]
fn test_create_case_with_unregistered_identity_rejected() {
    let mut service = make_populated_service();
    let request = NewCase::new("Bad", "")
        .with_judges([JUDGE])
        .with_lawyers([STRANGER]);

    let result = service.create_case(ADMIN, request);
    assert_eq!(
        result,
        Err(RegistryError::UnknownParticipant {
            kind: ParticipantKind::Lawyer,
            identity: STRANGER
        })
    );
    assert_eq!(service.case_count().unwrap(), 0);
    assert!(service.get_case(1).is_err());
    let judge = service.get_participant(ParticipantKind::Judge, &JUDGE).unwrap();
    assert!(judge.case_ids.is_empty());
}

#[test]
fn test_identity_checked_against_its_own_role() {
    let mut service = make_populated_service();
    // CLIENT is registered, but not as a judge.
    let result = service.create_case(ADMIN, NewCase::new("Wrong role", "").with_judges([CLIENT]));
    assert!(matches!(
        result,
        Err(RegistryError::UnknownParticipant {
            kind: ParticipantKind::Judge,
            ..
        })
    ));
}

#[test]
fn test_missing_judge_reported_before_missing_client() {
    let mut service = make_populated_service();
    let request = NewCase::new("Both missing", "")
        .with_judges([Identity::new([0x71; 20])])
        .with_clients([Identity::new([0x72; 20])]);

    let err = service.create_case(ADMIN, request).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::UnknownParticipant {
            kind: ParticipantKind::Judge,
            ..
        }
    ));
}

#[test]
fn test_repeated_identity_within_role_rejected() {
    let mut service = make_populated_service();
    let request = NewCase::new("Repeat", "").with_judges([JUDGE, JUDGE_2, JUDGE]);

    let err = service.create_case(ADMIN, request).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidInput { .. }));
    assert_eq!(service.case_count().unwrap(), 0);
}

#[test]
fn test_case_with_no_members_allowed() {
    let mut service = make_test_service();
    let case_id = service.create_case(ADMIN, NewCase::new("", "")).unwrap();
    assert_eq!(case_id, 1);
    assert!(service.get_case(1).unwrap().judges.is_empty());
}

#[test]
fn test_non_admin_cannot_create_case() {
    let mut service = make_populated_service();
    let err = service.create_case(JUDGE, standard_case()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(service.case_count().unwrap(), 0);
}

#[test]
fn test_get_missing_case() {
    let service = make_test_service();
    assert_eq!(service.get_case(7), Err(RegistryError::CaseNotFound { case_id: 7 }));
}

#[test]
fn test_search_matches_case_and_member_names() {
    let mut service = make_populated_service();
    let first = service.create_case(ADMIN, standard_case()).unwrap();
    let second = service
        .create_case(ADMIN, NewCase::new("Estate of Lin", "").with_judges([JUDGE_2]))
        .unwrap();

    let by_case_name: Vec<CaseId> = service
        .search_cases("NORTHWIND")
        .unwrap()
        .iter()
        .map(|c| c.case_id)
        .collect();
    assert_eq!(by_case_name, vec![first]);

    let by_judge_name: Vec<CaseId> = service
        .search_cases("ortiz")
        .unwrap()
        .iter()
        .map(|c| c.case_id)
        .collect();
    assert_eq!(by_judge_name, vec![second]);

    let by_client_name = service.search_cases("volkov").unwrap();
    assert_eq!(by_client_name.len(), 1);

    assert_eq!(service.search_cases("").unwrap().len(), 2);
    assert!(service.search_cases("nobody").unwrap().is_empty());
}

// =========================================================================
// Document Registry
// =========================================================================

#[test]
fn test_judge_and_lawyer_can_add_documents() {
    let mut service = make_populated_service();
    let case_id = service.create_case(ADMIN, standard_case()).unwrap();

    let first = service
        .add_document(JUDGE, case_id, "QmHashOne".into(), "Order".into())
        .unwrap();
    let second = service
        .add_document(LAWYER, case_id, "QmHashTwo".into(), "Motion".into())
        .unwrap();
    assert_eq!((first, second), (0, 1));

    let doc = service.get_document(case_id, 1).unwrap();
    assert_eq!(doc.uploader, LAWYER);
    assert_eq!(doc.document_hash, "QmHashTwo");
    assert_eq!(service.get_case(case_id).unwrap().document_count, 2);

    let listed: Vec<Identity> = service
        .list_documents(case_id)
        .unwrap()
        .iter()
        .map(|d| d.uploader)
        .collect();
    assert_eq!(listed, vec![JUDGE, LAWYER]);
}

#[test]
fn test_listed_client_cannot_add_document() {
    let mut service = make_populated_service();
    let case_id = service.create_case(ADMIN, standard_case()).unwrap();

    let err = service
        .add_document(CLIENT, case_id, "QmHash".into(), "Letter".into())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(service.get_case(case_id).unwrap().document_count, 0);
}

#[test]
fn test_unlisted_judge_and_admin_cannot_add_document() {
    let mut service = make_populated_service();
    let case_id = service.create_case(ADMIN, standard_case()).unwrap();

    for caller in [JUDGE_2, ADMIN, STRANGER] {
        let err = service
            .add_document(caller, case_id, "QmHash".into(), String::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }
    assert!(service.list_documents(case_id).unwrap().is_empty());
}

#[test]
fn test_add_document_to_missing_case() {
    let mut service = make_populated_service();
    let result = service.add_document(JUDGE, 42, "QmHash".into(), String::new());
    assert_eq!(result, Err(RegistryError::CaseNotFound { case_id: 42 }));
    assert_eq!(service.case_count().unwrap(), 0);
}

#[test]
fn test_empty_document_hash_rejected() {
    let mut service = make_populated_service();
    let case_id = service.create_case(ADMIN, standard_case()).unwrap();

    let err = service
        .add_document(JUDGE, case_id, String::new(), "Blank".into())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(service.get_case(case_id).unwrap().document_count, 0);
}

#[test]
fn test_get_document_out_of_range() {
    let mut service = make_populated_service();
    let case_id = service.create_case(ADMIN, standard_case()).unwrap();
    service
        .add_document(JUDGE, case_id, "QmHash".into(), String::new())
        .unwrap();

    assert_eq!(
        service.get_document(case_id, 1),
        Err(RegistryError::DocumentNotFound {
            case_id,
            index: 1,
            count: 1
        })
    );
    assert_eq!(
        service.get_document(9, 0),
        Err(RegistryError::CaseNotFound { case_id: 9 })
    );
}

#[test]
fn test_documents_do_not_leak_between_cases() {
    let mut service = make_populated_service();
    let first = service.create_case(ADMIN, standard_case()).unwrap();
    let second = service.create_case(ADMIN, standard_case()).unwrap();

    service
        .add_document(JUDGE, first, "QmFirst".into(), String::new())
        .unwrap();
    let index = service
        .add_document(JUDGE, second, "QmSecond".into(), String::new())
        .unwrap();

    assert_eq!(index, 0);
    assert_eq!(service.list_documents(first).unwrap().len(), 1);
    assert_eq!(
        service.get_document(second, 0).unwrap().document_hash,
        "QmSecond"
    );
}

// =========================================================================
// Atomic Commit
// =========================================================================

#[test]
fn test_failed_commit_leaves_registry_unchanged() {
    let mut service = RegistryService::new(FailingKVStore::default(), RegistryConfig::new(ADMIN))
        .unwrap();
    service.add_judge(ADMIN, JUDGE, "Hon. Ada Park".into()).unwrap();
    service.add_client(ADMIN, CLIENT, "Dmitri Volkov".into()).unwrap();

    service.kv_store.fail_writes = true;
    let request = NewCase::new("Doomed", "").with_judges([JUDGE]).with_clients([CLIENT]);
    let err = service.create_case(ADMIN, request.clone()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);

    assert_eq!(service.case_count().unwrap(), 0);
    assert!(service.list_cases().unwrap().is_empty());
    let judge = service.get_participant(ParticipantKind::Judge, &JUDGE).unwrap();
    assert!(judge.case_ids.is_empty());

    service.kv_store.fail_writes = false;
    assert_eq!(service.create_case(ADMIN, request).unwrap(), 1);
}

#[test]
fn test_failed_registration_commit_leaves_counts_unchanged() {
    let mut service = RegistryService::new(FailingKVStore::default(), RegistryConfig::new(ADMIN))
        .unwrap();
    service.kv_store.fail_writes = true;

    let err = service
        .add_lawyer(ADMIN, LAWYER, "Carla Reyes".into())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);

    service.kv_store.fail_writes = false;
    service.add_lawyer(ADMIN, LAWYER, "Carla Reyes".into()).unwrap();
    let lawyer = service.get_participant(ParticipantKind::Lawyer, &LAWYER).unwrap();
    assert_eq!(lawyer.ordinal, 0);
}

#[test]
fn test_create_case_commits_one_batch() {
    let mut service = make_populated_service();
    let before = service.store().len();
    service.create_case(ADMIN, standard_case()).unwrap();
    // One new case record; participants and metadata are overwritten in place.
    assert_eq!(service.store().len(), before + 1);
}
