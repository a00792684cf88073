//! Subcommands and their dispatch onto `CaseRegistryApi`.

use crate::output::{CaseView, DocumentView, ParticipantView};
use clap::Subcommand;
use ev_registry::{
    CaseId, CaseRegistryApi, DocumentIndex, Identity, NewCase, ParticipantKind, RegistryError,
};
use serde_json::{json, Value};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Register a judge (admin only)
    AddJudge {
        #[arg(long)]
        identity: Identity,
        #[arg(long)]
        name: String,
    },

    /// Register a lawyer (admin only)
    AddLawyer {
        #[arg(long)]
        identity: Identity,
        #[arg(long)]
        name: String,
    },

    /// Register a client (admin only)
    AddClient {
        #[arg(long)]
        identity: Identity,
        #[arg(long)]
        name: String,
    },

    /// Open a case (admin only)
    CreateCase {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Repeat for each judge
        #[arg(long = "judge")]
        judges: Vec<Identity>,
        /// Repeat for each client
        #[arg(long = "client")]
        clients: Vec<Identity>,
        /// Repeat for each lawyer
        #[arg(long = "lawyer")]
        lawyers: Vec<Identity>,
    },

    /// Attach a document reference to a case (case judge or lawyer)
    AddDocument {
        #[arg(long)]
        case_id: CaseId,
        #[arg(long)]
        hash: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    GetCase {
        #[arg(long)]
        case_id: CaseId,
    },

    GetDocument {
        #[arg(long)]
        case_id: CaseId,
        #[arg(long)]
        index: DocumentIndex,
    },

    GetParticipant {
        /// judge, lawyer or client
        #[arg(long)]
        kind: ParticipantKind,
        #[arg(long)]
        identity: Identity,
    },

    ListParticipants {
        #[arg(long)]
        kind: ParticipantKind,
    },

    ListCases,

    ListDocuments {
        #[arg(long)]
        case_id: CaseId,
    },

    /// Case-insensitive search over case and member names
    SearchCases {
        #[arg(long, default_value = "")]
        query: String,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::AddJudge { .. } => "add-judge",
            Command::AddLawyer { .. } => "add-lawyer",
            Command::AddClient { .. } => "add-client",
            Command::CreateCase { .. } => "create-case",
            Command::AddDocument { .. } => "add-document",
            Command::GetCase { .. } => "get-case",
            Command::GetDocument { .. } => "get-document",
            Command::GetParticipant { .. } => "get-participant",
            Command::ListParticipants { .. } => "list-participants",
            Command::ListCases => "list-cases",
            Command::ListDocuments { .. } => "list-documents",
            Command::SearchCases { .. } => "search-cases",
        }
    }
}

fn require_caller(caller: Option<Identity>, command: &str) -> Result<Identity, RegistryError> {
    caller.ok_or_else(|| RegistryError::invalid(format!("{command} requires --caller")))
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, RegistryError> {
    serde_json::to_value(value).map_err(|e| RegistryError::Serialization {
        message: e.to_string(),
    })
}

fn register<R: CaseRegistryApi>(
    registry: &mut R,
    caller: Identity,
    kind: ParticipantKind,
    identity: Identity,
    name: String,
) -> Result<Value, RegistryError> {
    registry.add_participant(caller, kind, identity, name)?;
    Ok(json!({ "kind": kind.label(), "identity": identity.to_string() }))
}

/// Run one command and return its JSON result.
pub fn execute<R: CaseRegistryApi>(
    registry: &mut R,
    caller: Option<Identity>,
    command: Command,
) -> Result<Value, RegistryError> {
    let command_name = command.name();
    match command {
        Command::AddJudge { identity, name } => {
            let caller = require_caller(caller, command_name)?;
            register(registry, caller, ParticipantKind::Judge, identity, name)
        }
        Command::AddLawyer { identity, name } => {
            let caller = require_caller(caller, command_name)?;
            register(registry, caller, ParticipantKind::Lawyer, identity, name)
        }
        Command::AddClient { identity, name } => {
            let caller = require_caller(caller, command_name)?;
            register(registry, caller, ParticipantKind::Client, identity, name)
        }
        Command::CreateCase {
            name,
            description,
            judges,
            clients,
            lawyers,
        } => {
            let caller = require_caller(caller, command_name)?;
            let request = NewCase::new(name, description)
                .with_judges(judges)
                .with_clients(clients)
                .with_lawyers(lawyers);
            let case_id = registry.create_case(caller, request)?;
            Ok(json!({ "case_id": case_id }))
        }
        Command::AddDocument {
            case_id,
            hash,
            description,
        } => {
            let caller = require_caller(caller, command_name)?;
            let index = registry.add_document(caller, case_id, hash, description)?;
            Ok(json!({ "case_id": case_id, "index": index }))
        }
        Command::GetCase { case_id } => to_json(CaseView::from(registry.get_case(case_id)?)),
        Command::GetDocument { case_id, index } => {
            to_json(DocumentView::from(registry.get_document(case_id, index)?))
        }
        Command::GetParticipant { kind, identity } => {
            to_json(ParticipantView::from(registry.get_participant(kind, &identity)?))
        }
        Command::ListParticipants { kind } => to_json(
            registry
                .list_participants(kind)?
                .into_iter()
                .map(ParticipantView::from)
                .collect::<Vec<_>>(),
        ),
        Command::ListCases => to_json(
            registry
                .list_cases()?
                .into_iter()
                .map(CaseView::from)
                .collect::<Vec<_>>(),
        ),
        Command::ListDocuments { case_id } => to_json(
            registry
                .list_documents(case_id)?
                .into_iter()
                .map(DocumentView::from)
                .collect::<Vec<_>>(),
        ),
        Command::SearchCases { query } => to_json(
            registry
                .search_cases(&query)?
                .into_iter()
                .map(CaseView::from)
                .collect::<Vec<_>>(),
        ),
    }
}
