//! # Access Control
//!
//! Stateless authorization predicates. They own no data: the service loads
//! whatever state a predicate needs and passes it in.
//!
//! | Tier | Who passes | Gates |
//! |------|------------|-------|
//! | `Admin` | the admin identity fixed at construction | participant registration, `create_case` |
//! | `CaseParticipant` | judges and lawyers listed on the case | `add_document` |

use super::entities::Case;
use super::errors::RegistryError;
use super::identity::{CaseId, Identity};
use std::fmt;
use tracing::warn;

/// The authorization tier an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessTier {
    Admin,
    CaseParticipant { case_id: CaseId },
}

impl fmt::Display for AccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessTier::Admin => f.write_str("admin"),
            AccessTier::CaseParticipant { case_id } => {
                write!(f, "judge or lawyer of case {case_id}")
            }
        }
    }
}

/// Succeeds iff `caller` is the admin.
pub fn require_admin(admin: &Identity, caller: &Identity) -> Result<(), RegistryError> {
    if caller == admin {
        return Ok(());
    }
    warn!(%caller, "Rejected admin-only call");
    Err(RegistryError::PermissionDenied {
        caller: *caller,
        required: AccessTier::Admin,
    })
}

/// Succeeds iff `caller` is listed on `case` as a judge or a lawyer.
///
/// Clients are excluded even when listed on the case. Whether clients should
/// be allowed to act on their own case is pending product-owner review; do
/// not widen this check without that decision.
pub fn require_case_participant(case: &Case, caller: &Identity) -> Result<(), RegistryError> {
    if case.is_judge(caller) || case.is_lawyer(caller) {
        return Ok(());
    }
    warn!(
        %caller,
        case_id = case.case_id,
        listed_client = case.is_client(caller),
        "Rejected case-participant call"
    );
    Err(RegistryError::PermissionDenied {
        caller: *caller,
        required: AccessTier::CaseParticipant {
            case_id: case.case_id,
        },
    })
}
