//! # Identities
//!
//! Identity-addressed primitives shared by every registry component.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequential case identifier. The first case is `1`.
pub type CaseId = u64;

/// Zero-based position of a document within its case.
pub type DocumentIndex = u64;

// =============================================================================
// IDENTITY (20 bytes)
// =============================================================================

/// A 20-byte participant or caller identity.
///
/// The all-zero value is the null identity. It is never a valid participant
/// and never a valid admin.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Identity(pub [u8; 20]);

impl Identity {
    /// The null identity (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Length of the raw identity in bytes.
    pub const LEN: usize = 20;

    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an identity from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == Self::LEN {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the null identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 20]> for Identity {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

/// Failure to parse the textual `0x`-prefixed form of an [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityParseError {
    #[error("identity is not valid hex: {0}")]
    InvalidHex(String),

    #[error("identity must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl FromStr for Identity {
    type Err = IdentityParseError;

    /// Accepts 40 hex digits with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes =
            hex::decode(digits).map_err(|e| IdentityParseError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(IdentityParseError::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })
    }
}

// =============================================================================
// PARTICIPANT KIND
// =============================================================================

/// The three independent participant collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantKind {
    Judge,
    Lawyer,
    Client,
}

impl ParticipantKind {
    /// All kinds, in the order `create_case` validates them.
    pub const ALL: [ParticipantKind; 3] = [
        ParticipantKind::Judge,
        ParticipantKind::Client,
        ParticipantKind::Lawyer,
    ];

    /// Lowercase label used in messages and on the command line.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            ParticipantKind::Judge => "judge",
            ParticipantKind::Lawyer => "lawyer",
            ParticipantKind::Client => "client",
        }
    }
}

impl fmt::Display for ParticipantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ParticipantKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "judge" => Ok(ParticipantKind::Judge),
            "lawyer" => Ok(ParticipantKind::Lawyer),
            "client" => Ok(ParticipantKind::Client),
            other => Err(format!("unknown participant kind: {other}")),
        }
    }
}
