//! Status enums shared by the engine and its callers.

use serde::{Deserialize, Serialize};

/// Kind of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    #[default]
    Success,
    Error,
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for NoticeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            _ => Err(format!("invalid notice kind: {s}")),
        }
    }
}

/// Outcome of moving the guest cart into an account cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOutcome {
    /// This many guest lines were appended to the account cart.
    Merged(usize),
    /// The guest cart was empty; nothing changed.
    NothingToMerge,
}

impl MergeOutcome {
    /// Number of lines moved (zero for [`Self::NothingToMerge`]).
    #[must_use]
    pub const fn moved(&self) -> usize {
        match self {
            Self::Merged(n) => *n,
            Self::NothingToMerge => 0,
        }
    }
}
