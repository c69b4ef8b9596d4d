#![forbid(unsafe_code)]

use crate::instantiate::InstantiatePhase;
use xv_core::model::VersionRefError;
use xv_storage::StoreError;

#[derive(Debug)]
pub enum ServiceError {
    NotFound(&'static str),
    BadRequest(String),
    ExerciseInvalid {
        phase: InstantiatePhase,
        message: String,
        random_seed: i64,
    },
    EntryLocked {
        locked_by: String,
    },
    Storage(StoreError),
}

impl ServiceError {
    /// Stable machine-readable code for the transport layer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::ExerciseInvalid { .. } => "EXERCISE_INVALID",
            Self::EntryLocked { .. } => "ENTRY_LOCKED",
            Self::Storage(_) => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "{what}"),
            Self::BadRequest(message) => write!(f, "{message}"),
            Self::ExerciseInvalid {
                phase,
                message,
                random_seed,
            } => write!(
                f,
                "exercise invalid at {}: {message} (random_seed={random_seed})",
                phase.as_str()
            ),
            Self::EntryLocked { locked_by } => write!(f, "entry locked by {locked_by}"),
            Self::Storage(err) => write!(f, "storage: {err}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<VersionRefError> for ServiceError {
    fn from(value: VersionRefError) -> Self {
        match value {
            VersionRefError::Conflicting => Self::BadRequest(
                "request may contain 'version' or 'branch' but not both".to_string(),
            ),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UnknownVersion => Self::NotFound("no such version"),
            StoreError::UnknownBranchEntry => Self::NotFound("no such branch entry"),
            StoreError::UnknownEntry => Self::NotFound("no such entry"),
            StoreError::EntryLocked { locked_by } => Self::EntryLocked { locked_by },
            StoreError::InvalidInput(message) => Self::BadRequest(message.to_string()),
            other => Self::Storage(other),
        }
    }
}
