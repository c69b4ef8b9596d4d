#![forbid(unsafe_code)]

//! JSON views of records for the transport layer. Timestamps leave the
//! store as UTC milliseconds and become RFC3339 strings only here.

use crate::error::ServiceError;
use crate::support::time::ts_ms_to_rfc3339;
use serde::Serialize;
use xv_storage::{EntryRow, PointerRow, VersionRow};

/// Metadata view of a stored version. Payload bytes travel outside the
/// JSON body; the transport packs them as a zip attachment.
#[derive(Clone, Debug, Serialize)]
pub struct ExerciseView {
    pub id: String,
    pub version: String,
    pub created: String,
    pub last_updated: Option<String>,
}

impl From<&VersionRow> for ExerciseView {
    fn from(row: &VersionRow) -> Self {
        Self {
            id: row.exercise_id.clone(),
            version: row.version.clone(),
            created: ts_ms_to_rfc3339(row.created_at_ms),
            last_updated: row.last_updated_at_ms.map(ts_ms_to_rfc3339),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PointerView {
    pub branch: &'static str,
    pub id: String,
    pub version: String,
    pub updated: String,
}

impl From<&PointerRow> for PointerView {
    fn from(row: &PointerRow) -> Self {
        Self {
            branch: row.branch.as_str(),
            id: row.exercise_id.clone(),
            version: row.version.clone(),
            updated: ts_ms_to_rfc3339(row.updated_at_ms),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct EntryView {
    pub id: i64,
    pub data: serde_json::Value,
    pub locked: bool,
    pub created_at: String,
    pub created_request_id: Option<String>,
    pub last_modified_at: Option<String>,
    pub last_modified_request_id: Option<String>,
    pub locked_at: Option<String>,
    pub locked_request_id: Option<String>,
}

impl From<&EntryRow> for EntryView {
    fn from(row: &EntryRow) -> Self {
        Self {
            id: row.id,
            data: row.data.clone(),
            locked: row.locked_by.is_some(),
            created_at: ts_ms_to_rfc3339(row.created_at_ms),
            created_request_id: row.created_request_id.clone(),
            last_modified_at: row.last_modified_at_ms.map(ts_ms_to_rfc3339),
            last_modified_request_id: row.last_modified_request_id.clone(),
            locked_at: row.locked_at_ms.map(ts_ms_to_rfc3339),
            locked_request_id: row.locked_request_id.clone(),
        }
    }
}

/// Failure body: a stable code, a human-readable message, and the
/// reproduction diagnostics when template instantiation failed.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorView {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<i64>,
}

impl From<&ServiceError> for ErrorView {
    fn from(err: &ServiceError) -> Self {
        let (phase, random_seed) = match err {
            ServiceError::ExerciseInvalid {
                phase, random_seed, ..
            } => (Some(phase.as_str()), Some(*random_seed)),
            _ => (None, None),
        };
        Self {
            code: err.code(),
            message: err.to_string(),
            phase,
            random_seed,
        }
    }
}
