#![forbid(unsafe_code)]

use xv_core::model::{Branch, RetractScope, VersionRef};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateExerciseRequest {
    pub exercise_id: String,
    pub version: String,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadExerciseRequest {
    pub exercise_id: String,
    pub reference: VersionRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishExerciseRequest {
    pub exercise_id: String,
    pub reference: VersionRef,
    pub target: Branch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetractExerciseRequest {
    pub exercise_id: String,
    pub scope: RetractScope,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CreateEntryRequest {
    pub data: serde_json::Value,
    pub request_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateEntryRequest {
    pub id: i64,
    pub owner: String,
    pub data: serde_json::Value,
    pub request_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteEntryRequest {
    pub id: i64,
    pub owner: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockEntryRequest {
    pub id: i64,
    pub owner: String,
    pub request_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockEntryRequest {
    pub id: i64,
    pub owner: String,
}
