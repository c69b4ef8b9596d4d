#![forbid(unsafe_code)]

use xv_core::model::{Branch, RetractScope, VersionRef};

/// read: resolves a branch tag or serves a literal version. A random seed
/// sends the stored blob through the template engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadRequest {
    pub exercise_id: String,
    pub reference: VersionRef,
    pub random_seed: Option<i64>,
    pub make_derivative: bool,
}

impl ReadRequest {
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            reference: VersionRef::Branch(Branch::Published),
            random_seed: None,
            make_derivative: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRequest {
    pub exercise_id: String,
    pub version: String,
    pub data: Vec<u8>,
}

impl UpdateRequest {
    pub fn new(
        exercise_id: impl Into<String>,
        version: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            version: version.into(),
            data,
        }
    }
}

/// publish: moves the target pointer to whatever the reference resolves to.
/// Defaults mirror the operation contract: source is the testing pointer,
/// target is published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishRequest {
    pub exercise_id: String,
    pub reference: VersionRef,
    pub target: Branch,
}

impl PublishRequest {
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            reference: VersionRef::Branch(Branch::Testing),
            target: Branch::Published,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetractRequest {
    pub exercise_id: String,
    pub scope: RetractScope,
}

impl RetractRequest {
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            scope: RetractScope::Published,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListRequest {
    pub branch: Branch,
}

impl ListRequest {
    pub fn new() -> Self {
        Self {
            branch: Branch::Published,
        }
    }
}

impl Default for ListRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// entry.create: the owner is part of the operation contract for audit
/// logging; the stored row does not carry it.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryCreateRequest {
    pub owner: String,
    pub data: serde_json::Value,
    pub request_id: Option<String>,
}

impl EntryCreateRequest {
    pub fn new(owner: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            owner: owner.into(),
            data,
            request_id: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntryUpdateRequest {
    pub id: i64,
    pub owner: String,
    pub data: serde_json::Value,
    pub request_id: Option<String>,
}

impl EntryUpdateRequest {
    pub fn new(id: i64, owner: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id,
            owner: owner.into(),
            data,
            request_id: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDeleteRequest {
    pub id: i64,
    pub owner: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryLockRequest {
    pub id: i64,
    pub owner: String,
    pub request_id: Option<String>,
}

impl EntryLockRequest {
    pub fn new(id: i64, owner: impl Into<String>) -> Self {
        Self {
            id,
            owner: owner.into(),
            request_id: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryUnlockRequest {
    pub id: i64,
    pub owner: String,
}
