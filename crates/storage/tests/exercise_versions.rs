#![forbid(unsafe_code)]

use std::path::PathBuf;
use xv_core::model::{Branch, VersionRef};
use xv_storage::{ReadExerciseRequest, SqliteStore, StoreError, UpdateExerciseRequest};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("xv_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn read_version(
    store: &mut SqliteStore,
    exercise_id: &str,
    version: &str,
) -> Result<xv_storage::VersionRow, StoreError> {
    store.exercise_read(ReadExerciseRequest {
        exercise_id: exercise_id.to_string(),
        reference: VersionRef::Version(version.to_string()),
    })
}

#[test]
fn round_trip_bytes() {
    let storage_dir = temp_dir("round_trip_bytes");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let payload: Vec<u8> = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff, 0x7f, 0x0a];
    store
        .exercise_update(UpdateExerciseRequest {
            exercise_id: "E1".to_string(),
            version: "v1".to_string(),
            data: payload.clone(),
        })
        .expect("update");

    let row = read_version(&mut store, "E1", "v1").expect("read literal");
    assert_eq!(row.data, payload);
    assert_eq!(row.exercise_id, "E1".to_string());
    assert_eq!(row.version, "v1".to_string());
    assert!(row.last_updated_at_ms.is_none());
}

#[test]
fn reupdate_replaces_in_place() {
    let storage_dir = temp_dir("reupdate_replaces_in_place");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    store
        .exercise_update(UpdateExerciseRequest {
            exercise_id: "E1".to_string(),
            version: "v1".to_string(),
            data: b"first".to_vec(),
        })
        .expect("first update");
    let first = read_version(&mut store, "E1", "v1").expect("read first");

    store
        .exercise_update(UpdateExerciseRequest {
            exercise_id: "E1".to_string(),
            version: "v1".to_string(),
            data: b"second".to_vec(),
        })
        .expect("second update");
    let second = read_version(&mut store, "E1", "v1").expect("read second");

    // Same version record: bytes replaced, created stamp kept, update stamped.
    assert_eq!(second.data, b"second".to_vec());
    assert_eq!(second.created_at_ms, first.created_at_ms);
    assert!(second.last_updated_at_ms.is_some());
}

#[test]
fn versions_are_independent() {
    let storage_dir = temp_dir("versions_are_independent");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    store
        .exercise_update(UpdateExerciseRequest {
            exercise_id: "E1".to_string(),
            version: "v1".to_string(),
            data: b"one".to_vec(),
        })
        .expect("update v1");
    store
        .exercise_update(UpdateExerciseRequest {
            exercise_id: "E1".to_string(),
            version: "v2".to_string(),
            data: b"two".to_vec(),
        })
        .expect("update v2");

    assert_eq!(
        read_version(&mut store, "E1", "v1").expect("read v1").data,
        b"one".to_vec()
    );
    assert_eq!(
        read_version(&mut store, "E1", "v2").expect("read v2").data,
        b"two".to_vec()
    );
}

#[test]
fn read_unknown_version_fails() {
    let storage_dir = temp_dir("read_unknown_version_fails");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let err = read_version(&mut store, "E1", "v1").expect_err("nothing stored");
    assert!(matches!(err, StoreError::UnknownVersion));
}

#[test]
fn read_unknown_branch_entry_fails() {
    let storage_dir = temp_dir("read_unknown_branch_entry_fails");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let err = store
        .exercise_read(ReadExerciseRequest {
            exercise_id: "E1".to_string(),
            reference: VersionRef::Branch(Branch::Published),
        })
        .expect_err("no pointer");
    assert!(matches!(err, StoreError::UnknownBranchEntry));
}

#[test]
fn blank_identifiers_are_rejected() {
    let storage_dir = temp_dir("blank_identifiers_are_rejected");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let err = store
        .exercise_update(UpdateExerciseRequest {
            exercise_id: "   ".to_string(),
            version: "v1".to_string(),
            data: b"x".to_vec(),
        })
        .expect_err("blank exercise id");
    match err {
        StoreError::InvalidInput(msg) => assert_eq!(msg, "invalid exercise id"),
        other => panic!("expected InvalidInput error, got {other:?}"),
    }

    let err = store
        .exercise_update(UpdateExerciseRequest {
            exercise_id: "E1".to_string(),
            version: "".to_string(),
            data: b"x".to_vec(),
        })
        .expect_err("blank version");
    match err {
        StoreError::InvalidInput(msg) => assert_eq!(msg, "invalid version label"),
        other => panic!("expected InvalidInput error, got {other:?}"),
    }
}

#[test]
fn identifiers_are_trimmed() {
    let storage_dir = temp_dir("identifiers_are_trimmed");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    store
        .exercise_update(UpdateExerciseRequest {
            exercise_id: " E1 ".to_string(),
            version: " v1 ".to_string(),
            data: b"x".to_vec(),
        })
        .expect("update with padded ids");

    let row = read_version(&mut store, "E1", "v1").expect("read canonical");
    assert_eq!(row.data, b"x".to_vec());
}

#[test]
fn reopen_preserves_state() {
    let storage_dir = temp_dir("reopen_preserves_state");

    {
        let mut store = SqliteStore::open(&storage_dir).expect("open store");
        store
            .exercise_update(UpdateExerciseRequest {
                exercise_id: "E1".to_string(),
                version: "v1".to_string(),
                data: b"persisted".to_vec(),
            })
            .expect("update");
    }

    let mut store = SqliteStore::open(&storage_dir).expect("reopen store");
    let row = read_version(&mut store, "E1", "v1").expect("read after reopen");
    assert_eq!(row.data, b"persisted".to_vec());
    let listed = store.exercise_list(Branch::Testing).expect("list testing");
    assert_eq!(listed, vec!["E1".to_string()]);
}
