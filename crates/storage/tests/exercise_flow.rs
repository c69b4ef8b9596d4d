#![forbid(unsafe_code)]

use std::path::PathBuf;
use xv_core::model::{Branch, RetractScope, VersionRef};
use xv_storage::{
    PublishExerciseRequest, ReadExerciseRequest, RetractExerciseRequest, SqliteStore, StoreError,
    UpdateExerciseRequest,
};

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

fn open_store(test_name: &str) -> SqliteStore {
    SqliteStore::open(temp_dir(test_name)).expect("open store")
}

fn update(store: &mut SqliteStore, exercise_id: &str, version: &str, data: &[u8]) {
    store
        .exercise_update(UpdateExerciseRequest {
            exercise_id: exercise_id.to_string(),
            version: version.to_string(),
            data: data.to_vec(),
        })
        .expect("update exercise");
}

fn read_branch(
    store: &mut SqliteStore,
    exercise_id: &str,
    branch: Branch,
) -> Result<Vec<u8>, StoreError> {
    store
        .exercise_read(ReadExerciseRequest {
            exercise_id: exercise_id.to_string(),
            reference: VersionRef::Branch(branch),
        })
        .map(|row| row.data)
}

#[test]
fn update_moves_testing_pointer() {
    let mut store = open_store("update_moves_testing_pointer");
    update(&mut store, "E1", "v1", b"ZIP1");

    let listed = store.exercise_list(Branch::Testing).expect("list testing");
    assert_eq!(listed, vec!["E1".to_string()]);

    let data = read_branch(&mut store, "E1", Branch::Testing).expect("read testing");
    assert_eq!(data, b"ZIP1".to_vec());

    update(&mut store, "E1", "v2", b"ZIP2");
    let data = read_branch(&mut store, "E1", Branch::Testing).expect("read testing");
    assert_eq!(data, b"ZIP2".to_vec());
}

#[test]
fn update_never_touches_published() {
    let mut store = open_store("update_never_touches_published");
    update(&mut store, "E1", "v1", b"ZIP1");

    let err = read_branch(&mut store, "E1", Branch::Published).expect_err("not published");
    assert!(matches!(err, StoreError::UnknownBranchEntry));
    assert!(
        store
            .exercise_list(Branch::Published)
            .expect("list published")
            .is_empty()
    );
}

#[test]
fn publish_defaults_from_testing_pointer() {
    let mut store = open_store("publish_defaults_from_testing_pointer");
    update(&mut store, "E1", "v1", b"ZIP1");

    let pointer = store
        .exercise_publish(PublishExerciseRequest {
            exercise_id: "E1".to_string(),
            reference: VersionRef::Branch(Branch::Testing),
            target: Branch::Published,
        })
        .expect("publish");
    assert_eq!(pointer.branch, Branch::Published);
    assert_eq!(pointer.version, "v1".to_string());

    let data = read_branch(&mut store, "E1", Branch::Published).expect("read published");
    assert_eq!(data, b"ZIP1".to_vec());
}

#[test]
fn publish_literal_version() {
    let mut store = open_store("publish_literal_version");
    update(&mut store, "E1", "v1", b"ZIP1");
    update(&mut store, "E1", "v2", b"ZIP2");

    // Testing now points at v2; publishing the older version directly must work.
    store
        .exercise_publish(PublishExerciseRequest {
            exercise_id: "E1".to_string(),
            reference: VersionRef::Version("v1".to_string()),
            target: Branch::Published,
        })
        .expect("publish v1");

    let data = read_branch(&mut store, "E1", Branch::Published).expect("read published");
    assert_eq!(data, b"ZIP1".to_vec());
    let data = read_branch(&mut store, "E1", Branch::Testing).expect("read testing");
    assert_eq!(data, b"ZIP2".to_vec());
}

#[test]
fn publish_is_idempotent() {
    let mut store = open_store("publish_is_idempotent");
    update(&mut store, "E1", "v1", b"ZIP1");

    for _ in 0..2 {
        let pointer = store
            .exercise_publish(PublishExerciseRequest {
                exercise_id: "E1".to_string(),
                reference: VersionRef::Branch(Branch::Testing),
                target: Branch::Published,
            })
            .expect("publish");
        assert_eq!(pointer.version, "v1".to_string());
    }

    let data = read_branch(&mut store, "E1", Branch::Published).expect("read published");
    assert_eq!(data, b"ZIP1".to_vec());
}

#[test]
fn publish_missing_source_fails() {
    let mut store = open_store("publish_missing_source_fails");

    let err = store
        .exercise_publish(PublishExerciseRequest {
            exercise_id: "E1".to_string(),
            reference: VersionRef::Branch(Branch::Testing),
            target: Branch::Published,
        })
        .expect_err("nothing to publish");
    assert!(matches!(err, StoreError::UnknownBranchEntry));

    update(&mut store, "E1", "v1", b"ZIP1");
    let err = store
        .exercise_publish(PublishExerciseRequest {
            exercise_id: "E1".to_string(),
            reference: VersionRef::Version("v404".to_string()),
            target: Branch::Published,
        })
        .expect_err("unknown literal version");
    assert!(matches!(err, StoreError::UnknownVersion));
}

#[test]
fn retract_is_idempotent() {
    let mut store = open_store("retract_is_idempotent");

    let removed = store
        .exercise_retract(RetractExerciseRequest {
            exercise_id: "E1".to_string(),
            scope: RetractScope::Published,
        })
        .expect("retract with no pointer");
    assert!(removed.is_empty());
}

#[test]
fn retract_published_keeps_testing() {
    let mut store = open_store("retract_published_keeps_testing");
    update(&mut store, "E1", "v1", b"ZIP1");
    store
        .exercise_publish(PublishExerciseRequest {
            exercise_id: "E1".to_string(),
            reference: VersionRef::Branch(Branch::Testing),
            target: Branch::Published,
        })
        .expect("publish");

    let removed = store
        .exercise_retract(RetractExerciseRequest {
            exercise_id: "E1".to_string(),
            scope: RetractScope::Published,
        })
        .expect("retract published");
    assert_eq!(removed, vec![Branch::Published]);

    let err = read_branch(&mut store, "E1", Branch::Published).expect_err("retracted");
    assert!(matches!(err, StoreError::UnknownBranchEntry));
    let data = read_branch(&mut store, "E1", Branch::Testing).expect("testing survives");
    assert_eq!(data, b"ZIP1".to_vec());
}

#[test]
fn retract_both_clears_everything() {
    let mut store = open_store("retract_both_clears_everything");
    update(&mut store, "E1", "v1", b"ZIP1");
    store
        .exercise_publish(PublishExerciseRequest {
            exercise_id: "E1".to_string(),
            reference: VersionRef::Branch(Branch::Testing),
            target: Branch::Published,
        })
        .expect("publish");

    let removed = store
        .exercise_retract(RetractExerciseRequest {
            exercise_id: "E1".to_string(),
            scope: RetractScope::Both,
        })
        .expect("retract both");
    assert_eq!(removed, vec![Branch::Testing, Branch::Published]);

    for branch in [Branch::Testing, Branch::Published] {
        let err = read_branch(&mut store, "E1", branch).expect_err("retracted");
        assert!(matches!(err, StoreError::UnknownBranchEntry));
    }
}

#[test]
fn list_orders_exercise_ids() {
    let mut store = open_store("list_orders_exercise_ids");
    update(&mut store, "B", "v1", b"b");
    update(&mut store, "A", "v1", b"a");
    update(&mut store, "C", "v1", b"c");

    let listed = store.exercise_list(Branch::Testing).expect("list testing");
    assert_eq!(
        listed,
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    );
}

#[test]
fn full_lifecycle() {
    let mut store = open_store("full_lifecycle");

    update(&mut store, "E1", "v1", b"ZIP1");
    let listed = store.exercise_list(Branch::Testing).expect("list testing");
    assert_eq!(listed, vec!["E1".to_string()]);

    let err = read_branch(&mut store, "E1", Branch::Published).expect_err("never published");
    assert!(matches!(err, StoreError::UnknownBranchEntry));

    store
        .exercise_publish(PublishExerciseRequest {
            exercise_id: "E1".to_string(),
            reference: VersionRef::Branch(Branch::Testing),
            target: Branch::Published,
        })
        .expect("publish");
    let data = read_branch(&mut store, "E1", Branch::Published).expect("read published");
    assert_eq!(data, b"ZIP1".to_vec());

    store
        .exercise_retract(RetractExerciseRequest {
            exercise_id: "E1".to_string(),
            scope: RetractScope::Both,
        })
        .expect("retract both");
    let err = read_branch(&mut store, "E1", Branch::Published).expect_err("retracted");
    assert!(matches!(err, StoreError::UnknownBranchEntry));
}
