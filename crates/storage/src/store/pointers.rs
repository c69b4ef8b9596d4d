use super::*;
use rusqlite::{OptionalExtension, Transaction, params};
use xv_core::model::Branch;

pub(crate) fn pointer_get_tx(
    tx: &Transaction<'_>,
    branch: Branch,
    exercise_id: &str,
) -> Result<Option<String>, StoreError> {
    Ok(tx
        .query_row(
            "SELECT version FROM branch_pointers WHERE branch=?1 AND exercise=?2",
            params![branch.as_str(), exercise_id],
            |row| row.get::<_, String>(0),
        )
        .optional()?)
}

/// The write itself never crosses into the versions table; callers validate
/// existence inside the same transaction before pointing at a version.
pub(crate) fn pointer_set_tx(
    tx: &Transaction<'_>,
    branch: Branch,
    exercise_id: &str,
    version: &str,
    now_ms: i64,
) -> Result<(), StoreError> {
    tx.execute(
        "INSERT INTO branch_pointers(branch, exercise, version, updated_at_ms) \
         VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT(branch, exercise) DO UPDATE SET version=excluded.version, updated_at_ms=excluded.updated_at_ms",
        params![branch.as_str(), exercise_id, version, now_ms],
    )?;
    Ok(())
}

pub(crate) fn pointer_delete_tx(
    tx: &Transaction<'_>,
    branch: Branch,
    exercise_id: &str,
) -> Result<bool, StoreError> {
    let deleted = tx.execute(
        "DELETE FROM branch_pointers WHERE branch=?1 AND exercise=?2",
        params![branch.as_str(), exercise_id],
    )?;
    Ok(deleted > 0)
}
