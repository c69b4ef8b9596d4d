use super::*;
use rusqlite::{OptionalExtension, Transaction, params};

pub(crate) fn version_put_tx(
    tx: &Transaction<'_>,
    exercise_id: &str,
    version: &str,
    data: &[u8],
    now_ms: i64,
) -> Result<VersionRow, StoreError> {
    // created_at is written once; a replace touches only data and last_updated.
    tx.execute(
        "INSERT INTO exercise_versions(exercise, version, data, created_at_ms, last_updated_at_ms) \
         VALUES (?1, ?2, ?3, ?4, NULL) \
         ON CONFLICT(exercise, version) DO UPDATE SET data=excluded.data, last_updated_at_ms=?4",
        params![exercise_id, version, data, now_ms],
    )?;

    match version_get_tx(tx, exercise_id, version)? {
        Some(row) => Ok(row),
        None => Err(StoreError::InvalidInput("version row missing after upsert")),
    }
}

pub(crate) fn version_get_tx(
    tx: &Transaction<'_>,
    exercise_id: &str,
    version: &str,
) -> Result<Option<VersionRow>, StoreError> {
    Ok(tx
        .query_row(
            "SELECT exercise, version, data, created_at_ms, last_updated_at_ms \
             FROM exercise_versions WHERE exercise=?1 AND version=?2",
            params![exercise_id, version],
            |row| {
                Ok(VersionRow {
                    exercise_id: row.get::<_, String>(0)?,
                    version: row.get::<_, String>(1)?,
                    data: row.get::<_, Vec<u8>>(2)?,
                    created_at_ms: row.get::<_, i64>(3)?,
                    last_updated_at_ms: row.get::<_, Option<i64>>(4)?,
                })
            },
        )
        .optional()?)
}

pub(crate) fn version_exists_tx(
    tx: &Transaction<'_>,
    exercise_id: &str,
    version: &str,
) -> Result<bool, StoreError> {
    Ok(tx
        .query_row(
            "SELECT 1 FROM exercise_versions WHERE exercise=?1 AND version=?2",
            params![exercise_id, version],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some())
}

pub(crate) fn ensure_version_exists_tx(
    tx: &Transaction<'_>,
    exercise_id: &str,
    version: &str,
) -> Result<(), StoreError> {
    if version_exists_tx(tx, exercise_id, version)? {
        Ok(())
    } else {
        Err(StoreError::UnknownVersion)
    }
}
