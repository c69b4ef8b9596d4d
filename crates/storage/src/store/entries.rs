use super::*;
use rusqlite::{OptionalExtension, Transaction, params};
use xv_core::lock::{self, LockTransition, UnlockTransition};

type RawEntry = (
    i64,
    String,
    Option<String>,
    i64,
    Option<i64>,
    Option<i64>,
    Option<String>,
    Option<String>,
    Option<String>,
);

impl SqliteStore {
    pub fn entry_create(&mut self, request: CreateEntryRequest) -> Result<EntryRow, StoreError> {
        let request_id = canonicalize_request_id(request.request_id.as_deref())?;
        let data = request.data.to_string();

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO entries(data, created_at_ms, created_request_id) VALUES (?1, ?2, ?3)",
            params![data, now_ms, request_id],
        )?;
        let id = tx.last_insert_rowid();
        let row = entry_get_tx(&tx, id)?.ok_or(StoreError::UnknownEntry)?;
        tx.commit()?;
        Ok(row)
    }

    pub fn entry_get(&mut self, id: i64) -> Result<Option<EntryRow>, StoreError> {
        let tx = self.conn.transaction()?;
        let row = entry_get_tx(&tx, id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Replaces the entry payload. Allowed while unlocked or when the caller
    /// holds the lock; lock state itself is untouched.
    pub fn entry_update(&mut self, request: UpdateEntryRequest) -> Result<EntryRow, StoreError> {
        let owner = canonicalize_owner(&request.owner)?;
        let request_id = canonicalize_request_id(request.request_id.as_deref())?;
        let data = request.data.to_string();

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let row = entry_get_tx(&tx, request.id)?.ok_or(StoreError::UnknownEntry)?;
        ensure_not_locked_for(&row, &owner)?;
        tx.execute(
            "UPDATE entries SET data=?2, last_modified_at_ms=?3, last_modified_request_id=?4 \
             WHERE id=?1",
            params![request.id, data, now_ms, request_id],
        )?;
        let row = entry_get_tx(&tx, request.id)?.ok_or(StoreError::UnknownEntry)?;
        tx.commit()?;
        Ok(row)
    }

    /// Removes the entry and returns the row as it was at deletion time.
    pub fn entry_delete(&mut self, request: DeleteEntryRequest) -> Result<EntryRow, StoreError> {
        let owner = canonicalize_owner(&request.owner)?;

        let tx = self.conn.transaction()?;
        let row = entry_get_tx(&tx, request.id)?.ok_or(StoreError::UnknownEntry)?;
        ensure_not_locked_for(&row, &owner)?;
        tx.execute("DELETE FROM entries WHERE id=?1", params![request.id])?;
        tx.commit()?;
        Ok(row)
    }

    /// Re-locking by the current holder is a no-op: the original lock stamp
    /// and request id are kept.
    pub fn entry_lock(&mut self, request: LockEntryRequest) -> Result<EntryRow, StoreError> {
        let owner = canonicalize_owner(&request.owner)?;
        let request_id = canonicalize_request_id(request.request_id.as_deref())?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let row = entry_get_tx(&tx, request.id)?.ok_or(StoreError::UnknownEntry)?;
        match lock::lock_transition(row.locked_by.as_deref(), &owner) {
            LockTransition::Acquire => {
                tx.execute(
                    "UPDATE entries SET locked_by=?2, locked_at_ms=?3, locked_request_id=?4 \
                     WHERE id=?1",
                    params![request.id, owner, now_ms, request_id],
                )?;
            }
            LockTransition::AlreadyHeld => {}
            LockTransition::Conflict => {
                return Err(StoreError::EntryLocked {
                    locked_by: row.locked_by.unwrap_or_default(),
                });
            }
        }
        let row = entry_get_tx(&tx, request.id)?.ok_or(StoreError::UnknownEntry)?;
        tx.commit()?;
        Ok(row)
    }

    pub fn entry_unlock(&mut self, request: UnlockEntryRequest) -> Result<EntryRow, StoreError> {
        let owner = canonicalize_owner(&request.owner)?;

        let tx = self.conn.transaction()?;
        let row = entry_get_tx(&tx, request.id)?.ok_or(StoreError::UnknownEntry)?;
        match lock::unlock_transition(row.locked_by.as_deref(), &owner) {
            UnlockTransition::Release => {
                tx.execute(
                    "UPDATE entries SET locked_by=NULL, locked_at_ms=NULL, locked_request_id=NULL \
                     WHERE id=?1",
                    params![request.id],
                )?;
            }
            UnlockTransition::AlreadyUnlocked => {}
            UnlockTransition::Conflict => {
                return Err(StoreError::EntryLocked {
                    locked_by: row.locked_by.unwrap_or_default(),
                });
            }
        }
        let row = entry_get_tx(&tx, request.id)?.ok_or(StoreError::UnknownEntry)?;
        tx.commit()?;
        Ok(row)
    }

    /// Newest first; entries created in the same millisecond fall back to
    /// insertion order, still newest first.
    pub fn entry_list(&self) -> Result<Vec<EntryRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, data, locked_by, created_at_ms, last_modified_at_ms, locked_at_ms, \
                    created_request_id, last_modified_request_id, locked_request_id \
             FROM entries ORDER BY created_at_ms DESC, id DESC",
        )?;
        let rows = stmt.query_map([], read_raw_entry)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(entry_row_from_parts(row?)?);
        }
        Ok(out)
    }
}

fn ensure_not_locked_for(row: &EntryRow, owner: &str) -> Result<(), StoreError> {
    if lock::locked_for(row.locked_by.as_deref(), owner) {
        return Err(StoreError::EntryLocked {
            locked_by: row.locked_by.clone().unwrap_or_default(),
        });
    }
    Ok(())
}

fn entry_get_tx(tx: &Transaction<'_>, id: i64) -> Result<Option<EntryRow>, StoreError> {
    tx.query_row(
        "SELECT id, data, locked_by, created_at_ms, last_modified_at_ms, locked_at_ms, \
                created_request_id, last_modified_request_id, locked_request_id \
         FROM entries WHERE id=?1",
        params![id],
        read_raw_entry,
    )
    .optional()?
    .map(entry_row_from_parts)
    .transpose()
}

fn read_raw_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEntry> {
    Ok((
        row.get::<_, i64>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, Option<String>>(2)?,
        row.get::<_, i64>(3)?,
        row.get::<_, Option<i64>>(4)?,
        row.get::<_, Option<i64>>(5)?,
        row.get::<_, Option<String>>(6)?,
        row.get::<_, Option<String>>(7)?,
        row.get::<_, Option<String>>(8)?,
    ))
}

fn entry_row_from_parts(parts: RawEntry) -> Result<EntryRow, StoreError> {
    let (
        id,
        data,
        locked_by,
        created_at_ms,
        last_modified_at_ms,
        locked_at_ms,
        created_request_id,
        last_modified_request_id,
        locked_request_id,
    ) = parts;

    let data = serde_json::from_str(&data)
        .map_err(|_| StoreError::InvalidInput("invalid entry data row"))?;

    Ok(EntryRow {
        id,
        data,
        locked_by,
        created_at_ms,
        last_modified_at_ms,
        locked_at_ms,
        created_request_id,
        last_modified_request_id,
        locked_request_id,
    })
}
