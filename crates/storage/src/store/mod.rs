#![forbid(unsafe_code)]

mod entries;
mod error;
mod exercises;
mod pointers;
mod requests;
mod versions;

pub use error::StoreError;
pub use requests::*;

use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use xv_core::ids::canonical_identifier;
use xv_core::model::Branch;

const SCHEMA_VERSION: i64 = 1;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

/// One immutable snapshot of an exercise payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionRow {
    pub exercise_id: String,
    pub version: String,
    pub data: Vec<u8>,
    pub created_at_ms: i64,
    pub last_updated_at_ms: Option<i64>,
}

/// Live branch pointer for one exercise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerRow {
    pub branch: Branch,
    pub exercise_id: String,
    pub version: String,
    pub updated_at_ms: i64,
}

/// Lockable JSON entry with audit stamps for each state change.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryRow {
    pub id: i64,
    pub data: serde_json::Value,
    pub locked_by: Option<String>,
    pub created_at_ms: i64,
    pub last_modified_at_ms: Option<i64>,
    pub locked_at_ms: Option<i64>,
    pub created_request_id: Option<String>,
    pub last_modified_request_id: Option<String>,
    pub locked_request_id: Option<String>,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join("exvault.db");
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        preflight_gate(&conn)?;
        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn preflight_gate(conn: &Connection) -> Result<(), StoreError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
    )?;
    let mut rows = stmt.query([])?;
    let mut tables = BTreeSet::new();
    while let Some(row) = rows.next()? {
        tables.insert(row.get::<_, String>(0)?);
    }

    if tables.is_empty() {
        return Ok(());
    }

    let required: BTreeSet<&str> = [
        "store_state",
        "exercise_versions",
        "branch_pointers",
        "entries",
    ]
    .into_iter()
    .collect();

    if tables
        .iter()
        .any(|table| !required.contains(table.as_str()))
    {
        return Err(StoreError::InvalidInput(
            "RESET_REQUIRED: unsupported tables detected",
        ));
    }

    for table in required {
        if !tables.contains(table) {
            return Err(StoreError::InvalidInput(
                "RESET_REQUIRED: required table is missing",
            ));
        }
    }

    let version = conn
        .query_row(
            "SELECT schema_version FROM store_state WHERE singleton=1",
            [],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;

    match version {
        Some(v) if v == SCHEMA_VERSION => Ok(()),
        Some(_) => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema version mismatch",
        )),
        None => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema state row is missing",
        )),
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    let now_ms = now_ms();

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS store_state (
          singleton INTEGER PRIMARY KEY CHECK(singleton = 1),
          schema_version INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS exercise_versions (
          exercise TEXT NOT NULL,
          version TEXT NOT NULL,
          data BLOB NOT NULL,
          created_at_ms INTEGER NOT NULL,
          last_updated_at_ms INTEGER,
          PRIMARY KEY(exercise, version)
        );

        CREATE TABLE IF NOT EXISTS branch_pointers (
          branch TEXT NOT NULL CHECK(branch IN ('testing', 'published')),
          exercise TEXT NOT NULL,
          version TEXT NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          PRIMARY KEY(branch, exercise)
        );

        CREATE TABLE IF NOT EXISTS entries (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          data TEXT NOT NULL,
          locked_by TEXT,
          created_at_ms INTEGER NOT NULL,
          last_modified_at_ms INTEGER,
          locked_at_ms INTEGER,
          created_request_id TEXT,
          last_modified_request_id TEXT,
          locked_request_id TEXT,
          CHECK(locked_by IS NULL OR locked_at_ms IS NOT NULL)
        );

        CREATE INDEX IF NOT EXISTS idx_entries_created
          ON entries(created_at_ms DESC, id DESC);
        "#,
    )?;

    conn.execute(
        "INSERT INTO store_state(singleton, schema_version, created_at_ms, updated_at_ms) \
         VALUES (1, ?1, ?2, ?2) \
         ON CONFLICT(singleton) DO UPDATE SET schema_version=excluded.schema_version, updated_at_ms=excluded.updated_at_ms",
        params![SCHEMA_VERSION, now_ms],
    )?;

    Ok(())
}

fn canonicalize_exercise(value: &str) -> Result<String, StoreError> {
    canonical_identifier(value).map_err(|_| StoreError::InvalidInput("invalid exercise id"))
}

fn canonicalize_version(value: &str) -> Result<String, StoreError> {
    canonical_identifier(value).map_err(|_| StoreError::InvalidInput("invalid version label"))
}

fn canonicalize_owner(value: &str) -> Result<String, StoreError> {
    canonical_identifier(value).map_err(|_| StoreError::InvalidInput("invalid owner"))
}

fn canonicalize_request_id(value: Option<&str>) -> Result<Option<String>, StoreError> {
    value
        .map(|raw| {
            canonical_identifier(raw).map_err(|_| StoreError::InvalidInput("invalid request id"))
        })
        .transpose()
}

fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration,
        Err(_) => return 0,
    };

    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}
