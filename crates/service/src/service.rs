#![forbid(unsafe_code)]

use crate::error::ServiceError;
use crate::instantiate::TemplateEngine;
use crate::support::request_log::RequestLog;
use std::path::Path;
use xv_storage::SqliteStore;

/// Operation surface over the exercise store and the lockable entries, as
/// consumed by a transport layer. Every operation runs inside one storage
/// transaction; template instantiation happens after the read commits.
pub struct ContentService {
    pub(crate) store: SqliteStore,
    pub(crate) engine: Box<dyn TemplateEngine>,
    pub(crate) log: RequestLog,
}

impl ContentService {
    pub fn open(
        storage_dir: impl AsRef<Path>,
        engine: Box<dyn TemplateEngine>,
    ) -> Result<Self, ServiceError> {
        let store = SqliteStore::open(storage_dir)?;
        let log = RequestLog::new(store.storage_dir());
        Ok(Self { store, engine, log })
    }

    pub fn storage_dir(&self) -> &Path {
        self.store.storage_dir()
    }
}
