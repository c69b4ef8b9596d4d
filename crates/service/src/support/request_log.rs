#![forbid(unsafe_code)]

use crate::support::time::now_rfc3339;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only operation log next to the database. Writes are best-effort:
/// a failed append never fails the request it records.
#[derive(Clone, Debug)]
pub(crate) struct RequestLog {
    path: PathBuf,
}

impl RequestLog {
    pub(crate) fn new(storage_dir: &Path) -> Self {
        Self {
            path: storage_dir.join("exvault_requests.log"),
        }
    }

    pub(crate) fn note(&self, op: &str, detail: &str) {
        let line = format!("{} {op} {detail}\n", now_rfc3339());
        let _ = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
    }
}
