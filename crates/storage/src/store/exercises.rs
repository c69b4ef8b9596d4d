use super::*;
use rusqlite::{Transaction, params};
use xv_core::model::{Branch, VersionRef};

impl SqliteStore {
    /// Upserts the version record and unconditionally moves the testing
    /// pointer to it, in one transaction. Fresh work is only ever exposed
    /// on testing; published moves via `exercise_publish`.
    pub fn exercise_update(
        &mut self,
        request: UpdateExerciseRequest,
    ) -> Result<VersionRow, StoreError> {
        let exercise_id = canonicalize_exercise(&request.exercise_id)?;
        let version = canonicalize_version(&request.version)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let row = versions::version_put_tx(&tx, &exercise_id, &version, &request.data, now_ms)?;
        pointers::pointer_set_tx(&tx, Branch::Testing, &exercise_id, &version, now_ms)?;
        tx.commit()?;
        Ok(row)
    }

    /// Resolves a branch tag or takes the literal version, then loads the
    /// stored record verbatim.
    pub fn exercise_read(
        &mut self,
        request: ReadExerciseRequest,
    ) -> Result<VersionRow, StoreError> {
        let exercise_id = canonicalize_exercise(&request.exercise_id)?;
        let reference = canonicalize_reference(&request.reference)?;

        let tx = self.conn.transaction()?;
        let version = resolve_reference_tx(&tx, &exercise_id, &reference)?;
        let row = versions::version_get_tx(&tx, &exercise_id, &version)?
            .ok_or(StoreError::UnknownVersion)?;
        tx.commit()?;
        Ok(row)
    }

    /// Resolves the source reference, validates the version exists, then
    /// moves the target pointer to it.
    pub fn exercise_publish(
        &mut self,
        request: PublishExerciseRequest,
    ) -> Result<PointerRow, StoreError> {
        let exercise_id = canonicalize_exercise(&request.exercise_id)?;
        let reference = canonicalize_reference(&request.reference)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let version = resolve_reference_tx(&tx, &exercise_id, &reference)?;
        versions::ensure_version_exists_tx(&tx, &exercise_id, &version)?;
        pointers::pointer_set_tx(&tx, request.target, &exercise_id, &version, now_ms)?;
        tx.commit()?;
        Ok(PointerRow {
            branch: request.target,
            exercise_id,
            version,
            updated_at_ms: now_ms,
        })
    }

    /// Deletes the pointer for each branch in scope. Missing pointers are
    /// not errors; the returned branches are the ones actually removed.
    pub fn exercise_retract(
        &mut self,
        request: RetractExerciseRequest,
    ) -> Result<Vec<Branch>, StoreError> {
        let exercise_id = canonicalize_exercise(&request.exercise_id)?;

        let tx = self.conn.transaction()?;
        let mut removed = Vec::new();
        for branch in request.scope.branches() {
            if pointers::pointer_delete_tx(&tx, *branch, &exercise_id)? {
                removed.push(*branch);
            }
        }
        tx.commit()?;
        Ok(removed)
    }

    pub fn exercise_list(&self, branch: Branch) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT exercise FROM branch_pointers WHERE branch=?1 ORDER BY exercise ASC",
        )?;
        let rows = stmt.query_map(params![branch.as_str()], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn canonicalize_reference(reference: &VersionRef) -> Result<VersionRef, StoreError> {
    match reference {
        VersionRef::Branch(branch) => Ok(VersionRef::Branch(*branch)),
        VersionRef::Version(version) => {
            Ok(VersionRef::Version(canonicalize_version(version)?))
        }
    }
}

fn resolve_reference_tx(
    tx: &Transaction<'_>,
    exercise_id: &str,
    reference: &VersionRef,
) -> Result<String, StoreError> {
    match reference {
        VersionRef::Branch(branch) => pointers::pointer_get_tx(tx, *branch, exercise_id)?
            .ok_or(StoreError::UnknownBranchEntry),
        VersionRef::Version(version) => Ok(version.clone()),
    }
}
