#![forbid(unsafe_code)]

use crate::error::ServiceError;
use crate::requests::{
    EntryCreateRequest, EntryDeleteRequest, EntryLockRequest, EntryUnlockRequest,
    EntryUpdateRequest,
};
use crate::service::ContentService;
use xv_core::ids::canonical_identifier;
use xv_storage::{
    CreateEntryRequest, DeleteEntryRequest, EntryRow, LockEntryRequest, UnlockEntryRequest,
    UpdateEntryRequest,
};

impl ContentService {
    pub fn entry_create(&mut self, request: EntryCreateRequest) -> Result<EntryRow, ServiceError> {
        let owner = canonical_owner(&request.owner)?;
        self.log.note("entry.create", &owner);

        Ok(self.store.entry_create(CreateEntryRequest {
            data: request.data,
            request_id: request.request_id,
        })?)
    }

    pub fn entry_read(&mut self, id: i64) -> Result<EntryRow, ServiceError> {
        self.store
            .entry_get(id)?
            .ok_or(ServiceError::NotFound("no such entry"))
    }

    pub fn entry_update(&mut self, request: EntryUpdateRequest) -> Result<EntryRow, ServiceError> {
        self.log.note("entry.update", &request.id.to_string());

        Ok(self.store.entry_update(UpdateEntryRequest {
            id: request.id,
            owner: request.owner,
            data: request.data,
            request_id: request.request_id,
        })?)
    }

    pub fn entry_delete(&mut self, request: EntryDeleteRequest) -> Result<EntryRow, ServiceError> {
        self.log.note("entry.delete", &request.id.to_string());

        Ok(self.store.entry_delete(DeleteEntryRequest {
            id: request.id,
            owner: request.owner,
        })?)
    }

    pub fn entry_lock(&mut self, request: EntryLockRequest) -> Result<EntryRow, ServiceError> {
        self.log.note("entry.lock", &request.id.to_string());

        Ok(self.store.entry_lock(LockEntryRequest {
            id: request.id,
            owner: request.owner,
            request_id: request.request_id,
        })?)
    }

    pub fn entry_unlock(&mut self, request: EntryUnlockRequest) -> Result<EntryRow, ServiceError> {
        self.log.note("entry.unlock", &request.id.to_string());

        Ok(self.store.entry_unlock(UnlockEntryRequest {
            id: request.id,
            owner: request.owner,
        })?)
    }

    pub fn entry_list(&self) -> Result<Vec<EntryRow>, ServiceError> {
        Ok(self.store.entry_list()?)
    }
}

fn canonical_owner(owner: &str) -> Result<String, ServiceError> {
    canonical_identifier(owner).map_err(|_| ServiceError::BadRequest("invalid owner".to_string()))
}
