#![forbid(unsafe_code)]

use crate::error::ServiceError;
use crate::instantiate::GeneratedInstance;
use crate::requests::{ListRequest, PublishRequest, ReadRequest, RetractRequest, UpdateRequest};
use crate::service::ContentService;
use xv_core::model::Branch;
use xv_storage::{
    PointerRow, PublishExerciseRequest, ReadExerciseRequest, RetractExerciseRequest,
    UpdateExerciseRequest, VersionRow,
};

/// Outcome of a read: the stored record verbatim, plus a generated instance
/// when a random seed was supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadResult {
    pub record: VersionRow,
    pub instance: Option<GeneratedInstance>,
}

impl ContentService {
    pub fn read(&mut self, request: ReadRequest) -> Result<ReadResult, ServiceError> {
        self.log.note("exercise.read", &request.exercise_id);

        let record = self.store.exercise_read(ReadExerciseRequest {
            exercise_id: request.exercise_id,
            reference: request.reference,
        })?;

        let instance = match request.random_seed {
            Some(random_seed) => Some(
                self.engine
                    .instantiate(&record.data, random_seed, request.make_derivative)
                    .map_err(|err| ServiceError::ExerciseInvalid {
                        phase: err.phase,
                        message: err.message,
                        random_seed,
                    })?,
            ),
            None => None,
        };

        Ok(ReadResult { record, instance })
    }

    pub fn update(&mut self, request: UpdateRequest) -> Result<VersionRow, ServiceError> {
        self.log.note("exercise.update", &request.exercise_id);

        Ok(self.store.exercise_update(UpdateExerciseRequest {
            exercise_id: request.exercise_id,
            version: request.version,
            data: request.data,
        })?)
    }

    pub fn publish(&mut self, request: PublishRequest) -> Result<PointerRow, ServiceError> {
        self.log.note("exercise.publish", &request.exercise_id);

        Ok(self.store.exercise_publish(PublishExerciseRequest {
            exercise_id: request.exercise_id,
            reference: request.reference,
            target: request.target,
        })?)
    }

    pub fn retract(&mut self, request: RetractRequest) -> Result<Vec<Branch>, ServiceError> {
        self.log.note("exercise.retract", &request.exercise_id);

        Ok(self.store.exercise_retract(RetractExerciseRequest {
            exercise_id: request.exercise_id,
            scope: request.scope,
        })?)
    }

    pub fn list(&self, request: ListRequest) -> Result<Vec<String>, ServiceError> {
        self.log.note("exercise.list", request.branch.as_str());

        Ok(self.store.exercise_list(request.branch)?)
    }
}
