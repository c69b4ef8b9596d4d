#![forbid(unsafe_code)]

mod entries;
mod error;
mod exercises;
mod instantiate;
mod requests;
mod service;
mod support;
pub mod views;

pub use error::ServiceError;
pub use exercises::ReadResult;
pub use instantiate::{GeneratedInstance, InstantiateError, InstantiatePhase, TemplateEngine};
pub use requests::*;
pub use service::ContentService;
pub use xv_storage::{EntryRow, PointerRow, VersionRow};
