#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod catalog;
mod error;
mod module;
pub mod openai;

pub use catalog::{ModelCatalog, ModelEntry, ModelList};
pub use error::{ErrorBody, HttpError, error_response};
pub use module::{RouteModule, module_router};
