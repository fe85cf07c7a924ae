//! Domain layer: business rules for cats and their care history.
//!
//! Services validate input, enforce the invariants the store cannot
//! (cats own their logs, the cat weight follows the latest WEIGHT log), and
//! return domain models. Mapping to wire DTOs happens in the REST layer.

pub mod advice_service;
pub mod care_log_service;
pub mod cat_service;
pub mod deletion_plan;
pub mod errors;
pub mod models;
pub mod weight;

#[cfg(test)]
pub(crate) mod test_support;

pub use advice_service::AdviceService;
pub use care_log_service::CareLogService;
pub use cat_service::CatService;
pub use errors::{CareError, CareResult, ErrorKind};
