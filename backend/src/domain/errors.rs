//! Error taxonomy for domain operations.
use thiserror::Error;

/// Coarse classification used by callers to decide how to surface an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input, correctable by the user
    Validation,
    /// The referenced cat or log does not exist
    NotFound,
    /// The care log store (or another collaborator) failed
    Dependency,
}

#[derive(Debug, Error)]
pub enum CareError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),

    /// A dependent log could not be removed, so the cat was left in place.
    /// Re-listing the cat's logs shows what is left; the deletion can be retried.
    #[error("Deletion of cat {cat_id} aborted after removing {deleted} of {total} care logs: {source:#}")]
    CascadeAborted {
        cat_id: String,
        deleted: usize,
        total: usize,
        #[source]
        source: anyhow::Error,
    },

    /// The weight log was written but the profile weight could not be updated
    #[error("Weight log {log_id} was recorded for cat {cat_id} but the cat weight could not be updated: {source:#}")]
    WeightOutOfSync {
        cat_id: String,
        log_id: String,
        #[source]
        source: anyhow::Error,
    },
}

impl CareError {
    pub fn validation(message: impl Into<String>) -> Self {
        CareError::Validation(message.into())
    }

    pub fn cat_not_found(cat_id: &str) -> Self {
        CareError::NotFound {
            entity: "Cat",
            id: cat_id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CareError::Validation(_) => ErrorKind::Validation,
            CareError::NotFound { .. } => ErrorKind::NotFound,
            CareError::Storage(_)
            | CareError::CascadeAborted { .. }
            | CareError::WeightOutOfSync { .. } => ErrorKind::Dependency,
        }
    }
}

pub type CareResult<T> = std::result::Result<T, CareError>;
