//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! care log stores to be used interchangeably in the domain layer.
//!
//! The store offers per-record operations only. It does not enforce
//! referential integrity between cats and their logs and offers no
//! multi-record transactions; both are the domain's responsibility.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::care_log::{CareLog, NewCareLog};
use crate::domain::models::cat::{Cat, NewCat};

/// Trait defining the interface for cat profile storage operations
#[async_trait]
pub trait CatStorage: Send + Sync {
    /// Insert a new cat. The store assigns the identifier and creation time.
    async fn insert_cat(&self, cat: &NewCat) -> Result<Cat>;

    /// Retrieve a specific cat by ID
    async fn get_cat(&self, cat_id: &str) -> Result<Option<Cat>>;

    /// List all cats in creation order
    async fn list_cats(&self) -> Result<Vec<Cat>>;

    /// Replace the stored profile of an existing cat.
    /// Returns false if the cat does not exist.
    async fn update_cat(&self, cat: &Cat) -> Result<bool>;

    /// Overwrite only the weight attribute.
    /// Returns false if the cat does not exist.
    async fn patch_cat_weight(&self, cat_id: &str, weight: f64) -> Result<bool>;

    /// Delete a single cat record.
    /// Returns true if the cat was found and deleted, false otherwise.
    async fn delete_cat(&self, cat_id: &str) -> Result<bool>;
}

/// Trait defining the interface for care log storage operations
#[async_trait]
pub trait CareLogStorage: Send + Sync {
    /// Insert a new log. The store assigns the identifier.
    async fn insert_log(&self, log: &NewCareLog) -> Result<CareLog>;

    /// List logs of one cat, most recent first, capped at `limit` if given.
    /// Equal timestamps are ordered by reverse insertion order.
    async fn list_logs_by_cat(&self, cat_id: &str, limit: Option<usize>) -> Result<Vec<CareLog>>;

    /// Delete a single log.
    /// Returns true if the log was found and deleted, false otherwise.
    async fn delete_log(&self, cat_id: &str, log_id: &str) -> Result<bool>;
}
