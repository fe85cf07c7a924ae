//! Failure-injecting storage wrappers for exercising error paths.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::models::care_log::{CareLog, NewCareLog};
use crate::domain::models::cat::{Cat, NewCat};
use crate::storage::{CareLogStorage, CatStorage};

/// Wraps a log store; lets the first `successful_deletes` deletions through,
/// then fails every later one.
pub struct FlakyCareLogStorage {
    inner: Arc<dyn CareLogStorage>,
    successful_deletes: usize,
    delete_attempts: AtomicUsize,
}

impl FlakyCareLogStorage {
    pub fn failing_deletes_after(inner: Arc<dyn CareLogStorage>, successful_deletes: usize) -> Self {
        Self {
            inner,
            successful_deletes,
            delete_attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CareLogStorage for FlakyCareLogStorage {
    async fn insert_log(&self, log: &NewCareLog) -> Result<CareLog> {
        self.inner.insert_log(log).await
    }

    async fn list_logs_by_cat(&self, cat_id: &str, limit: Option<usize>) -> Result<Vec<CareLog>> {
        self.inner.list_logs_by_cat(cat_id, limit).await
    }

    async fn delete_log(&self, cat_id: &str, log_id: &str) -> Result<bool> {
        let attempt = self.delete_attempts.fetch_add(1, Ordering::SeqCst);
        if attempt >= self.successful_deletes {
            return Err(anyhow!("injected delete failure for {}", log_id));
        }
        self.inner.delete_log(cat_id, log_id).await
    }
}

/// Wraps a cat store; fails the next `failures` weight patches.
pub struct FlakyCatStorage {
    inner: Arc<dyn CatStorage>,
    remaining_patch_failures: AtomicUsize,
}

impl FlakyCatStorage {
    pub fn failing_weight_patches(inner: Arc<dyn CatStorage>, failures: usize) -> Self {
        Self {
            inner,
            remaining_patch_failures: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl CatStorage for FlakyCatStorage {
    async fn insert_cat(&self, cat: &NewCat) -> Result<Cat> {
        self.inner.insert_cat(cat).await
    }

    async fn get_cat(&self, cat_id: &str) -> Result<Option<Cat>> {
        self.inner.get_cat(cat_id).await
    }

    async fn list_cats(&self) -> Result<Vec<Cat>> {
        self.inner.list_cats().await
    }

    async fn update_cat(&self, cat: &Cat) -> Result<bool> {
        self.inner.update_cat(cat).await
    }

    async fn patch_cat_weight(&self, cat_id: &str, weight: f64) -> Result<bool> {
        let injected = self
            .remaining_patch_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if injected {
            return Err(anyhow!("injected weight patch failure for {}", cat_id));
        }
        self.inner.patch_cat_weight(cat_id, weight).await
    }

    async fn delete_cat(&self, cat_id: &str) -> Result<bool> {
        self.inner.delete_cat(cat_id).await
    }
}
