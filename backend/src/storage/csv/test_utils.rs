//! Test utilities for automatic cleanup and consistent test infrastructure
//!
//! Provides RAII-based cleanup that guarantees test data is removed
//! even if tests panic or fail.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use super::care_log_repository::CareLogRepository;
use super::cat_repository::CatRepository;
use super::connection::CsvConnection;
use crate::storage::traits::{CareLogStorage, CatStorage};

/// RAII test environment. The data directory lives as long as this value.
pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("cat_care_test_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// Both repositories over this environment, as the domain sees them
    pub fn storages(&self) -> (Arc<dyn CatStorage>, Arc<dyn CareLogStorage>) {
        (
            Arc::new(CatRepository::new(self.connection.clone())),
            Arc::new(CareLogRepository::new(self.connection.clone())),
        )
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("CAT_CARE_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}
