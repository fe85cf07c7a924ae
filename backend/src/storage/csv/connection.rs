use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

/// Header of every per-cat `logs.csv` file
pub const LOGS_CSV_HEADER: [&str; 6] = ["id", "cat_id", "type", "timestamp", "notes", "value"];

const CATS_DIRECTORY: &str = "cats";
const PROFILE_FILE: &str = "cat.yaml";
const LOGS_FILE: &str = "logs.csv";

/// CsvConnection owns the data directory layout and serializes writers.
///
/// All repositories created from clones of one connection share the same
/// write lock, so read-modify-write cycles on a file never interleave.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        let cats_dir = base_path.join(CATS_DIRECTORY);

        if !cats_dir.exists() {
            fs::create_dir_all(&cats_dir)
                .with_context(|| format!("Failed to create data directory {}", cats_dir.display()))?;
            info!("Created data directory: {}", cats_dir.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory that holds one subdirectory per cat
    pub fn cats_directory(&self) -> PathBuf {
        self.base_directory.join(CATS_DIRECTORY)
    }

    pub fn cat_directory(&self, cat_id: &str) -> PathBuf {
        self.cats_directory().join(cat_id)
    }

    pub fn profile_path(&self, cat_id: &str) -> PathBuf {
        self.cat_directory(cat_id).join(PROFILE_FILE)
    }

    pub fn logs_file_path(&self, cat_id: &str) -> PathBuf {
        self.cat_directory(cat_id).join(LOGS_FILE)
    }

    /// Ensure the cat directory and its logs file (with header) exist
    pub fn ensure_logs_file_exists(&self, cat_id: &str) -> Result<PathBuf> {
        let cat_dir = self.cat_directory(cat_id);
        if !cat_dir.exists() {
            fs::create_dir_all(&cat_dir)?;
        }

        let file_path = cat_dir.join(LOGS_FILE);
        if !file_path.exists() {
            let header = format!("{}\n", LOGS_CSV_HEADER.join(","));
            fs::write(&file_path, header)?;
        }

        Ok(file_path)
    }

    /// Whether `id` can be used as a single path component under `cats/`.
    /// Generated ids always qualify; ids taken from requests may not.
    pub fn is_valid_id(id: &str) -> bool {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Acquire the store-wide write lock
    pub async fn lock_for_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Replace `path` with `contents` via a temp file and rename
    pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move {} into place", path.display()))?;
        Ok(())
    }
}
