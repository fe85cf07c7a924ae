use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use shared::Cat as SharedCat;
use std::fs;
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::domain::models::cat::{Cat as DomainCat, NewCat};
use crate::io::rest::mappers::cat_mapper::CatMapper;
use crate::storage::traits::CatStorage;

/// Cat profile repository: one `cat.yaml` per cat directory
#[derive(Clone)]
pub struct CatRepository {
    connection: CsvConnection,
}

impl CatRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Discover all cats by scanning the cats directory
    fn discover_cats(&self) -> Result<Vec<DomainCat>> {
        let cats_dir = self.connection.cats_directory();

        if !cats_dir.exists() {
            debug!("Cats directory doesn't exist, returning empty list");
            return Ok(Vec::new());
        }

        let mut cats = Vec::new();

        for entry in fs::read_dir(&cats_dir)? {
            let path = entry?.path();

            // Skip files, only process directories
            if !path.is_dir() {
                continue;
            }

            let dir_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => {
                    warn!("Skipping directory with invalid name: {:?}", path);
                    continue;
                }
            };

            match self.load_cat(&dir_name) {
                Ok(Some(cat)) => cats.push(cat),
                Ok(None) => debug!("Directory {} doesn't contain a cat profile", dir_name),
                Err(e) => warn!("Error loading cat from directory {}: {:#}", dir_name, e),
            }
        }

        // Creation order, id as tie-breaker for a deterministic listing
        cats.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        debug!("Discovered {} cats", cats.len());
        Ok(cats)
    }

    fn load_cat(&self, cat_id: &str) -> Result<Option<DomainCat>> {
        if !CsvConnection::is_valid_id(cat_id) {
            return Ok(None);
        }

        let yaml_path = self.connection.profile_path(cat_id);

        if !yaml_path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)?;
        let shared_cat: SharedCat = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Malformed profile {}", yaml_path.display()))?;

        let cat = CatMapper::to_domain(shared_cat).context("Failed to map stored cat profile")?;
        Ok(Some(cat))
    }

    fn save_cat(&self, cat: &DomainCat) -> Result<()> {
        let cat_dir = self.connection.cat_directory(&cat.id);
        if !cat_dir.exists() {
            fs::create_dir_all(&cat_dir)?;
            info!("Created cat directory: {:?}", cat_dir);
        }

        let yaml_content = serde_yaml::to_string(&CatMapper::to_dto(cat.clone()))?;
        CsvConnection::write_atomically(&self.connection.profile_path(&cat.id), yaml_content.as_bytes())?;

        debug!("Saved cat {} ({})", cat.name, cat.id);
        Ok(())
    }
}

#[async_trait]
impl CatStorage for CatRepository {
    async fn insert_cat(&self, cat: &NewCat) -> Result<DomainCat> {
        let _guard = self.connection.lock_for_write().await;

        let cat = cat.clone().into_cat(DomainCat::generate_id(), Utc::now().trunc_subsecs(3));
        self.save_cat(&cat)?;

        info!("Stored new cat {} with ID: {}", cat.name, cat.id);
        Ok(cat)
    }

    async fn get_cat(&self, cat_id: &str) -> Result<Option<DomainCat>> {
        self.load_cat(cat_id)
    }

    async fn list_cats(&self) -> Result<Vec<DomainCat>> {
        self.discover_cats()
    }

    async fn update_cat(&self, cat: &DomainCat) -> Result<bool> {
        let _guard = self.connection.lock_for_write().await;

        if !CsvConnection::is_valid_id(&cat.id) || !self.connection.profile_path(&cat.id).exists() {
            return Ok(false);
        }

        self.save_cat(cat)?;
        Ok(true)
    }

    async fn patch_cat_weight(&self, cat_id: &str, weight: f64) -> Result<bool> {
        let _guard = self.connection.lock_for_write().await;

        let mut cat = match self.load_cat(cat_id)? {
            Some(cat) => cat,
            None => return Ok(false),
        };

        cat.weight = weight;
        self.save_cat(&cat)?;
        Ok(true)
    }

    async fn delete_cat(&self, cat_id: &str) -> Result<bool> {
        let _guard = self.connection.lock_for_write().await;

        if !CsvConnection::is_valid_id(cat_id) {
            return Ok(false);
        }

        let cat_dir = self.connection.cat_directory(cat_id);
        if !self.connection.profile_path(cat_id).exists() {
            return Ok(false);
        }

        fs::remove_dir_all(&cat_dir)
            .with_context(|| format!("Failed to remove {}", cat_dir.display()))?;
        info!("Deleted cat directory: {:?}", cat_dir);
        Ok(true)
    }
}
