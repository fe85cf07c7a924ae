use shared::{CreateCatRequest, Gender, UpdateCatRequest, DEFAULT_BREED, DEFAULT_IMAGE_URL};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::deletion_plan::DeletionPlan;
use crate::domain::errors::{CareError, CareResult};
use crate::domain::models::cat::{Cat, NewCat};
use crate::storage::{CareLogStorage, CatStorage};

/// Service for managing cat profiles
#[derive(Clone)]
pub struct CatService {
    cats: Arc<dyn CatStorage>,
    logs: Arc<dyn CareLogStorage>,
}

impl CatService {
    pub fn new(cats: Arc<dyn CatStorage>, logs: Arc<dyn CareLogStorage>) -> Self {
        Self { cats, logs }
    }

    /// Create a new cat, filling unset optional attributes with defaults
    pub async fn create_cat(&self, request: CreateCatRequest) -> CareResult<Cat> {
        info!("Creating cat: name={}", request.name);

        self.validate_create_request(&request)?;

        let new_cat = NewCat {
            name: request.name.trim().to_string(),
            breed: non_blank(request.breed).unwrap_or_else(|| DEFAULT_BREED.to_string()),
            age: request.age.unwrap_or(0.0),
            weight: request.weight.unwrap_or(0.0),
            image_url: non_blank(request.image_url)
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            gender: non_blank(request.gender).map(Gender::from).unwrap_or_default(),
        };

        let cat = self.cats.insert_cat(&new_cat).await?;

        info!("Created cat: {} with ID: {}", cat.name, cat.id);

        Ok(cat)
    }

    /// Get a cat by ID
    pub async fn get_cat(&self, cat_id: &str) -> CareResult<Cat> {
        match self.cats.get_cat(cat_id).await? {
            Some(cat) => Ok(cat),
            None => {
                warn!("Cat not found: {}", cat_id);
                Err(CareError::cat_not_found(cat_id))
            }
        }
    }

    /// List all cats in creation order
    pub async fn list_cats(&self) -> CareResult<Vec<Cat>> {
        let cats = self.cats.list_cats().await?;
        info!("Found {} cats", cats.len());
        Ok(cats)
    }

    /// Edit profile attributes. Weight is not editable here.
    pub async fn update_cat(&self, cat_id: &str, request: UpdateCatRequest) -> CareResult<Cat> {
        info!("Updating cat: {}", cat_id);

        let mut cat = self.get_cat(cat_id).await?;

        self.validate_update_request(&request)?;

        if let Some(name) = request.name {
            cat.name = name.trim().to_string();
        }
        if let Some(breed) = request.breed {
            let breed = breed.trim();
            cat.breed = if breed.is_empty() {
                DEFAULT_BREED.to_string()
            } else {
                breed.to_string()
            };
        }
        if let Some(age) = request.age {
            cat.age = age;
        }
        if let Some(image_url) = request.image_url {
            let image_url = image_url.trim();
            cat.image_url = if image_url.is_empty() {
                DEFAULT_IMAGE_URL.to_string()
            } else {
                image_url.to_string()
            };
        }
        if let Some(gender) = request.gender {
            cat.gender = non_blank(Some(gender)).map(Gender::from).unwrap_or_default();
        }

        if !self.cats.update_cat(&cat).await? {
            return Err(CareError::cat_not_found(cat_id));
        }

        info!("Updated cat: {} with ID: {}", cat.name, cat.id);

        Ok(cat)
    }

    /// Overwrite the stored weight. Callers outside the weight
    /// observation flow should not need this.
    pub async fn update_cat_weight(&self, cat_id: &str, weight: f64) -> CareResult<()> {
        validate_non_negative("Weight", weight)?;

        if !self.cats.patch_cat_weight(cat_id, weight).await? {
            warn!("Cannot update weight, cat not found: {}", cat_id);
            return Err(CareError::cat_not_found(cat_id));
        }

        info!("Set weight of cat {} to {}", cat_id, weight);
        Ok(())
    }

    /// Delete a cat together with all of its care logs.
    ///
    /// Logs go first. If any of them cannot be removed the cat stays in
    /// place and [`CareError::CascadeAborted`] is returned.
    pub async fn delete_cat(&self, cat_id: &str) -> CareResult<()> {
        info!("Deleting cat: {}", cat_id);

        let cat = self.get_cat(cat_id).await?;
        let logs = self.logs.list_logs_by_cat(cat_id, None).await?;

        let plan = DeletionPlan::for_cat(cat_id, &logs);
        debug!("Deletion plan for cat {} has {} steps", cat_id, plan.steps().len());
        let report = plan.execute(self.cats.as_ref(), self.logs.as_ref()).await?;

        if !report.cat_deleted {
            warn!("Cat {} disappeared during deletion", cat_id);
        }

        info!(
            "Deleted cat: {} with ID: {} and {} care logs",
            cat.name, cat.id, report.logs_deleted
        );

        Ok(())
    }

    fn validate_create_request(&self, request: &CreateCatRequest) -> CareResult<()> {
        validate_name(&request.name)?;
        if let Some(age) = request.age {
            validate_non_negative("Age", age)?;
        }
        if let Some(weight) = request.weight {
            validate_non_negative("Weight", weight)?;
        }
        Ok(())
    }

    fn validate_update_request(&self, request: &UpdateCatRequest) -> CareResult<()> {
        if let Some(ref name) = request.name {
            validate_name(name)?;
        }
        if let Some(age) = request.age {
            validate_non_negative("Age", age)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> CareResult<()> {
    if name.trim().is_empty() {
        return Err(CareError::validation("Cat name cannot be empty"));
    }
    Ok(())
}

fn validate_non_negative(field: &str, value: f64) -> CareResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CareError::validation(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
