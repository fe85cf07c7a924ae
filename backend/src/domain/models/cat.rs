//! Domain model for a cat profile.
use chrono::{DateTime, Utc};
use shared::Gender;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Cat {
    pub id: String,
    pub name: String,
    pub breed: String,
    pub age: f64,
    pub weight: f64,
    pub image_url: String,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
}

impl Cat {
    /// Generate a fresh cat ID, safe to use as a directory name
    pub fn generate_id() -> String {
        format!("cat-{}", Uuid::new_v4().simple())
    }
}

/// A validated profile that has not been persisted yet.
/// The store assigns the identifier and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCat {
    pub name: String,
    pub breed: String,
    pub age: f64,
    pub weight: f64,
    pub image_url: String,
    pub gender: Gender,
}

impl NewCat {
    pub fn into_cat(self, id: String, created_at: DateTime<Utc>) -> Cat {
        Cat {
            id,
            name: self.name,
            breed: self.breed,
            age: self.age,
            weight: self.weight,
            image_url: self.image_url,
            gender: self.gender,
            created_at,
        }
    }
}
