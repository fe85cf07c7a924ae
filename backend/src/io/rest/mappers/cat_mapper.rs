//! backend/src/io/rest/mappers/cat_mapper.rs

use anyhow::{Context, Result};
use shared::{Cat as SharedCat, CatListResponse, CatResponse};

use crate::domain::models::care_log::{format_timestamp, parse_timestamp};
use crate::domain::models::cat::Cat as DomainCat;

/// Mapper to convert between shared Cat DTOs and domain Cat models.
pub struct CatMapper;

impl CatMapper {
    /// Converts a shared Cat DTO to a domain Cat model.
    pub fn to_domain(dto: SharedCat) -> Result<DomainCat> {
        let created_at = parse_timestamp(&dto.created_at)
            .context("Failed to parse created_at from shared DTO")?;

        Ok(DomainCat {
            id: dto.id,
            name: dto.name,
            breed: dto.breed,
            age: dto.age,
            weight: dto.weight,
            image_url: dto.image_url,
            gender: dto.gender,
            created_at,
        })
    }

    /// Converts a domain Cat model to a shared Cat DTO.
    pub fn to_dto(domain: DomainCat) -> SharedCat {
        SharedCat {
            id: domain.id,
            name: domain.name,
            breed: domain.breed,
            age: domain.age,
            weight: domain.weight,
            image_url: domain.image_url,
            gender: domain.gender,
            created_at: format_timestamp(&domain.created_at),
        }
    }

    pub fn to_cat_list_dto(domain_cats: Vec<DomainCat>) -> CatListResponse {
        CatListResponse {
            cats: domain_cats.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_cat_response_dto(domain: DomainCat, message: &str) -> CatResponse {
        CatResponse {
            cat: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }
}
