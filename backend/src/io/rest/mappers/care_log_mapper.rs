//! backend/src/io/rest/mappers/care_log_mapper.rs

use shared::{CareLog as SharedCareLog, CareLogListResponse, WeightPoint as SharedWeightPoint};

use crate::domain::models::care_log::{format_timestamp, CareLog as DomainCareLog};
use crate::domain::weight::WeightPoint;

/// Mapper from domain care logs and weight points to shared DTOs.
pub struct CareLogMapper;

impl CareLogMapper {
    pub fn to_dto(domain: DomainCareLog) -> SharedCareLog {
        SharedCareLog {
            id: domain.id,
            cat_id: domain.cat_id,
            log_type: domain.log_type,
            timestamp: format_timestamp(&domain.timestamp),
            notes: domain.notes,
            value: domain.value,
        }
    }

    pub fn to_log_list_dto(domain_logs: Vec<DomainCareLog>) -> CareLogListResponse {
        CareLogListResponse {
            logs: domain_logs.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_weight_point_dto(point: WeightPoint) -> SharedWeightPoint {
        SharedWeightPoint {
            date: point.date,
            timestamp: format_timestamp(&point.timestamp),
            weight: point.weight,
        }
    }

    pub fn to_weight_series_dto(series: Vec<WeightPoint>) -> Vec<SharedWeightPoint> {
        series.into_iter().map(Self::to_weight_point_dto).collect()
    }
}
