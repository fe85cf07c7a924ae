//! # Care Log Service
//!
//! Records care events and derives the views built on top of them.
//!
//! A WEIGHT log has two effects: the log itself and the cat's current
//! weight. The store cannot write both atomically, so
//! [`CareLogService::apply_weight_observation`] owns the pair. It appends the
//! log first, then patches the cat. A failed patch is repaired once through
//! [`CareLogService::reconcile_weight`]; if that fails too the caller gets
//! [`CareError::WeightOutOfSync`] instead of a silent mismatch.

use chrono::Utc;
use shared::{AddCareLogRequest, LogType, WeightTrend};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::cat_service::CatService;
use crate::domain::errors::{CareError, CareResult};
use crate::domain::models::care_log::{parse_weight, CareLog, NewCareLog};
use crate::domain::models::cat::Cat;
use crate::domain::weight::{weight_series, weight_trend, WeightPoint};
use crate::storage::CareLogStorage;

/// Page size for log listings when the caller does not ask for one
pub const DEFAULT_LOG_LIMIT: usize = 100;

/// Number of logs shown on the cat dashboard
pub const DASHBOARD_RECENT_LOGS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightObservation {
    pub log: CareLog,
    pub cat: Cat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightReconciliation {
    pub cat: Cat,
    pub corrected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightHistory {
    pub series: Vec<WeightPoint>,
    pub trend: WeightTrend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatDashboard {
    pub cat: Cat,
    pub recent_logs: Vec<CareLog>,
    pub weight_series: Vec<WeightPoint>,
    pub trend: WeightTrend,
}

#[derive(Clone)]
pub struct CareLogService {
    logs: Arc<dyn CareLogStorage>,
    cat_service: CatService,
}

impl CareLogService {
    pub fn new(logs: Arc<dyn CareLogStorage>, cat_service: CatService) -> Self {
        Self { logs, cat_service }
    }

    /// Record a care event, stamped with the current time.
    ///
    /// WEIGHT events also update the cat's weight.
    pub async fn add_log(&self, cat_id: &str, request: AddCareLogRequest) -> CareResult<CareLog> {
        info!("Adding {} log for cat {}", request.log_type, cat_id);

        let log_type = request
            .log_type
            .parse::<LogType>()
            .map_err(|e| CareError::validation(e.to_string()))?;

        let notes = request.notes.unwrap_or_default();
        let value = request
            .value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if log_type == LogType::Weight {
            let (weight, raw) = value
                .and_then(|raw| parse_weight(&raw).map(|weight| (weight, raw)))
                .ok_or_else(|| {
                    CareError::validation("Weight logs need a non-negative numeric value")
                })?;
            // The log keeps the reading exactly as entered
            let observation = self.record_weight(cat_id, weight, raw, notes).await?;
            return Ok(observation.log);
        }

        // Existence check only; the log store does not know about cats
        self.cat_service.get_cat(cat_id).await?;

        let new_log = NewCareLog {
            cat_id: cat_id.to_string(),
            log_type,
            timestamp: Utc::now(),
            notes,
            value,
        };
        let log = self.logs.insert_log(&new_log).await?;

        info!("Added log {} for cat {}", log.id, cat_id);
        Ok(log)
    }

    /// Most recent logs of a cat, newest first
    pub async fn list_logs_for_cat(
        &self,
        cat_id: &str,
        limit: Option<usize>,
    ) -> CareResult<Vec<CareLog>> {
        self.cat_service.get_cat(cat_id).await?;

        let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT);
        let logs = self.logs.list_logs_by_cat(cat_id, Some(limit)).await?;

        debug!("Found {} logs for cat {} (limit {})", logs.len(), cat_id, limit);
        Ok(logs)
    }

    /// Append a WEIGHT log and bring the cat's weight in line with it
    pub async fn apply_weight_observation(
        &self,
        cat_id: &str,
        weight: f64,
        notes: String,
    ) -> CareResult<WeightObservation> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CareError::validation("Weight must be a non-negative number"));
        }

        self.record_weight(cat_id, weight, weight.to_string(), notes).await
    }

    /// `raw` is the stored log value; `weight` is its parsed form
    async fn record_weight(
        &self,
        cat_id: &str,
        weight: f64,
        raw: String,
        notes: String,
    ) -> CareResult<WeightObservation> {
        self.cat_service.get_cat(cat_id).await?;

        let new_log = NewCareLog {
            cat_id: cat_id.to_string(),
            log_type: LogType::Weight,
            timestamp: Utc::now(),
            notes,
            value: Some(raw),
        };
        let log = self.logs.insert_log(&new_log).await?;
        info!("Recorded weight {} for cat {} in log {}", weight, cat_id, log.id);

        if let Err(patch_error) = self.cat_service.update_cat_weight(cat_id, weight).await {
            warn!(
                "Weight patch failed for cat {} after log {}: {}; reconciling",
                cat_id, log.id, patch_error
            );
            if let Err(reconcile_error) = self.reconcile_weight(cat_id).await {
                error!(
                    "Cat {} weight is out of sync with log {}: {}",
                    cat_id, log.id, reconcile_error
                );
                return Err(CareError::WeightOutOfSync {
                    cat_id: cat_id.to_string(),
                    log_id: log.id,
                    source: anyhow::Error::new(reconcile_error),
                });
            }
        }

        let cat = self.cat_service.get_cat(cat_id).await?;
        Ok(WeightObservation { log, cat })
    }

    /// Make the cat's weight match its most recent numeric WEIGHT log.
    /// Safe to call any number of times.
    pub async fn reconcile_weight(&self, cat_id: &str) -> CareResult<WeightReconciliation> {
        let mut cat = self.cat_service.get_cat(cat_id).await?;
        let logs = self.logs.list_logs_by_cat(cat_id, None).await?;

        let latest = logs.iter().find_map(CareLog::weight_value);

        let corrected = match latest {
            Some(weight) if weight != cat.weight => {
                info!(
                    "Correcting weight of cat {} from {} to {}",
                    cat_id, cat.weight, weight
                );
                self.cat_service.update_cat_weight(cat_id, weight).await?;
                cat.weight = weight;
                true
            }
            _ => false,
        };

        Ok(WeightReconciliation { cat, corrected })
    }

    pub async fn weight_history(&self, cat_id: &str) -> CareResult<WeightHistory> {
        let logs = self.list_logs_for_cat(cat_id, None).await?;
        let series = chronological_series(&logs);
        let trend = weight_trend(&series);
        Ok(WeightHistory { series, trend })
    }

    /// Profile, latest activity and weight chart of one cat
    pub async fn dashboard(&self, cat_id: &str) -> CareResult<CatDashboard> {
        let cat = self.cat_service.get_cat(cat_id).await?;
        let logs = self.logs.list_logs_by_cat(cat_id, Some(DEFAULT_LOG_LIMIT)).await?;

        let weight_series = chronological_series(&logs);
        let trend = weight_trend(&weight_series);
        let recent_logs = logs.into_iter().take(DASHBOARD_RECENT_LOGS).collect();

        Ok(CatDashboard {
            cat,
            recent_logs,
            weight_series,
            trend,
        })
    }
}

/// Weight series from newest-first logs. Reversing first keeps logs that
/// share a timestamp in insertion order.
fn chronological_series(newest_first: &[CareLog]) -> Vec<WeightPoint> {
    let oldest_first: Vec<CareLog> = newest_first.iter().rev().cloned().collect();
    weight_series(&oldest_first)
}
