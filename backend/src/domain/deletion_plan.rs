//! # Ordered Deletion Plans
//!
//! The care log store has no multi-record transactions, so removing a cat
//! together with its logs is expressed as an explicit, ordered list of
//! single-record deletions: every dependent first, the parent last.
//!
//! Steps run one at a time. The first failing dependent deletion stops the
//! plan, which guarantees the parent is never removed while a dependent
//! might still reference it. Already-missing records count as deleted so a
//! failed plan can simply be rebuilt and run again.

use tracing::{debug, warn};

use crate::domain::errors::{CareError, CareResult};
use crate::domain::models::care_log::CareLog;
use crate::storage::{CareLogStorage, CatStorage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionStep {
    CareLog { cat_id: String, log_id: String },
    Cat { cat_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    root_cat_id: String,
    steps: Vec<DeletionStep>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionReport {
    pub logs_deleted: usize,
    /// False when the cat record was already gone at execution time
    pub cat_deleted: bool,
}

impl DeletionPlan {
    /// Plan the removal of a cat and all of the given logs
    pub fn for_cat(cat_id: &str, logs: &[CareLog]) -> Self {
        let mut steps: Vec<DeletionStep> = logs
            .iter()
            .map(|log| DeletionStep::CareLog {
                cat_id: cat_id.to_string(),
                log_id: log.id.clone(),
            })
            .collect();
        steps.push(DeletionStep::Cat {
            cat_id: cat_id.to_string(),
        });

        Self {
            root_cat_id: cat_id.to_string(),
            steps,
        }
    }

    pub fn steps(&self) -> &[DeletionStep] {
        &self.steps
    }

    pub fn dependent_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, DeletionStep::CareLog { .. }))
            .count()
    }

    /// Run every step sequentially, aborting on the first dependent failure
    pub async fn execute(
        &self,
        cats: &dyn CatStorage,
        logs: &dyn CareLogStorage,
    ) -> CareResult<DeletionReport> {
        let total = self.dependent_count();
        let mut logs_deleted = 0;
        let mut cat_deleted = false;

        for step in &self.steps {
            match step {
                DeletionStep::CareLog { cat_id, log_id } => {
                    match logs.delete_log(cat_id, log_id).await {
                        Ok(found) => {
                            if !found {
                                debug!("Log {} was already gone", log_id);
                            }
                            logs_deleted += 1;
                        }
                        Err(source) => {
                            warn!(
                                "Aborting deletion of cat {} at log {} ({} of {} logs removed)",
                                self.root_cat_id, log_id, logs_deleted, total
                            );
                            return Err(CareError::CascadeAborted {
                                cat_id: self.root_cat_id.clone(),
                                deleted: logs_deleted,
                                total,
                                source,
                            });
                        }
                    }
                }
                DeletionStep::Cat { cat_id } => {
                    cat_deleted = cats.delete_cat(cat_id).await?;
                }
            }
        }

        Ok(DeletionReport {
            logs_deleted,
            cat_deleted,
        })
    }
}
