//! Deletion of a record selection
//!
//! The endpoint is chosen from the selection size: small selections report a
//! per-record outcome, medium ones go through one bulk call, large ones either
//! wipe the collection (everything selected) or are chunked.

use crate::shared::config::config;
use crate::shared::record_api::RecordApi;
use crate::shared::toast::ToastKind;
use contracts::domain::common::{EntityRecord, RecordKey};

type KeyOf<A> = <<A as RecordApi>::Record as EntityRecord>::Key;

/// Failures listed by name in the result message
const LISTED_FAILURES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteThresholds {
    pub per_record_max: usize,
    pub bulk_max: usize,
}

impl DeleteThresholds {
    pub fn from_config() -> Self {
        let records = &config().records;
        Self {
            per_record_max: records.per_record_delete_max,
            bulk_max: records.bulk_delete_max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPlan {
    /// One `delete` call with a per-record outcome
    PerRecord,
    /// One `bulk_delete` call
    Bulk,
    /// `delete_all`, the selection covers the whole collection
    All,
    /// Sequential `bulk_delete` calls of at most `chunk_size` keys
    Chunked { chunk_size: usize },
}

impl DeletionPlan {
    pub fn choose(selected: usize, total: usize, thresholds: DeleteThresholds) -> Self {
        if selected <= thresholds.per_record_max {
            DeletionPlan::PerRecord
        } else if selected <= thresholds.bulk_max {
            DeletionPlan::Bulk
        } else if selected >= total {
            DeletionPlan::All
        } else {
            DeletionPlan::Chunked {
                chunk_size: thresholds.bulk_max.max(1),
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteOutcome {
    pub requested: usize,
    pub deleted: usize,
    pub failures: Vec<String>,
}

impl DeleteOutcome {
    pub fn kind(&self) -> ToastKind {
        if self.failures.is_empty() {
            ToastKind::Success
        } else if self.deleted > 0 {
            ToastKind::Warning
        } else {
            ToastKind::Error
        }
    }

    pub fn message(&self) -> String {
        if self.failures.is_empty() {
            return format!("Deleted {} record(s)", self.deleted);
        }
        let mut listed = self
            .failures
            .iter()
            .take(LISTED_FAILURES)
            .cloned()
            .collect::<Vec<_>>()
            .join("; ");
        if self.failures.len() > LISTED_FAILURES {
            listed.push_str(&format!(" and {} more", self.failures.len() - LISTED_FAILURES));
        }
        if self.deleted > 0 {
            format!(
                "Deleted {} of {} records. Failed: {}",
                self.deleted, self.requested, listed
            )
        } else {
            format!("Failed to delete records: {}", listed)
        }
    }
}

/// Run a deletion plan against the API
pub async fn execute_deletion<A: RecordApi>(
    api: &A,
    plan: DeletionPlan,
    keys: &[KeyOf<A>],
) -> DeleteOutcome {
    let mut outcome = DeleteOutcome {
        requested: keys.len(),
        ..Default::default()
    };
    log::info!("Deleting {} record(s) via {:?}", keys.len(), plan);

    match plan {
        DeletionPlan::PerRecord => match api.delete_selected(keys).await {
            Ok(response) => {
                outcome.deleted = response.deleted.len();
                outcome.failures = response
                    .failed
                    .iter()
                    .map(|f| format!("{}: {}", f.key.as_string(), f.error))
                    .collect();
            }
            Err(e) => outcome.failures.push(e.to_string()),
        },
        DeletionPlan::Bulk => match api.bulk_delete(keys).await {
            Ok(response) => outcome.deleted = response.deleted_count,
            Err(e) => outcome.failures.push(e.to_string()),
        },
        DeletionPlan::All => match api.delete_all().await {
            Ok(response) => outcome.deleted = response.deleted_count,
            Err(e) => outcome.failures.push(e.to_string()),
        },
        DeletionPlan::Chunked { chunk_size } => {
            let total = keys.len().div_ceil(chunk_size);
            for (index, chunk) in keys.chunks(chunk_size).enumerate() {
                match api.bulk_delete(chunk).await {
                    Ok(response) => outcome.deleted += response.deleted_count,
                    Err(e) => {
                        log::warn!("Delete chunk {} of {} failed: {}", index + 1, total, e);
                        outcome
                            .failures
                            .push(format!("chunk {} of {}: {}", index + 1, total, e));
                    }
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record_api::testing::{Call, RecordingApi};
    use contracts::domain::a101_manufacture_order::aggregate::ManufactureOrder;

    const THRESHOLDS: DeleteThresholds = DeleteThresholds {
        per_record_max: 10,
        bulk_max: 100,
    };

    fn api() -> RecordingApi<ManufactureOrder> {
        RecordingApi::new(Vec::new())
    }

    fn keys(count: i64) -> Vec<i64> {
        (1..=count).collect()
    }

    #[test]
    fn test_plan_boundaries() {
        assert_eq!(DeletionPlan::choose(1, 500, THRESHOLDS), DeletionPlan::PerRecord);
        assert_eq!(DeletionPlan::choose(10, 500, THRESHOLDS), DeletionPlan::PerRecord);
        assert_eq!(DeletionPlan::choose(11, 500, THRESHOLDS), DeletionPlan::Bulk);
        assert_eq!(DeletionPlan::choose(100, 100, THRESHOLDS), DeletionPlan::Bulk);
        assert_eq!(DeletionPlan::choose(150, 150, THRESHOLDS), DeletionPlan::All);
        assert_eq!(
            DeletionPlan::choose(150, 500, THRESHOLDS),
            DeletionPlan::Chunked { chunk_size: 100 }
        );
    }

    #[tokio::test]
    async fn test_small_selection_uses_single_delete_call() {
        let api = api();
        let keys = keys(5);
        let plan = DeletionPlan::choose(keys.len(), 20, THRESHOLDS);
        let outcome = execute_deletion(&api, plan, &keys).await;
        assert_eq!(api.calls(), vec![Call::Delete(5)]);
        assert_eq!(outcome.deleted, 5);
        assert_eq!(outcome.kind(), ToastKind::Success);
    }

    #[tokio::test]
    async fn test_medium_selection_uses_one_bulk_call() {
        let api = api();
        let keys = keys(50);
        let plan = DeletionPlan::choose(keys.len(), 200, THRESHOLDS);
        let outcome = execute_deletion(&api, plan, &keys).await;
        assert_eq!(api.calls(), vec![Call::BulkDelete(50)]);
        assert_eq!(outcome.message(), "Deleted 50 record(s)");
    }

    #[tokio::test]
    async fn test_whole_collection_uses_delete_all() {
        let api = api();
        let keys = keys(150);
        let plan = DeletionPlan::choose(keys.len(), 150, THRESHOLDS);
        execute_deletion(&api, plan, &keys).await;
        assert_eq!(api.calls(), vec![Call::DeleteAll]);
    }

    #[tokio::test]
    async fn test_partial_large_selection_is_chunked() {
        let api = api();
        let keys = keys(150);
        let plan = DeletionPlan::choose(keys.len(), 500, THRESHOLDS);
        let outcome = execute_deletion(&api, plan, &keys).await;
        assert_eq!(api.calls(), vec![Call::BulkDelete(100), Call::BulkDelete(50)]);
        assert_eq!(outcome.deleted, 150);
    }

    #[tokio::test]
    async fn test_per_record_failures_are_reported() {
        let mut api = api();
        api.failing_keys = vec![2, 4];
        let keys = keys(4);
        let outcome = execute_deletion(&api, DeletionPlan::PerRecord, &keys).await;
        assert_eq!(outcome.deleted, 2);
        assert_eq!(outcome.kind(), ToastKind::Warning);
        assert_eq!(
            outcome.message(),
            "Deleted 2 of 4 records. Failed: 2: record is referenced; 4: record is referenced"
        );
    }

    #[tokio::test]
    async fn test_failed_bulk_delete_is_an_error() {
        let mut api = api();
        api.fail_bulk_delete = true;
        let outcome = execute_deletion(&api, DeletionPlan::Bulk, &keys(20)).await;
        assert_eq!(outcome.deleted, 0);
        assert_eq!(outcome.kind(), ToastKind::Error);
        assert_eq!(outcome.message(), "Failed to delete records: rejected");
    }
}
