//! Sequential batch upload of parsed CSV records

use super::types::{parse_records, CsvImportError};
use crate::shared::record_api::RecordApi;
use crate::shared::toast::ToastKind;
use contracts::domain::common::EntityRecord;

type CreateOf<A> = <<A as RecordApi>::Record as EntityRecord>::Create;

/// Phase of the bulk-upload dialog
#[derive(Debug, Clone, PartialEq)]
pub enum UploadPhase {
    Idle,
    Reading,
    Parsing,
    Uploading { batch: usize, total: usize },
    Done(UploadReport),
    Failed(String),
}

impl UploadPhase {
    /// While busy the dialog cannot be closed
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            UploadPhase::Reading | UploadPhase::Parsing | UploadPhase::Uploading { .. }
        )
    }

    /// Progress bar value, 0-100
    pub fn percent(&self) -> u32 {
        match self {
            UploadPhase::Uploading { batch, total } if *total > 0 => {
                (batch.saturating_sub(1) * 100 / total) as u32
            }
            UploadPhase::Done(_) => 100,
            _ => 0,
        }
    }

    pub fn status_text(&self) -> String {
        match self {
            UploadPhase::Idle => "Choose a CSV file".to_string(),
            UploadPhase::Reading => "Reading file...".to_string(),
            UploadPhase::Parsing => "Parsing CSV...".to_string(),
            UploadPhase::Uploading { batch, total } => {
                format!("Uploading batch {} of {}...", batch, total)
            }
            UploadPhase::Done(report) => report.message(),
            UploadPhase::Failed(message) => message.clone(),
        }
    }
}

/// Result of uploading all batches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadReport {
    pub total_records: usize,
    pub batches: usize,
    pub processed: usize,
    pub failures: Vec<String>,
}

impl UploadReport {
    pub fn kind(&self) -> ToastKind {
        if self.failures.is_empty() {
            ToastKind::Success
        } else if self.failures.len() < self.batches {
            ToastKind::Warning
        } else {
            ToastKind::Error
        }
    }

    pub fn message(&self) -> String {
        if self.failures.is_empty() {
            format!("Uploaded {} record(s)", self.processed)
        } else {
            format!(
                "Uploaded {} of {} records, {} of {} batches failed: {}",
                self.processed,
                self.total_records,
                self.failures.len(),
                self.batches,
                self.failures.join("; ")
            )
        }
    }
}

/// Send records in batches, one request at a time.
///
/// A failed batch does not stop the remaining ones. `on_batch` is called with
/// the 1-based batch number before each request.
pub async fn upload_in_batches<A, F>(
    api: &A,
    records: &[CreateOf<A>],
    batch_size: usize,
    mut on_batch: F,
) -> UploadReport
where
    A: RecordApi,
    F: FnMut(usize, usize),
{
    let batch_size = batch_size.max(1);
    let batches = records.len().div_ceil(batch_size);
    let mut report = UploadReport {
        total_records: records.len(),
        batches,
        ..Default::default()
    };

    for (index, chunk) in records.chunks(batch_size).enumerate() {
        on_batch(index + 1, batches);
        match api.bulk_ingest(chunk).await {
            Ok(response) => {
                log::info!(
                    "Batch {} of {}: {} record(s) processed",
                    index + 1,
                    batches,
                    response.processed_count
                );
                report.processed += response.processed_count;
            }
            Err(e) => {
                log::warn!("Batch {} of {} failed: {}", index + 1, batches, e);
                report
                    .failures
                    .push(format!("batch {}: {}", index + 1, e));
            }
        }
    }

    report
}

/// Parse an upload file and send its records in batches.
///
/// A file that fails to parse is rejected before any request is made.
pub async fn import_csv<A, F>(
    api: &A,
    text: &str,
    batch_size: usize,
    on_batch: F,
) -> Result<UploadReport, CsvImportError>
where
    A: RecordApi,
    F: FnMut(usize, usize),
{
    let records = parse_records::<A::Record>(text)?;
    log::info!("Parsed {} record(s) for upload", records.len());
    Ok(upload_in_batches(api, &records, batch_size, on_batch).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record_api::testing::{Call, RecordingApi};
    use contracts::domain::a103_sales_record::aggregate::{SalesRecord, SalesRecordCreate};

    fn creates(count: usize) -> Vec<SalesRecordCreate> {
        (0..count)
            .map(|i| SalesRecordCreate {
                sales_record_id: format!("SR{}", i),
                sales_date: "2024-03-20".to_string(),
                sku: "SKU001".to_string(),
                quantity_sold: 1,
                customer_name: "Customer A".to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_batches_are_sent_in_order() {
        let api = RecordingApi::<SalesRecord>::new(Vec::new());
        let mut progress = Vec::new();
        let report =
            upload_in_batches(&api, &creates(2500), 1000, |batch, total| progress.push((batch, total)))
                .await;

        assert_eq!(
            api.calls(),
            vec![Call::BulkIngest(1000), Call::BulkIngest(1000), Call::BulkIngest(500)]
        );
        assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
        assert_eq!(report.processed, 2500);
        assert_eq!(report.kind(), ToastKind::Success);
    }

    #[tokio::test]
    async fn test_failed_batch_does_not_stop_upload() {
        let mut api = RecordingApi::<SalesRecord>::new(Vec::new());
        api.failing_ingest_calls = vec![2];
        let report = upload_in_batches(&api, &creates(2500), 1000, |_, _| {}).await;

        assert_eq!(api.calls().len(), 3);
        assert_eq!(report.processed, 1500);
        assert_eq!(report.failures, vec!["batch 2: rejected".to_string()]);
        assert_eq!(report.kind(), ToastKind::Warning);
    }

    #[tokio::test]
    async fn test_small_file_is_one_batch() {
        let api = RecordingApi::<SalesRecord>::new(Vec::new());
        let report = upload_in_batches(&api, &creates(1), 1000, |_, _| {}).await;
        assert_eq!(api.calls(), vec![Call::BulkIngest(1)]);
        assert_eq!(report.message(), "Uploaded 1 record(s)");
    }

    #[tokio::test]
    async fn test_rejected_file_sends_nothing() {
        let api = RecordingApi::<SalesRecord>::new(Vec::new());
        let text = "sales_record_id,sales_date,sku,customer_name\nSR1,2024-03-20,A,B\n";
        let result = import_csv(&api, text, 1000, |_, _| {}).await;

        assert_eq!(
            result,
            Err(CsvImportError::MissingColumns(vec!["quantity_sold".to_string()]))
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_parsed_file_is_uploaded() {
        let api = RecordingApi::<SalesRecord>::new(Vec::new());
        let text = "sales_record_id,sales_date,sku,quantity_sold,customer_name\n\
                    SR123,2024-03-20,sku001,10,Customer A\n";
        let report = import_csv(&api, text, 1000, |_, _| {}).await.unwrap();

        assert_eq!(api.calls(), vec![Call::BulkIngest(1)]);
        assert_eq!(report.processed, 1);
    }

    #[test]
    fn test_phase_progress() {
        assert!(UploadPhase::Uploading { batch: 1, total: 2 }.is_busy());
        assert!(!UploadPhase::Failed("x".to_string()).is_busy());
        assert_eq!(UploadPhase::Uploading { batch: 2, total: 4 }.percent(), 25);
        assert_eq!(UploadPhase::Done(UploadReport::default()).percent(), 100);
    }
}
