//! Request/response DTOs of the batch endpoints shared by every entity

use serde::{Deserialize, Serialize};

/// One selected record paired with its edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntry<K, U> {
    pub key: K,
    pub changes: U,
}

/// Batch edit of several records.
///
/// Each key travels with its own changes, so the pairing cannot drift.
/// `into_wire` produces the index-aligned shape the REST API expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpdate<K, U> {
    pub entries: Vec<UpdateEntry<K, U>>,
}

impl<K, U> BatchUpdate<K, U> {
    pub fn new(entries: Vec<UpdateEntry<K, U>>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_wire(self) -> UpdateRequest<K, U> {
        let (selected_records, update_data) = self
            .entries
            .into_iter()
            .map(|e| (e.key, e.changes))
            .unzip();
        UpdateRequest {
            selected_records,
            update_data,
        }
    }
}

/// Body of `PUT /{entity}/update`: `update_data[i]` applies to `selected_records[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest<K, U> {
    pub selected_records: Vec<K>,
    pub update_data: Vec<U>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub updated_count: usize,
}

/// Body of `DELETE /{entity}/delete` and `DELETE /{entity}/bulk_delete`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest<K> {
    pub selected_records: Vec<K>,
}

/// Per-record outcome of `DELETE /{entity}/delete`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse<K> {
    #[serde(default = "Vec::new")]
    pub deleted: Vec<K>,
    #[serde(default = "Vec::new")]
    pub failed: Vec<FailedRecord<K>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRecord<K> {
    pub key: K,
    pub error: String,
}

/// Response of `bulk_delete` and `delete_all`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletedCount {
    #[serde(default)]
    pub deleted_count: usize,
}

/// Body of `POST /{entity}/bulk`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkIngestRequest<C> {
    pub records: Vec<C>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkIngestResponse {
    #[serde(default)]
    pub processed_count: usize,
}

/// Error body returned by the API on failure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_wire_keeps_alignment() {
        let batch = BatchUpdate::new(vec![
            UpdateEntry { key: 3_i64, changes: "c" },
            UpdateEntry { key: 1_i64, changes: "a" },
            UpdateEntry { key: 2_i64, changes: "b" },
        ]);
        let wire = batch.into_wire();
        assert_eq!(wire.selected_records, vec![3, 1, 2]);
        assert_eq!(wire.update_data, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_update_request_shape() {
        let wire = BatchUpdate::new(vec![UpdateEntry { key: 7_i64, changes: json!({"quantity": 2}) }])
            .into_wire();
        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            json!({"selected_records": [7], "update_data": [{"quantity": 2}]})
        );
    }

    #[test]
    fn test_delete_response_defaults() {
        let resp: DeleteResponse<i64> = serde_json::from_value(json!({"deleted": [1, 2]})).unwrap();
        assert_eq!(resp.deleted, vec![1, 2]);
        assert!(resp.failed.is_empty());
    }

    #[test]
    fn test_error_body_text() {
        let body: ApiErrorBody = serde_json::from_value(json!({"error": "duplicate key"})).unwrap();
        assert_eq!(body.text(), Some("duplicate key"));
        let empty: ApiErrorBody = serde_json::from_value(json!({"message": " "})).unwrap();
        assert_eq!(empty.text(), None);
    }
}
