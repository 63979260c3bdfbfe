//! REST client of the record endpoints
//!
//! Every entity exposes the same endpoint set under its collection path.
//! `RecordApi` is the seam used by the list controller, the delete executor
//! and the bulk uploader; `HttpRecordApi` is the browser implementation.

use crate::shared::api_utils::{
    api_base, get_json, get_optional, join_url, send_json, send_json_discard, ApiError,
    HttpMethod,
};
use async_trait::async_trait;
use contracts::domain::common::{
    BatchUpdate, BulkIngestRequest, BulkIngestResponse, DeleteRequest, DeleteResponse,
    DeletedCount, EntityRecord, ReferenceEntry, UpdateResponse,
};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

type KeyOf<A> = <<A as RecordApi>::Record as EntityRecord>::Key;
type CreateOf<A> = <<A as RecordApi>::Record as EntityRecord>::Create;
type UpdateOf<A> = <<A as RecordApi>::Record as EntityRecord>::Update;

#[async_trait(?Send)]
pub trait RecordApi {
    type Record: EntityRecord;

    /// `GET /{entity}`
    async fn list(&self) -> Result<Vec<Self::Record>, ApiError>;

    /// `GET /{entity}/latest`, 404 is `None`
    async fn latest(&self) -> Result<Option<Self::Record>, ApiError>;

    /// `POST /{entity}`
    async fn create(&self, record: &CreateOf<Self>) -> Result<(), ApiError>;

    /// `PUT /{entity}/update`
    async fn update(
        &self,
        batch: BatchUpdate<KeyOf<Self>, UpdateOf<Self>>,
    ) -> Result<UpdateResponse, ApiError>;

    /// `DELETE /{entity}/delete`, per-record outcome
    async fn delete_selected(
        &self,
        keys: &[KeyOf<Self>],
    ) -> Result<DeleteResponse<KeyOf<Self>>, ApiError>;

    /// `DELETE /{entity}/bulk_delete`
    async fn bulk_delete(&self, keys: &[KeyOf<Self>]) -> Result<DeletedCount, ApiError>;

    /// `DELETE /{entity}/delete_all`
    async fn delete_all(&self) -> Result<DeletedCount, ApiError>;

    /// `POST /{entity}/bulk`
    async fn bulk_ingest(&self, records: &[CreateOf<Self>]) -> Result<BulkIngestResponse, ApiError>;
}

/// Browser implementation over `gloo_net`
pub struct HttpRecordApi<T> {
    base: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpRecordApi<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: EntityRecord> HttpRecordApi<T> {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            _record: PhantomData,
        }
    }

    /// Client against the configured API base
    pub fn from_config() -> Self {
        Self::new(api_base())
    }

    fn url(&self, suffix: &str) -> String {
        let path = if suffix.is_empty() {
            T::collection().to_string()
        } else {
            format!("{}/{}", T::collection(), suffix)
        };
        join_url(&self.base, &path)
    }
}

#[async_trait(?Send)]
impl<T: EntityRecord> RecordApi for HttpRecordApi<T> {
    type Record = T;

    async fn list(&self) -> Result<Vec<T>, ApiError> {
        get_json(&self.url("")).await
    }

    async fn latest(&self) -> Result<Option<T>, ApiError> {
        get_optional(&self.url("latest")).await
    }

    async fn create(&self, record: &T::Create) -> Result<(), ApiError> {
        send_json_discard(HttpMethod::Post, &self.url(""), record).await
    }

    async fn update(
        &self,
        batch: BatchUpdate<T::Key, T::Update>,
    ) -> Result<UpdateResponse, ApiError> {
        let body = batch.into_wire();
        send_json(HttpMethod::Put, &self.url("update"), Some(&body)).await
    }

    async fn delete_selected(&self, keys: &[T::Key]) -> Result<DeleteResponse<T::Key>, ApiError> {
        let body = DeleteRequest {
            selected_records: keys.to_vec(),
        };
        send_json(HttpMethod::Delete, &self.url("delete"), Some(&body)).await
    }

    async fn bulk_delete(&self, keys: &[T::Key]) -> Result<DeletedCount, ApiError> {
        let body = DeleteRequest {
            selected_records: keys.to_vec(),
        };
        send_json(HttpMethod::Delete, &self.url("bulk_delete"), Some(&body)).await
    }

    async fn delete_all(&self) -> Result<DeletedCount, ApiError> {
        send_json::<(), _>(HttpMethod::Delete, &self.url("delete_all"), None).await
    }

    async fn bulk_ingest(&self, records: &[T::Create]) -> Result<BulkIngestResponse, ApiError> {
        let body = BulkIngestRequest {
            records: records.to_vec(),
        };
        send_json(HttpMethod::Post, &self.url("bulk"), Some(&body)).await
    }
}

/// `GET /{customers|suppliers|products}`
pub async fn fetch_reference<R: ReferenceEntry>() -> Result<Vec<R>, ApiError> {
    get_json(&join_url(&api_base(), R::LIST.path())).await
}

/// GET of an optional summary endpoint (status check etc.), 404 is `None`
pub async fn fetch_summary<R: DeserializeOwned>(path: &str) -> Result<Option<R>, ApiError> {
    get_optional(&join_url(&api_base(), path)).await
}

#[cfg(test)]
pub mod testing {
    //! In-memory `RecordApi` that records every call

    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        List,
        Latest,
        Create,
        Update(usize),
        Delete(usize),
        BulkDelete(usize),
        DeleteAll,
        BulkIngest(usize),
    }

    pub struct RecordingApi<T: EntityRecord> {
        pub records: Vec<T>,
        pub calls: RefCell<Vec<Call>>,
        /// 1-based numbers of bulk-ingest calls that fail
        pub failing_ingest_calls: Vec<usize>,
        /// Keys the per-record delete reports as failed
        pub failing_keys: Vec<T::Key>,
        pub fail_bulk_delete: bool,
    }

    impl<T: EntityRecord> RecordingApi<T> {
        pub fn new(records: Vec<T>) -> Self {
            Self {
                records,
                calls: RefCell::new(Vec::new()),
                failing_ingest_calls: Vec::new(),
                failing_keys: Vec::new(),
                fail_bulk_delete: false,
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }

        fn rejected() -> ApiError {
            ApiError::Http {
                status: 500,
                message: "rejected".to_string(),
            }
        }
    }

    #[async_trait(?Send)]
    impl<T: EntityRecord> RecordApi for RecordingApi<T> {
        type Record = T;

        async fn list(&self) -> Result<Vec<T>, ApiError> {
            self.record(Call::List);
            Ok(self.records.clone())
        }

        async fn latest(&self) -> Result<Option<T>, ApiError> {
            self.record(Call::Latest);
            Ok(self.records.last().cloned())
        }

        async fn create(&self, _record: &T::Create) -> Result<(), ApiError> {
            self.record(Call::Create);
            Ok(())
        }

        async fn update(
            &self,
            batch: BatchUpdate<T::Key, T::Update>,
        ) -> Result<UpdateResponse, ApiError> {
            self.record(Call::Update(batch.len()));
            Ok(UpdateResponse {
                updated_count: batch.len(),
            })
        }

        async fn delete_selected(&self, keys: &[T::Key]) -> Result<DeleteResponse<T::Key>, ApiError> {
            self.record(Call::Delete(keys.len()));
            let (failed, deleted): (Vec<T::Key>, Vec<T::Key>) = keys
                .iter()
                .cloned()
                .partition(|k| self.failing_keys.contains(k));
            Ok(DeleteResponse {
                deleted,
                failed: failed
                    .into_iter()
                    .map(|key| contracts::domain::common::FailedRecord {
                        key,
                        error: "record is referenced".to_string(),
                    })
                    .collect(),
            })
        }

        async fn bulk_delete(&self, keys: &[T::Key]) -> Result<DeletedCount, ApiError> {
            self.record(Call::BulkDelete(keys.len()));
            if self.fail_bulk_delete {
                return Err(Self::rejected());
            }
            Ok(DeletedCount {
                deleted_count: keys.len(),
            })
        }

        async fn delete_all(&self) -> Result<DeletedCount, ApiError> {
            self.record(Call::DeleteAll);
            Ok(DeletedCount {
                deleted_count: self.records.len(),
            })
        }

        async fn bulk_ingest(&self, records: &[T::Create]) -> Result<BulkIngestResponse, ApiError> {
            self.record(Call::BulkIngest(records.len()));
            let call_no = self
                .calls
                .borrow()
                .iter()
                .filter(|c| matches!(c, Call::BulkIngest(_)))
                .count();
            if self.failing_ingest_calls.contains(&call_no) {
                return Err(Self::rejected());
            }
            Ok(BulkIngestResponse {
                processed_count: records.len(),
            })
        }
    }
}
