//! Attendance store gateway.
//!
//! Backends only persist and query documents; identifier validation,
//! timestamps, natural-key upsert and not-found mapping live in
//! [`AttendanceGateway`] so every backend behaves the same.

pub mod mysql;

#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::attendance::{
    AttendanceFilter, AttendanceRecord, Document, ID_FIELD, NaturalKey, RecordId,
};

/// Storage backend for attendance documents.
pub trait AttendanceStore: Send + Sync {
    /// Matching documents, newest `date` first.
    fn list<'a>(&'a self, filter: &'a AttendanceFilter) -> BoxFuture<'a, Result<Vec<AttendanceRecord>>>;

    fn find_by_key<'a>(&'a self, key: &'a NaturalKey) -> BoxFuture<'a, Result<Option<RecordId>>>;

    fn insert<'a>(&'a self, id: &'a RecordId, document: &'a Document) -> BoxFuture<'a, Result<()>>;

    /// Replaces each top-level field of `fields` on the document with `id`,
    /// leaving other fields alone. Returns the number of documents matched
    /// (0 or 1).
    fn set_fields<'a>(&'a self, id: &'a RecordId, fields: &'a Document) -> BoxFuture<'a, Result<u64>>;

    /// Returns the number of documents deleted (0 or 1).
    fn delete<'a>(&'a self, id: &'a RecordId) -> BoxFuture<'a, Result<u64>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(RecordId),
    Updated(RecordId),
}

/// Entry point for attendance operations. Without a store every operation
/// fails with [`ApiError::NotConfigured`].
#[derive(Clone, Default)]
pub struct AttendanceGateway {
    store: Option<Arc<dyn AttendanceStore>>,
}

impl AttendanceGateway {
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    fn store(&self) -> Result<&dyn AttendanceStore, ApiError> {
        self.store.as_deref().ok_or(ApiError::NotConfigured)
    }

    pub async fn list(&self, filter: &AttendanceFilter) -> Result<Vec<Document>, ApiError> {
        let store = self.store()?;
        let records = store.list(filter).await?;
        debug!(count = records.len(), ?filter, "Listed attendance");
        Ok(records.into_iter().map(AttendanceRecord::into_json).collect())
    }

    /// Inserts `document`, or overwrites the fields of the record that
    /// already holds its (date, name, unit, jabatan) key.
    pub async fn create(&self, mut document: Document) -> Result<CreateOutcome, ApiError> {
        let store = self.store()?;
        document.remove(ID_FIELD);
        let key = NaturalKey::from_document(&document).map_err(ApiError::Validation)?;

        if let Some(id) = store.find_by_key(&key).await? {
            store.set_fields(&id, &document).await?;
            info!(id = %id, "Attendance record overwritten");
            return Ok(CreateOutcome::Updated(id));
        }

        let id = RecordId::generate();
        document.insert("created_at".to_string(), Value::String(timestamp()));
        store.insert(&id, &document).await?;
        info!(id = %id, "Attendance record created");
        Ok(CreateOutcome::Created(id))
    }

    /// Sets the fields of the partial `document` on the record named by its `_id`.
    pub async fn update(&self, mut document: Document) -> Result<(), ApiError> {
        let store = self.store()?;
        let id = record_id(document.remove(ID_FIELD).as_ref())?;

        document.insert("updated_at".to_string(), Value::String(timestamp()));
        if store.set_fields(&id, &document).await? == 0 {
            return Err(ApiError::NotFound("Record not found".to_string()));
        }
        info!(id = %id, "Attendance record updated");
        Ok(())
    }

    pub async fn delete(&self, document: &Document) -> Result<(), ApiError> {
        let store = self.store()?;
        let id = record_id(document.get(ID_FIELD))?;

        if store.delete(&id).await? == 0 {
            return Err(ApiError::NotFound("Record not found".to_string()));
        }
        info!(id = %id, "Attendance record deleted");
        Ok(())
    }
}

fn record_id(value: Option<&Value>) -> Result<RecordId, ApiError> {
    match value {
        Some(Value::String(id)) if !id.is_empty() => Ok(RecordId::from(id.clone())),
        _ => Err(ApiError::Validation("Record ID required".to_string())),
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
