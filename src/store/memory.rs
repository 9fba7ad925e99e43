use std::sync::RwLock;

use anyhow::Result;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use super::AttendanceStore;
use crate::model::attendance::{AttendanceFilter, AttendanceRecord, Document, NaturalKey, RecordId};

/// Process-local store with the same field semantics as the MySQL backend.
#[derive(Default)]
pub struct MemoryAttendanceStore {
    records: RwLock<Vec<AttendanceRecord>>,
}

impl MemoryAttendanceStore {
    pub fn len(&self) -> usize {
        self.records.read().expect("attendance store poisoned").len()
    }
}

impl AttendanceStore for MemoryAttendanceStore {
    fn list<'a>(&'a self, filter: &'a AttendanceFilter) -> BoxFuture<'a, Result<Vec<AttendanceRecord>>> {
        async move {
            let mut matched: Vec<AttendanceRecord> = self
                .records
                .read()
                .expect("attendance store poisoned")
                .iter()
                .filter(|r| filter.matches(&r.document))
                .cloned()
                .collect();

            let date = |r: &AttendanceRecord| r.document.get("date").and_then(Value::as_str).map(str::to_owned);
            matched.sort_by(|a, b| date(b).cmp(&date(a)));
            Ok(matched)
        }
        .boxed()
    }

    fn find_by_key<'a>(&'a self, key: &'a NaturalKey) -> BoxFuture<'a, Result<Option<RecordId>>> {
        async move {
            Ok(self
                .records
                .read()
                .expect("attendance store poisoned")
                .iter()
                .find(|r| key.matches(&r.document))
                .map(|r| r.id.clone()))
        }
        .boxed()
    }

    fn insert<'a>(&'a self, id: &'a RecordId, document: &'a Document) -> BoxFuture<'a, Result<()>> {
        async move {
            self.records
                .write()
                .expect("attendance store poisoned")
                .push(AttendanceRecord {
                    id: id.clone(),
                    document: document.clone(),
                });
            Ok(())
        }
        .boxed()
    }

    fn set_fields<'a>(&'a self, id: &'a RecordId, fields: &'a Document) -> BoxFuture<'a, Result<u64>> {
        async move {
            let mut records = self.records.write().expect("attendance store poisoned");
            match records.iter_mut().find(|r| &r.id == id) {
                Some(record) => {
                    for (key, value) in fields {
                        record.document.insert(key.clone(), value.clone());
                    }
                    Ok(1)
                }
                None => Ok(0),
            }
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a RecordId) -> BoxFuture<'a, Result<u64>> {
        async move {
            let mut records = self.records.write().expect("attendance store poisoned");
            let before = records.len();
            records.retain(|r| &r.id != id);
            Ok((before - records.len()) as u64)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[actix_web::test]
    async fn set_fields_replaces_top_level_values() {
        let store = MemoryAttendanceStore::default();
        let id = RecordId::generate();
        store
            .insert(&id, &doc(json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3})))
            .await
            .unwrap();

        let matched = store
            .set_fields(&id, &doc(json!({"b": {"y": 5}, "c": null, "d": "new"})))
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let stored = store.list(&AttendanceFilter::default()).await.unwrap();
        assert_eq!(
            Value::Object(stored[0].document.clone()),
            json!({"a": 1, "b": {"y": 5}, "c": null, "d": "new"})
        );

        let missing = RecordId::generate();
        assert_eq!(store.set_fields(&missing, &doc(json!({"a": 2}))).await.unwrap(), 0);
    }
}
