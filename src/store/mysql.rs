use anyhow::{Context, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use sqlx::MySqlPool;
use sqlx::types::Json;
use tracing::debug;

use super::AttendanceStore;
use crate::model::attendance::{AttendanceFilter, AttendanceRecord, Document, NaturalKey, RecordId};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS attendance_records (
        id CHAR(36) NOT NULL PRIMARY KEY,
        document JSON NOT NULL
    )
"#;

/// Attendance documents stored as JSON in a single MySQL table.
#[derive(Clone)]
pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create attendance_records table")?;
        Ok(())
    }
}

/// String value of a top-level document field.
fn field(name: &str) -> String {
    format!("JSON_UNQUOTE(JSON_EXTRACT(document, '$.{}'))", name)
}

/// Natural-key condition: compares the stored JSON value, not its text.
fn key_condition(name: &str) -> String {
    format!("JSON_EXTRACT(document, '$.{}') = CAST(? AS JSON)", name)
}

/// Path to a top-level key, quoted so any key name is addressed literally.
fn json_path(key: &str) -> String {
    format!("$.\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\""))
}

/// `JSON_SET` over every key of `fields`, one path/value placeholder pair each.
fn set_expression(fields: &Document) -> String {
    if fields.is_empty() {
        return "document".to_string();
    }
    let pairs = vec!["?, CAST(? AS JSON)"; fields.len()];
    format!("JSON_SET(document, {})", pairs.join(", "))
}

/// Escapes LIKE wildcards so the name filter matches literally.
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// WHERE clause and bindings for a list filter.
fn filter_clause(filter: &AttendanceFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut bindings = Vec::new();

    if let Some(unit) = filter.unit() {
        conditions.push(format!("{} = ?", field("unit")));
        bindings.push(unit.to_string());
    }

    if let Some(jabatan) = filter.jabatan() {
        conditions.push(format!("{} = ?", field("jabatan")));
        bindings.push(jabatan.to_string());
    }

    if let Some(name) = filter.name_pattern() {
        conditions.push(format!("LOWER({}) LIKE ?", field("name")));
        bindings.push(like_pattern(name));
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bindings)
}

impl AttendanceStore for MySqlAttendanceStore {
    fn list<'a>(&'a self, filter: &'a AttendanceFilter) -> BoxFuture<'a, Result<Vec<AttendanceRecord>>> {
        async move {
            let (where_clause, bindings) = filter_clause(filter);
            let sql = format!(
                "SELECT id, document FROM attendance_records {} ORDER BY {} DESC",
                where_clause,
                field("date")
            );
            debug!(sql = %sql, bindings = ?bindings, "Fetching attendance");

            let mut query = sqlx::query_as::<_, (String, Json<Document>)>(&sql);
            for b in &bindings {
                query = query.bind(b);
            }

            let rows = query
                .fetch_all(&self.pool)
                .await
                .context("Failed to fetch attendance records")?;

            Ok(rows
                .into_iter()
                .map(|(id, Json(document))| AttendanceRecord {
                    id: RecordId::from(id),
                    document,
                })
                .collect())
        }
        .boxed()
    }

    fn find_by_key<'a>(&'a self, key: &'a NaturalKey) -> BoxFuture<'a, Result<Option<RecordId>>> {
        async move {
            let conditions = NaturalKey::FIELDS
                .iter()
                .map(|name| key_condition(name))
                .collect::<Vec<_>>()
                .join(" AND ");
            let sql = format!("SELECT id FROM attendance_records WHERE {} LIMIT 1", conditions);

            let mut query = sqlx::query_scalar::<_, String>(&sql);
            for value in key.values() {
                query = query.bind(Json(value));
            }

            let id = query
                .fetch_optional(&self.pool)
                .await
                .context("Failed to look up attendance record")?;
            Ok(id.map(RecordId::from))
        }
        .boxed()
    }

    fn insert<'a>(&'a self, id: &'a RecordId, document: &'a Document) -> BoxFuture<'a, Result<()>> {
        async move {
            sqlx::query("INSERT INTO attendance_records (id, document) VALUES (?, ?)")
                .bind(id.as_str())
                .bind(Json(document))
                .execute(&self.pool)
                .await
                .context("Failed to insert attendance record")?;
            Ok(())
        }
        .boxed()
    }

    fn set_fields<'a>(&'a self, id: &'a RecordId, fields: &'a Document) -> BoxFuture<'a, Result<u64>> {
        async move {
            let sql = format!(
                "UPDATE attendance_records SET document = {} WHERE id = ?",
                set_expression(fields)
            );
            debug!(sql = %sql, id = %id, "Updating attendance");

            let mut query = sqlx::query(&sql);
            for (key, value) in fields {
                query = query.bind(json_path(key)).bind(Json(value));
            }

            let result = query
                .bind(id.as_str())
                .execute(&self.pool)
                .await
                .context("Failed to update attendance record")?;
            Ok(result.rows_affected())
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a RecordId) -> BoxFuture<'a, Result<u64>> {
        async move {
            let result = sqlx::query("DELETE FROM attendance_records WHERE id = ?")
                .bind(id.as_str())
                .execute(&self.pool)
                .await
                .context("Failed to delete attendance record")?;
            Ok(result.rows_affected())
        }
        .boxed()
    }
}
