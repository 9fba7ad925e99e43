use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

/// Attendance documents are free-form JSON objects.
pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "_id";

/// Opaque store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Fields that identify one employee's attendance for one day. Values are
/// compared as JSON, so `20240501` and `"20240501"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalKey {
    pub date: Value,
    pub name: Value,
    pub unit: Value,
    pub jabatan: Value,
}

impl NaturalKey {
    pub const FIELDS: [&'static str; 4] = ["date", "name", "unit", "jabatan"];

    /// Reads the key out of a document. Errors with the missing field name.
    pub fn from_document(doc: &Document) -> Result<Self, String> {
        let field = |name: &str| {
            doc.get(name)
                .cloned()
                .ok_or_else(|| format!("Missing required field: {}", name))
        };

        Ok(Self {
            date: field("date")?,
            name: field("name")?,
            unit: field("unit")?,
            jabatan: field("jabatan")?,
        })
    }

    pub fn values(&self) -> [&Value; 4] {
        [&self.date, &self.name, &self.unit, &self.jabatan]
    }

    pub fn matches(&self, doc: &Document) -> bool {
        Self::FIELDS
            .iter()
            .zip(self.values())
            .all(|(field, expected)| doc.get(*field) == Some(expected))
    }
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceFilter {
    /// Exact unit match
    #[schema(example = "Cabang A")]
    pub unit: Option<String>,
    /// Exact position match
    #[schema(example = "Teller")]
    pub jabatan: Option<String>,
    /// Case-insensitive substring of the employee name
    #[schema(example = "jo")]
    pub name: Option<String>,
}

// Blank query values filter nothing.
impl AttendanceFilter {
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref().filter(|v| !v.is_empty())
    }

    pub fn jabatan(&self) -> Option<&str> {
        self.jabatan.as_deref().filter(|v| !v.is_empty())
    }

    pub fn name_pattern(&self) -> Option<&str> {
        self.name.as_deref().filter(|v| !v.is_empty())
    }

    pub fn matches(&self, doc: &Document) -> bool {
        let field = |name: &str| doc.get(name).and_then(Value::as_str);

        if let Some(unit) = self.unit() {
            if field("unit") != Some(unit) {
                return false;
            }
        }
        if let Some(jabatan) = self.jabatan() {
            if field("jabatan") != Some(jabatan) {
                return false;
            }
        }
        if let Some(pattern) = self.name_pattern() {
            let pattern = pattern.to_lowercase();
            match field("name") {
                Some(name) if name.to_lowercase().contains(&pattern) => {}
                _ => return false,
            }
        }
        true
    }
}

/// A stored document together with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub document: Document,
}

impl AttendanceRecord {
    /// The wire form: the document with `_id` set.
    pub fn into_json(self) -> Document {
        let mut doc = self.document;
        doc.insert(ID_FIELD.to_string(), Value::String(self.id.0));
        doc
    }
}
