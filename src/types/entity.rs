//! Entity records and paginated collection responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Server-side metadata attached to every persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Canonical path to the record.
    #[serde(rename = "self")]
    pub self_link: String,
}

/// A persisted entity: caller-chosen fields plus the server-assigned `id`
/// and a `__meta` envelope.
///
/// Ids are opaque strings invented by the service; the client never
/// generates them. Field values are arbitrary JSON.
///
/// ## Example
///
/// ```rust
/// use loomdb::EntityRecord;
///
/// let record: EntityRecord = serde_json::from_value(serde_json::json!({
///     "id": "ent_1",
///     "title": "Project Phoenix",
///     "__meta": {"self": "/apps/shop/prod/projects/ent_1"}
/// })).unwrap();
///
/// assert_eq!(record.id, "ent_1");
/// assert_eq!(record.get("title").and_then(|v| v.as_str()), Some("Project Phoenix"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Server-assigned identifier.
    pub id: String,
    /// Metadata envelope, including the record's canonical path.
    #[serde(rename = "__meta")]
    pub meta: RecordMeta,
    /// The caller-defined fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EntityRecord {
    /// Returns a field value by name, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the canonical path to this record.
    pub fn self_link(&self) -> &str {
        &self.meta.self_link
    }
}

/// A payload element that carries the `id` of the record it revises.
///
/// The batch update and replace operations require every element to name
/// its target record; this wrapper makes that requirement a type instead
/// of a runtime convention. On the wire the fields are flattened next to
/// the id.
///
/// ## Example
///
/// ```rust
/// use loomdb::Identified;
/// use serde_json::json;
///
/// let patch = Identified::new("ent_1", json!({"title": "Project Phoenix V2"}));
/// let wire = serde_json::to_value(&patch).unwrap();
/// assert_eq!(wire, json!({"id": "ent_1", "title": "Project Phoenix V2"}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identified<T> {
    /// The id of the record to revise.
    pub id: String,
    /// The fields to apply.
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Identified<T> {
    /// Creates a payload element targeting the record with `id`.
    pub fn new(id: impl Into<String>, fields: T) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Pagination block returned with every collection response.
///
/// Invariants maintained by the service: `items` equals the length of the
/// returned sequence and `pages == ceil(total_count / per_page)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total records in the collection, across all pages.
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    /// Records in this page.
    pub items: u64,
    /// Total number of pages.
    pub pages: u64,
    /// This page's number (1-based).
    pub page: u64,
    /// Next page number, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
    /// Previous page number, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<u64>,
    /// Path of this page.
    pub current_page: String,
    /// Path of the previous page, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<String>,
    /// Path of the next page, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    /// Path of the first page, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_page: Option<String>,
    /// Path of the last page, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<String>,
}

/// One page of an entity-kind collection.
///
/// The service keys the record sequence by the entity kind's own name
/// (`{"projects": [...], "__meta": {...}}`); this type resolves that key
/// and exposes the records in order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPage {
    /// The entity kind the page was fetched for.
    pub kind: String,
    /// The records in this page, in service order.
    pub records: Vec<EntityRecord>,
    /// The pagination block.
    pub meta: PageMeta,
}

impl EntityPage {
    /// Parses a collection response body for the given entity kind.
    ///
    /// Fails with a decode error when the body is not an object, lacks the
    /// `__meta` block, or lacks the sequence keyed by `kind`.
    pub(crate) fn from_body(kind: &str, body: Value) -> Result<Self> {
        let Value::Object(mut map) = body else {
            return Err(Error::decode("collection response is not an object"));
        };

        let meta = map
            .remove("__meta")
            .ok_or_else(|| Error::decode("collection response missing __meta"))?;
        let meta: PageMeta = serde_json::from_value(meta)?;

        let records = map.remove(kind).ok_or_else(|| {
            Error::decode(format!("collection response missing \"{}\" sequence", kind))
        })?;
        let records: Vec<EntityRecord> = serde_json::from_value(records)?;

        Ok(Self {
            kind: kind.to_owned(),
            records,
            meta,
        })
    }
}
