use crate::{DecodeError, DecodeResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use skystore_client::DocumentSnapshot;
use std::time::{SystemTime, UNIX_EPOCH};

/// A decoded category record.
///
/// Constructed only via [`Category::from_snapshot`]; immutable afterwards.
/// `key` is the document id in the store, `id` the record's own numeric id.
/// Timestamps are milliseconds since Unix epoch.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Category {
    /// Decodes a snapshot into a category.
    ///
    /// Required: `id` (integer) — missing or mistyped fails with
    /// [`DecodeError::MalformedRecord`]. Optional: `name` defaults to the
    /// empty string, `created_at`/`updated_at` default to now.
    pub fn from_snapshot(snapshot: &DocumentSnapshot) -> DecodeResult<Self> {
        let id = snapshot
            .get_i64("id")
            .ok_or(DecodeError::MalformedRecord { field: "id" })?;

        let now = now_millis();
        Ok(Self {
            key: snapshot.id.clone(),
            id,
            name: snapshot.get_str("name").unwrap_or_default().to_string(),
            created_at: snapshot.get_i64("created_at").unwrap_or(now),
            updated_at: snapshot.get_i64("updated_at").unwrap_or(now),
        })
    }

    /// The JSON payload written back to the store for this category.
    #[must_use]
    pub fn to_fields(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }
}

/// Equality compares the identity key and the content key only; timestamps
/// and the numeric id do not participate.
impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.name == other.name
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_millis() as i64
}
