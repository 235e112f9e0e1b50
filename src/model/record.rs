use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A project as served by the catalog backend.
///
/// Records are read-only snapshots; the view never edits them in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordWire", into = "RecordWire")]
pub struct ProjectRecord {
    /// Unique within a fetched set (used as the row key)
    pub name: String,
    pub description: String,
    /// Stack / tag label
    pub tech: String,
    /// Parsed creation time. `None` when the backend sent nothing usable.
    pub created_at: Option<DateTime<Utc>>,
    /// The timestamp exactly as received
    pub created_at_raw: Option<String>,
}

impl ProjectRecord {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tech: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        ProjectRecord {
            name: name.into(),
            description: description.into(),
            tech: tech.into(),
            created_at: Some(created_at),
            created_at_raw: Some(created_at.to_rfc3339()),
        }
    }

    /// Text the search box is matched against: name, description and tech
    /// run together with no separator.
    pub fn search_text(&self) -> String {
        format!("{}{}{}", self.name, self.description, self.tech)
    }
}

/// Payload for creating a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub tech: String,
}

impl NewProject {
    /// Trimmed payload, or the reason the name is unusable. Names end up in
    /// the `/projects/{name}` route, so they cannot contain a slash.
    pub fn new(name: &str, description: &str, tech: &str) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        if name.contains('/') {
            return Err("Name cannot contain '/'".to_string());
        }
        Ok(NewProject {
            name: name.to_string(),
            description: description.trim().to_string(),
            tech: tech.trim().to_string(),
        })
    }
}

/// JSON shape on the wire (`createdAt` in camelCase, any field may be absent)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordWire {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tech: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<serde_json::Value>,
}

impl From<RecordWire> for ProjectRecord {
    fn from(wire: RecordWire) -> Self {
        let (created_at, created_at_raw) = match wire.created_at {
            Some(serde_json::Value::String(s)) => (parse_timestamp(&s), Some(s)),
            Some(serde_json::Value::Number(n)) => {
                let parsed = n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single());
                (parsed, Some(n.to_string()))
            }
            _ => (None, None),
        };
        ProjectRecord {
            name: wire.name,
            description: wire.description,
            tech: wire.tech,
            created_at,
            created_at_raw,
        }
    }
}

impl From<ProjectRecord> for RecordWire {
    fn from(record: ProjectRecord) -> Self {
        let created_at = match (record.created_at_raw, record.created_at) {
            (Some(raw), _) => Some(serde_json::Value::String(raw)),
            (None, Some(ts)) => Some(serde_json::Value::String(ts.to_rfc3339())),
            (None, None) => None,
        };
        RecordWire {
            name: record.name,
            description: record.description,
            tech: record.tech,
            created_at,
        }
    }
}

/// Parse a backend timestamp. Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`
/// (read as UTC), or a bare date.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
