//! File records as listed by `GET /api/admin/files`

use chrono::{DateTime, NaiveDateTime, Utc};
use edutalks_core::{FileId, Identifiable, SectionId};
use serde::{Deserialize, Deserializer, Serialize};

/// A document owned by the backend, optionally attached to one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,

    /// Original file name, used as the default download name
    pub filename: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Section the file belongs to, if any
    #[serde(default)]
    pub section_id: Option<SectionId>,

    #[serde(default)]
    pub is_public: bool,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    /// Whether this file is attached to the given section
    pub fn belongs_to(&self, section: SectionId) -> bool {
        self.section_id == Some(section)
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}

impl Identifiable for FileRecord {
    type Id = FileId;

    fn id(&self) -> FileId {
        self.id
    }
}

/// Accept RFC 3339 timestamps as well as naive ones (treated as UTC)
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
}
