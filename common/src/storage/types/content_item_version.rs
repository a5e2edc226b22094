use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{metadata::Metadata, section::Section};

/// Immutable snapshot of an item at one version number. Append-only: created
/// exactly once per version transition and never touched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItemVersion {
    pub id: String,
    pub item_id: String,
    pub version_number: u32,
    pub metadata_snapshot: Metadata,
    pub sections_snapshot: Vec<Section>,
    pub change_summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ContentItemVersion {
    pub fn new(
        item_id: String,
        version_number: u32,
        metadata_snapshot: Metadata,
        sections_snapshot: Vec<Section>,
        change_summary: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            item_id,
            version_number,
            metadata_snapshot,
            sections_snapshot,
            change_summary,
            created_at: Utc::now(),
        }
    }
}
