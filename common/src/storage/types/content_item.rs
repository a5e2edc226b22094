use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{metadata::Metadata, section::Section};

/// Lifecycle state owned by the governance workflow. Ingestion only ever
/// writes `Draft`; the other transitions happen outside this pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Draft,
    InReview,
    Published,
    Rejected,
}

/// Clinic-scoped unit of content. Created on first ingest of a slug, mutated
/// only by re-ingestion producing a new version, never deleted by ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub clinic_id: String,
    pub collection_id: String,
    /// Unique per clinic and collection.
    pub slug: String,
    pub title: String,
    pub content_type: String,
    pub metadata: Metadata,
    pub sections: Vec<Section>,
    pub status: ItemStatus,
    /// Monotonic, starts at 1, increases by exactly 1 per accepted change.
    pub version: u32,
    pub source_file_name: Option<String>,
    pub import_timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set applied to an existing item when a re-ingest produced a new
/// version. The slug is deliberately absent: it never changes after create.
#[derive(Debug, Clone)]
pub struct ContentItemUpdate {
    pub collection_id: String,
    pub title: String,
    pub content_type: String,
    pub metadata: Metadata,
    pub sections: Vec<Section>,
    pub status: ItemStatus,
    pub version: u32,
    pub source_file_name: Option<String>,
    pub import_timestamp: DateTime<Utc>,
}

impl ContentItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clinic_id: String,
        collection_id: String,
        slug: String,
        title: String,
        content_type: String,
        metadata: Metadata,
        sections: Vec<Section>,
        source_file_name: Option<String>,
        import_timestamp: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            clinic_id,
            collection_id,
            slug,
            title,
            content_type,
            metadata,
            sections,
            status: ItemStatus::Draft,
            version: 1,
            source_file_name,
            import_timestamp,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: ContentItemUpdate) {
        self.collection_id = update.collection_id;
        self.title = update.title;
        self.content_type = update.content_type;
        self.metadata = update.metadata;
        self.sections = update.sections;
        self.status = update.status;
        self.version = update.version;
        self.source_file_name = update.source_file_name;
        self.import_timestamp = update.import_timestamp;
        self.updated_at = Utc::now();
    }
}
