//! The ingestion pipeline: segmentation or starter-pack loading up front,
//! then a sequential, per-item read-decide-write upsert against the
//! repository contract. Items complete one at a time; committed progress is
//! never rolled back when a later item fails.

use std::{path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use common::{
    error::AppError,
    storage::{
        repository::ContentRepository,
        types::{
            collection::Collection,
            content_item::{ContentItem, ContentItemUpdate, ItemStatus},
            content_item_version::ContentItemVersion,
            measure::StarterPackMeasure,
            metadata::Metadata,
            section::Section,
        },
    },
};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    checksum::content_checksum,
    chunking::{build_chunks, DEFAULT_MAX_TOKENS, DEFAULT_OVERLAP},
    parse::{normalize_whitespace, slugify, split_items, split_sections},
    slug::SlugAllocator,
    starter_pack::{
        build_metadata, build_sections, load_items, STARTER_COLLECTION_DESCRIPTION,
        STARTER_COLLECTION_TITLE,
    },
};


#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub max_chunk_tokens: usize,
    pub chunk_overlap: usize,
    /// Content type given to document-path items, which carry no typed
    /// metadata of their own at import time.
    pub default_content_type: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: DEFAULT_MAX_TOKENS,
            chunk_overlap: DEFAULT_OVERLAP,
            default_content_type: "Therapeutic Content".to_string(),
        }
    }
}

/// Itemized result of one ingestion run, printed as JSON by the trigger
/// binary. `ok` is false only when validation refused the whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub ok: bool,
    pub created_items: usize,
    pub updated_items: usize,
    pub skipped_same_checksum: usize,
    pub created_versions: usize,
    pub validation_errors: Vec<String>,
}

impl Default for IngestSummary {
    fn default() -> Self {
        Self {
            ok: true,
            created_items: 0,
            updated_items: 0,
            skipped_same_checksum: 0,
            created_versions: 0,
            validation_errors: Vec::new(),
        }
    }
}

impl IngestSummary {
    pub fn merge(&mut self, other: &IngestSummary) {
        self.ok = self.ok && other.ok;
        self.created_items += other.created_items;
        self.updated_items += other.updated_items;
        self.skipped_same_checksum += other.skipped_same_checksum;
        self.created_versions += other.created_versions;
        self.validation_errors
            .extend(other.validation_errors.iter().cloned());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Created,
    Updated,
    Skipped,
}

/// Everything the upsert step needs to decide create/update/skip and write
/// one item, regardless of which input path produced it.
struct ItemDraft {
    slug: String,
    title: String,
    content_type: String,
    metadata: Metadata,
    sections: Vec<Section>,
    tags: Vec<String>,
    measure: Option<StarterPackMeasure>,
    source_file_name: String,
    import_timestamp: DateTime<Utc>,
    create_summary: String,
    update_summary: String,
}

pub struct IngestionPipeline {
    repository: Arc<dyn ContentRepository>,
    config: PipelineConfig,
}

impl IngestionPipeline {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self::with_config(repository, PipelineConfig::default())
    }

    pub fn with_config(repository: Arc<dyn ContentRepository>, config: PipelineConfig) -> Self {
        Self { repository, config }
    }

    /// Ingests extracted document text: whitespace normalization, item and
    /// section segmentation, then one upsert per item in segmentation
    /// order. A document from which nothing can be segmented aborts the
    /// run.
    #[tracing::instrument(skip_all, fields(clinic_id = %clinic_id, source = %source_file_name))]
    pub async fn ingest_document(
        &self,
        clinic_id: &str,
        collection: &Collection,
        text: &str,
        source_file_name: &str,
    ) -> Result<IngestSummary, AppError> {
        let normalized = normalize_whitespace(text);
        let items = split_items(&normalized);
        if items.is_empty() {
            return Err(AppError::Ingestion(format!(
                "no items extracted from {source_file_name}"
            )));
        }
        info!(items = items.len(), "segmented document");

        let mut allocator = SlugAllocator::new();
        let mut summary = IngestSummary::default();

        for item in items {
            let slug = allocator.allocate(&slugify(&item.title));
            let sections = split_sections(&item.title, &item.body, &collection.title);
            let content_type = self.config.default_content_type.clone();
            let draft = ItemDraft {
                slug,
                title: item.title,
                metadata: Metadata::with_content_type(&content_type),
                content_type,
                sections,
                tags: Vec::new(),
                measure: None,
                source_file_name: source_file_name.to_string(),
                import_timestamp: Utc::now(),
                create_summary: format!("Imported from {source_file_name}"),
                update_summary: format!("Re-imported from {source_file_name}"),
            };
            self.apply_upsert(clinic_id, &collection.id, draft, &mut summary)
                .await?;
        }

        Ok(summary)
    }

    /// Ingests a starter-pack directory. Validation is all-or-nothing:
    /// any schema violation in any file refuses the whole batch without
    /// touching the repository.
    #[tracing::instrument(skip_all, fields(clinic_id = %clinic_id, dir = %dir.display()))]
    pub async fn ingest_starter_pack(
        &self,
        clinic_id: &str,
        dir: &Path,
    ) -> Result<IngestSummary, AppError> {
        let pack = load_items(dir)?;
        if !pack.errors.is_empty() {
            info!(errors = pack.errors.len(), "starter pack rejected by validation");
            return Ok(IngestSummary {
                ok: false,
                validation_errors: pack.errors,
                ..IngestSummary::default()
            });
        }

        let collection = self
            .repository
            .find_or_create_collection(
                clinic_id,
                STARTER_COLLECTION_TITLE,
                STARTER_COLLECTION_DESCRIPTION,
            )
            .await?;

        let mut summary = IngestSummary::default();
        for item in pack.items {
            let sections = build_sections(&item.title, &item.sections, STARTER_COLLECTION_TITLE);
            let metadata = build_metadata(&item)?;
            let draft = ItemDraft {
                source_file_name: format!("starter-pack-v1/{}.json", item.slug),
                slug: item.slug,
                title: item.title,
                content_type: item.content_type.as_str().to_string(),
                metadata,
                sections,
                tags: item.clinical_tags,
                measure: Some(item.measure),
                // Starter packs deliberately pin the import timestamp to
                // epoch zero; the document path records wall-clock time.
                import_timestamp: DateTime::<Utc>::UNIX_EPOCH,
                create_summary: "Starter pack v1 import".to_string(),
                update_summary: "Starter pack v1 update".to_string(),
            };
            self.apply_upsert(clinic_id, &collection.id, draft, &mut summary)
                .await?;
        }

        Ok(summary)
    }

    async fn apply_upsert(
        &self,
        clinic_id: &str,
        collection_id: &str,
        draft: ItemDraft,
        summary: &mut IngestSummary,
    ) -> Result<(), AppError> {
        let action = self.upsert_item(clinic_id, collection_id, draft).await?;
        match action {
            UpsertAction::Created => {
                summary.created_items += 1;
                summary.created_versions += 1;
            }
            UpsertAction::Updated => {
                summary.updated_items += 1;
                summary.created_versions += 1;
            }
            UpsertAction::Skipped => summary.skipped_same_checksum += 1,
        }
        Ok(())
    }

    /// One item's read-decide-write sequence. Looks up the existing item by
    /// slug, then by title; compares content fingerprints to decide between
    /// a no-op skip and a version bump; regenerates the chunk set whenever
    /// a version is written.
    async fn upsert_item(
        &self,
        clinic_id: &str,
        collection_id: &str,
        draft: ItemDraft,
    ) -> Result<UpsertAction, AppError> {
        let section_texts: Vec<String> = draft
            .sections
            .iter()
            .map(|section| section.text.clone())
            .collect();
        let incoming_checksum = content_checksum(
            &draft.title,
            &draft.slug,
            &draft.content_type,
            &section_texts,
            draft.measure.as_ref(),
            &draft.tags,
        );

        let existing = match self
            .repository
            .find_by_slug(clinic_id, &draft.slug)
            .await?
        {
            Some(item) => Some(item),
            None => self.repository.find_by_title(clinic_id, &draft.title).await?,
        };

        let Some(existing) = existing else {
            let item = ContentItem::new(
                clinic_id.to_string(),
                collection_id.to_string(),
                draft.slug.clone(),
                draft.title.clone(),
                draft.content_type.clone(),
                draft.metadata.clone(),
                draft.sections.clone(),
                Some(draft.source_file_name.clone()),
                draft.import_timestamp,
            );
            let created = self.repository.create_item(item).await?;
            self.write_version_artifacts(&created, &draft, 1, &draft.create_summary)
                .await?;
            info!(slug = %draft.slug, "created content item");
            return Ok(UpsertAction::Created);
        };

        let existing_tags = self.repository.item_tag_names(&existing.id).await?;
        let existing_measure = existing
            .metadata
            .starter_pack
            .as_ref()
            .map(|extras| extras.measure.clone());
        let existing_texts: Vec<String> = existing
            .sections
            .iter()
            .map(|section| section.text.clone())
            .collect();
        let existing_checksum = content_checksum(
            &existing.title,
            &existing.slug,
            &existing.content_type,
            &existing_texts,
            existing_measure.as_ref(),
            &existing_tags,
        );

        if existing_checksum == incoming_checksum {
            debug!(slug = %existing.slug, "checksum unchanged, skipping");
            return Ok(UpsertAction::Skipped);
        }

        let next_version = existing.version + 1;
        let update = ContentItemUpdate {
            collection_id: collection_id.to_string(),
            title: draft.title.clone(),
            content_type: draft.content_type.clone(),
            metadata: draft.metadata.clone(),
            sections: draft.sections.clone(),
            status: ItemStatus::Draft,
            version: next_version,
            source_file_name: Some(draft.source_file_name.clone()),
            import_timestamp: draft.import_timestamp,
        };
        let updated = self.repository.update_item(&existing.id, update).await?;
        self.write_version_artifacts(&updated, &draft, next_version, &draft.update_summary)
            .await?;
        info!(slug = %updated.slug, version = next_version, "updated content item");
        Ok(UpsertAction::Updated)
    }

    /// The write half shared by create and update: version snapshot, tag
    /// associations, and a fully regenerated chunk set.
    async fn write_version_artifacts(
        &self,
        item: &ContentItem,
        draft: &ItemDraft,
        version_number: u32,
        change_summary: &str,
    ) -> Result<(), AppError> {
        self.repository
            .create_version(ContentItemVersion::new(
                item.id.clone(),
                version_number,
                draft.metadata.clone(),
                draft.sections.clone(),
                Some(change_summary.to_string()),
            ))
            .await?;

        let tags = self
            .repository
            .upsert_tags(&item.clinic_id, &draft.tags)
            .await?;
        let tag_ids: Vec<String> = tags.into_iter().map(|tag| tag.id).collect();
        self.repository.set_item_tags(&item.id, &tag_ids).await?;

        let chunks = build_chunks(
            &draft.title,
            &draft.sections,
            version_number,
            self.config.max_chunk_tokens,
            self.config.chunk_overlap,
        );
        debug!(slug = %draft.slug, chunks = chunks.len(), "replacing chunk set");
        self.repository.replace_chunks(&item.id, chunks).await?;

        Ok(())
    }
}
