use async_trait::async_trait;

use crate::error::AppError;

use super::types::{
    chunk::Chunk,
    collection::Collection,
    content_item::{ContentItem, ContentItemUpdate},
    content_item_version::ContentItemVersion,
    tag::Tag,
};

/// Narrow persistence contract the ingestion pipeline writes through.
///
/// Ingestion assumes it is the only writer for the duration of a run: each
/// item's read-decide-write sequence runs to completion before the next item
/// starts, and no locking happens at this boundary. Adapters are encouraged
/// to wrap `create_item`/`update_item` plus their follow-up writes in one
/// transaction; the in-memory adapter used for tests does not need to.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn find_by_slug(
        &self,
        clinic_id: &str,
        slug: &str,
    ) -> Result<Option<ContentItem>, AppError>;

    async fn find_by_title(
        &self,
        clinic_id: &str,
        title: &str,
    ) -> Result<Option<ContentItem>, AppError>;

    async fn create_item(&self, item: ContentItem) -> Result<ContentItem, AppError>;

    async fn update_item(
        &self,
        item_id: &str,
        update: ContentItemUpdate,
    ) -> Result<ContentItem, AppError>;

    /// Appends one immutable version snapshot. Never overwrites.
    async fn create_version(&self, version: ContentItemVersion) -> Result<(), AppError>;

    /// Drops every chunk the item had and stores the given set.
    async fn replace_chunks(&self, item_id: &str, chunks: Vec<Chunk>) -> Result<(), AppError>;

    async fn upsert_tags(&self, clinic_id: &str, names: &[String]) -> Result<Vec<Tag>, AppError>;

    async fn set_item_tags(&self, item_id: &str, tag_ids: &[String]) -> Result<(), AppError>;

    /// Names of the tags currently associated with an item, used to rebuild
    /// the persisted side of the checksum comparison.
    async fn item_tag_names(&self, item_id: &str) -> Result<Vec<String>, AppError>;

    async fn find_or_create_collection(
        &self,
        clinic_id: &str,
        title: &str,
        description: &str,
    ) -> Result<Collection, AppError>;

    /// Oldest clinic known to the store, used by the trigger binary when no
    /// clinic id is configured.
    async fn oldest_clinic(&self) -> Result<Option<String>, AppError>;
}
