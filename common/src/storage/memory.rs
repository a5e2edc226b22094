use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::AppError;

use super::{
    repository::ContentRepository,
    types::{
        chunk::Chunk,
        collection::Collection,
        content_item::{ContentItem, ContentItemUpdate},
        content_item_version::ContentItemVersion,
        tag::Tag,
    },
};

#[derive(Default)]
struct MemoryState {
    clinics: Vec<(String, DateTime<Utc>)>,
    items: HashMap<String, ContentItem>,
    versions: Vec<ContentItemVersion>,
    chunks: HashMap<String, Vec<Chunk>>,
    tags: Vec<Tag>,
    item_tags: HashMap<String, Vec<String>>,
    collections: Vec<Collection>,
}

/// Repository adapter backed by process memory. Used by the test suite and
/// by the import binary when no production adapter is wired in; data lives
/// for the lifetime of the repository instance.
#[derive(Default)]
pub struct InMemoryContentRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register_clinic(&self, clinic_id: &str) {
        let mut state = self.state.lock().await;
        if !state.clinics.iter().any(|(id, _)| id == clinic_id) {
            state.clinics.push((clinic_id.to_string(), Utc::now()));
        }
    }

    pub async fn versions_for_item(&self, item_id: &str) -> Vec<ContentItemVersion> {
        let state = self.state.lock().await;
        state
            .versions
            .iter()
            .filter(|version| version.item_id == item_id)
            .cloned()
            .collect()
    }

    pub async fn chunks_for_item(&self, item_id: &str) -> Vec<Chunk> {
        let state = self.state.lock().await;
        state.chunks.get(item_id).cloned().unwrap_or_default()
    }

    pub async fn item_count(&self) -> usize {
        self.state.lock().await.items.len()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn find_by_slug(
        &self,
        clinic_id: &str,
        slug: &str,
    ) -> Result<Option<ContentItem>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .items
            .values()
            .find(|item| item.clinic_id == clinic_id && item.slug == slug)
            .cloned())
    }

    async fn find_by_title(
        &self,
        clinic_id: &str,
        title: &str,
    ) -> Result<Option<ContentItem>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .items
            .values()
            .find(|item| item.clinic_id == clinic_id && item.title == title)
            .cloned())
    }

    async fn create_item(&self, item: ContentItem) -> Result<ContentItem, AppError> {
        let mut state = self.state.lock().await;
        state.items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    async fn update_item(
        &self,
        item_id: &str,
        update: ContentItemUpdate,
    ) -> Result<ContentItem, AppError> {
        let mut state = self.state.lock().await;
        let item = state
            .items
            .get_mut(item_id)
            .ok_or_else(|| AppError::NotFound(format!("content item {item_id}")))?;
        item.apply_update(update);
        Ok(item.clone())
    }

    async fn create_version(&self, version: ContentItemVersion) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let duplicate = state.versions.iter().any(|existing| {
            existing.item_id == version.item_id
                && existing.version_number == version.version_number
        });
        if duplicate {
            return Err(AppError::InternalError(format!(
                "version {} already recorded for item {}",
                version.version_number, version.item_id
            )));
        }
        state.versions.push(version);
        Ok(())
    }

    async fn replace_chunks(&self, item_id: &str, chunks: Vec<Chunk>) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.chunks.insert(item_id.to_string(), chunks);
        Ok(())
    }

    async fn upsert_tags(&self, clinic_id: &str, names: &[String]) -> Result<Vec<Tag>, AppError> {
        let mut state = self.state.lock().await;
        let mut result = Vec::with_capacity(names.len());
        for name in names {
            let found = state
                .tags
                .iter()
                .find(|tag| tag.clinic_id == clinic_id && &tag.name == name)
                .cloned();
            let tag = match found {
                Some(tag) => tag,
                None => {
                    let tag = Tag {
                        id: Uuid::new_v4().to_string(),
                        clinic_id: clinic_id.to_string(),
                        name: name.clone(),
                    };
                    state.tags.push(tag.clone());
                    tag
                }
            };
            result.push(tag);
        }
        Ok(result)
    }

    async fn set_item_tags(&self, item_id: &str, tag_ids: &[String]) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state
            .item_tags
            .insert(item_id.to_string(), tag_ids.to_vec());
        Ok(())
    }

    async fn item_tag_names(&self, item_id: &str) -> Result<Vec<String>, AppError> {
        let state = self.state.lock().await;
        let ids = state.item_tags.get(item_id).cloned().unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| {
                state
                    .tags
                    .iter()
                    .find(|tag| &tag.id == id)
                    .map(|tag| tag.name.clone())
            })
            .collect())
    }

    async fn find_or_create_collection(
        &self,
        clinic_id: &str,
        title: &str,
        description: &str,
    ) -> Result<Collection, AppError> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state
            .collections
            .iter()
            .find(|collection| collection.clinic_id == clinic_id && collection.title == title)
        {
            return Ok(existing.clone());
        }
        let collection = Collection {
            id: Uuid::new_v4().to_string(),
            clinic_id: clinic_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        };
        state.collections.push(collection.clone());
        Ok(collection)
    }

    async fn oldest_clinic(&self) -> Result<Option<String>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .clinics
            .iter()
            .min_by_key(|(_, created_at)| *created_at)
            .map(|(id, _)| id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::metadata::Metadata;

    fn sample_item(clinic_id: &str, slug: &str, title: &str) -> ContentItem {
        ContentItem::new(
            clinic_id.to_string(),
            "collection-1".to_string(),
            slug.to_string(),
            title.to_string(),
            "Clinical Form".to_string(),
            Metadata::with_content_type("Clinical Form"),
            Vec::new(),
            None,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn lookup_by_slug_then_title() {
        let repository = InMemoryContentRepository::new();
        let item = repository
            .create_item(sample_item("clinic-a", "intake-form", "Intake Form"))
            .await
            .unwrap();

        let by_slug = repository
            .find_by_slug("clinic-a", "intake-form")
            .await
            .unwrap();
        assert_eq!(by_slug.as_ref().map(|found| found.id.as_str()), Some(item.id.as_str()));

        let by_title = repository
            .find_by_title("clinic-a", "Intake Form")
            .await
            .unwrap();
        assert!(by_title.is_some());

        // Lookups are clinic scoped
        assert!(repository
            .find_by_slug("clinic-b", "intake-form")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn version_snapshots_are_append_only() {
        let repository = InMemoryContentRepository::new();
        let item = repository
            .create_item(sample_item("clinic-a", "intake-form", "Intake Form"))
            .await
            .unwrap();

        let version = ContentItemVersion::new(
            item.id.clone(),
            1,
            item.metadata.clone(),
            Vec::new(),
            Some("Document import".to_string()),
        );
        repository.create_version(version.clone()).await.unwrap();
        assert!(repository.create_version(version).await.is_err());
    }

    #[tokio::test]
    async fn upsert_tags_reuses_existing_rows() {
        let repository = InMemoryContentRepository::new();
        let first = repository
            .upsert_tags("clinic-a", &["CBT".to_string(), "ANXIETY".to_string()])
            .await
            .unwrap();
        let second = repository
            .upsert_tags("clinic-a", &["CBT".to_string()])
            .await
            .unwrap();
        assert_eq!(first[0].id, second[0].id);
    }

    #[tokio::test]
    async fn oldest_clinic_wins() {
        let repository = InMemoryContentRepository::new();
        assert!(repository.oldest_clinic().await.unwrap().is_none());
        repository.register_clinic("clinic-first").await;
        repository.register_clinic("clinic-second").await;
        assert_eq!(
            repository.oldest_clinic().await.unwrap().as_deref(),
            Some("clinic-first")
        );
    }
}
