//! Starter-pack ingestion input: a fully-structured JSON format that skips
//! text segmentation and rejoins the pipeline at metadata normalization.

mod loader;
mod validate;

pub use loader::{load_items, LoadedPack};
pub use validate::validate_item;

use std::sync::LazyLock;

use common::{
    error::AppError,
    storage::types::{
        measure::StarterPackMeasure,
        metadata::{License, Metadata, StarterPackExtras},
        section::{Audience, Section},
    },
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{checksum::content_checksum, metadata::normalize_metadata, parse::slugify, slug::SlugAllocator};

pub const STARTER_COLLECTION_TITLE: &str = "Starter Library Pack v1";
pub const STARTER_COLLECTION_DESCRIPTION: &str = "Self-authored clinical starter pack v1.";

pub const ALLOWED_MINUTES: [u32; 5] = [5, 10, 15, 20, 30];
pub const DEFAULT_MINUTES: u32 = 10;

const ALLOWED_POPULATIONS: [&str; 4] = ["ADULT", "ADOLESCENT", "FAMILY", "COUPLES"];

/// Tags treated as modalities when partitioning clinical tags into the
/// metadata shape; everything in `DOMAIN_TAGS` lands in clinical domains.
const MODALITY_TAGS: [&str; 4] = ["CBT", "DBT", "MI", "RELAPSE_PREVENTION"];
const DOMAIN_TAGS: [&str; 9] = [
    "ANXIETY",
    "DEPRESSION",
    "TRAUMA",
    "SUD",
    "SLEEP",
    "ANGER",
    "GRIEF",
    "PARENTING",
    "STRESS",
];

static NON_TAG_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Z0-9]+").unwrap());
static EDGE_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^_+|_+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StarterPackContentType {
    Worksheet,
    Prompt,
    Handout,
    Psychoed,
    Measure,
}

impl StarterPackContentType {
    pub const ALL: [&'static str; 5] = ["WORKSHEET", "PROMPT", "HANDOUT", "PSYCHOED", "MEASURE"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Worksheet => "WORKSHEET",
            Self::Prompt => "PROMPT",
            Self::Handout => "HANDOUT",
            Self::Psychoed => "PSYCHOED",
            Self::Measure => "MEASURE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKind {
    Instructions,
    Content,
    ClinicianNotes,
}

impl SectionKind {
    pub const ALL: [&'static str; 3] = ["INSTRUCTIONS", "CONTENT", "CLINICIAN_NOTES"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instructions => "INSTRUCTIONS",
            Self::Content => "CONTENT",
            Self::ClinicianNotes => "CLINICIAN_NOTES",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterPackSectionInput {
    pub kind: SectionKind,
    pub title: String,
    pub markdown: String,
}

/// Raw per-file item shape, deserialized only after schema validation
/// accepted the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterPackItemInput {
    pub title: String,
    pub slug: String,
    pub content_type: StarterPackContentType,
    pub clinical_tags: Vec<String>,
    pub populations: Vec<String>,
    #[serde(default)]
    pub minutes: Option<u32>,
    pub client_safe: bool,
    pub language: String,
    pub license: License,
    pub sections: Vec<StarterPackSectionInput>,
    pub measure: StarterPackMeasure,
}

/// Validated, normalized starter-pack item ready to upsert. Normalizing an
/// already-normalized item changes nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct StarterPackItem {
    pub title: String,
    pub slug: String,
    pub content_type: StarterPackContentType,
    pub clinical_tags: Vec<String>,
    pub populations: Vec<String>,
    pub minutes: u32,
    pub client_safe: bool,
    pub language: String,
    pub license: License,
    pub sections: Vec<StarterPackSectionInput>,
    pub measure: StarterPackMeasure,
}

/// Uppercase, underscore-delimited tag form: `relapse prevention` and
/// `Relapse-Prevention` both normalize to `RELAPSE_PREVENTION`.
pub fn normalize_tag(value: &str) -> String {
    let upper = value.trim().to_uppercase();
    let underscored = NON_TAG_CHARS.replace_all(&upper, "_");
    EDGE_UNDERSCORES.replace_all(&underscored, "").to_string()
}

/// Population normalization keeps interior underscores but, unlike tags,
/// never trims edge underscores; unknown populations are filtered out later.
pub fn normalize_population(value: &str) -> String {
    let upper = value.trim().to_uppercase();
    NON_TAG_CHARS.replace_all(&upper, "_").to_string()
}

/// Normalizes a validated batch: slugs finalized with batch-local collision
/// numbering, minutes defaulted, tags deduplicated in first-seen order,
/// populations filtered to the supported set.
pub fn normalize_items(raw_items: Vec<StarterPackItemInput>) -> Vec<StarterPackItem> {
    let mut allocator = SlugAllocator::new();
    raw_items
        .into_iter()
        .map(|raw| {
            let slug_source = if raw.slug.is_empty() {
                raw.title.as_str()
            } else {
                raw.slug.as_str()
            };
            let slug = allocator.allocate(&slugify(slug_source));

            let minutes = match raw.minutes {
                Some(minutes) if ALLOWED_MINUTES.contains(&minutes) => minutes,
                _ => DEFAULT_MINUTES,
            };

            let mut clinical_tags: Vec<String> = Vec::new();
            for tag in &raw.clinical_tags {
                let normalized = normalize_tag(tag);
                if !normalized.is_empty() && !clinical_tags.contains(&normalized) {
                    clinical_tags.push(normalized);
                }
            }

            let mut populations: Vec<String> = Vec::new();
            for population in &raw.populations {
                let normalized = normalize_population(population);
                if ALLOWED_POPULATIONS.contains(&normalized.as_str())
                    && !populations.contains(&normalized)
                {
                    populations.push(normalized);
                }
            }

            StarterPackItem {
                title: raw.title,
                slug,
                content_type: raw.content_type,
                clinical_tags,
                populations,
                minutes,
                client_safe: raw.client_safe,
                language: raw.language,
                license: raw.license,
                sections: raw.sections,
                measure: raw.measure,
            }
        })
        .collect()
}

/// Sections for a starter-pack item: typed kinds instead of heuristic
/// titles, audience derived from the kind.
pub fn build_sections(
    item_title: &str,
    sections: &[StarterPackSectionInput],
    collection_title: &str,
) -> Vec<Section> {
    sections
        .iter()
        .map(|section| Section {
            heading_path: format!("{collection_title} > {item_title} > {}", section.title),
            title: section.title.clone(),
            text: section.markdown.clone(),
            section_type: section.kind.as_str().to_string(),
            audience: if section.kind == SectionKind::ClinicianNotes {
                Audience::Clinician
            } else {
                Audience::Client
            },
        })
        .collect()
}

/// Metadata for a starter-pack item: clinical tags partitioned into domains
/// and modalities, fixed curation defaults, and the full starter-pack
/// extension block for round-tripping on later re-ingests.
pub fn build_metadata(item: &StarterPackItem) -> Result<Metadata, AppError> {
    let domains: Vec<&String> = item
        .clinical_tags
        .iter()
        .filter(|tag| DOMAIN_TAGS.contains(&tag.as_str()))
        .collect();
    let modalities: Vec<&String> = item
        .clinical_tags
        .iter()
        .filter(|tag| MODALITY_TAGS.contains(&tag.as_str()))
        .collect();

    let mut metadata = normalize_metadata(
        &json!({
            "contentType": item.content_type.as_str(),
            "primaryClinicalDomains": domains,
            "applicableModalities": modalities,
            "targetPopulation": item.populations,
            "clinicalSetting": [],
            "clinicalComplexityLevel": "low",
            "sessionUse": "between-session",
            "evidenceBasis": "Self-authored template",
            "customizationRequired": {
                "required": true,
                "notes": "Review and tailor to client context."
            }
        }),
        item.content_type.as_str(),
    )?;

    metadata.starter_pack = Some(StarterPackExtras {
        version: "v1".to_string(),
        minutes: item.minutes,
        client_safe: item.client_safe,
        license: item.license.clone(),
        measure: item.measure.clone(),
        clinical_tags: item.clinical_tags.clone(),
        populations: item.populations.clone(),
    });

    Ok(metadata)
}

/// Fingerprint of an incoming starter-pack item.
pub fn item_checksum(item: &StarterPackItem) -> String {
    let section_texts: Vec<String> = item
        .sections
        .iter()
        .map(|section| section.markdown.clone())
        .collect();
    content_checksum(
        &item.title,
        &item.slug,
        item.content_type.as_str(),
        &section_texts,
        Some(&item.measure),
        &item.clinical_tags,
    )
}
