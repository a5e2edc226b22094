use serde::{Deserialize, Serialize};

use super::measure::StarterPackMeasure;

/// The nine keys every persisted metadata object must carry. `null` and `[]`
/// are valid values; only a missing key is an error.
pub const REQUIRED_METADATA_FIELDS: [&str; 9] = [
    "contentType",
    "primaryClinicalDomains",
    "applicableModalities",
    "targetPopulation",
    "clinicalSetting",
    "clinicalComplexityLevel",
    "sessionUse",
    "evidenceBasis",
    "customizationRequired",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationRequired {
    pub required: bool,
    pub notes: Option<String>,
}

impl Default for CustomizationRequired {
    fn default() -> Self {
        Self {
            required: false,
            notes: None,
        }
    }
}

/// Source license for starter-pack content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    #[serde(rename = "type")]
    pub license_type: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub public_domain_notice: Option<String>,
}

/// Extension block persisted alongside the fixed metadata shape for items
/// ingested from a starter pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterPackExtras {
    pub version: String,
    pub minutes: u32,
    pub client_safe: bool,
    pub license: License,
    pub measure: StarterPackMeasure,
    pub clinical_tags: Vec<String>,
    pub populations: Vec<String>,
}

/// Fixed structured-metadata shape carried by every content item. All nine
/// required keys are always present once normalized; empty arrays and nulls
/// are legal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub content_type: Option<String>,
    pub primary_clinical_domains: Vec<String>,
    pub applicable_modalities: Vec<String>,
    pub target_population: Vec<String>,
    pub clinical_setting: Vec<String>,
    pub clinical_complexity_level: Option<String>,
    pub session_use: Option<String>,
    pub evidence_basis: Option<String>,
    pub customization_required: CustomizationRequired,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_pack: Option<StarterPackExtras>,
}

impl Metadata {
    /// Empty metadata for the given content type, mirroring what a document
    /// import starts from before any curation.
    pub fn with_content_type(content_type: &str) -> Self {
        Self {
            content_type: Some(content_type.to_string()),
            primary_clinical_domains: Vec::new(),
            applicable_modalities: Vec::new(),
            target_population: Vec::new(),
            clinical_setting: Vec::new(),
            clinical_complexity_level: None,
            session_use: None,
            evidence_basis: None,
            customization_required: CustomizationRequired::default(),
            starter_pack: None,
        }
    }
}
