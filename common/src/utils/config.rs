use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    /// Clinic all ingested content is scoped to. When unset the trigger
    /// binary falls back to the oldest clinic the repository knows about.
    #[serde(default)]
    pub clinic_id: Option<String>,
    /// Directory of starter-pack item JSON files, one object per file.
    #[serde(default)]
    pub starter_pack_dir: Option<String>,
    /// Plain-text document sources to segment and ingest.
    #[serde(default)]
    pub document_paths: Vec<String>,
    #[serde(default = "default_collection_title")]
    pub collection_title: String,
    #[serde(default = "default_content_type")]
    pub default_content_type: String,
    #[serde(default = "default_max_chunk_tokens")]
    pub max_chunk_tokens: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

fn default_collection_title() -> String {
    "Clinical Library".to_string()
}

fn default_content_type() -> String {
    "Therapeutic Content".to_string()
}

fn default_max_chunk_tokens() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    120
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}
