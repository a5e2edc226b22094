use std::{path::Path, sync::Arc};

use common::{
    storage::{memory::InMemoryContentRepository, repository::ContentRepository},
    utils::config::get_config,
};
use ingestion_pipeline::{IngestSummary, IngestionPipeline, PipelineConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up tracing; the summary JSON goes to stdout, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let config = get_config()?;

    let repository = Arc::new(InMemoryContentRepository::new());
    if let Some(clinic_id) = &config.clinic_id {
        repository.register_clinic(clinic_id).await;
    }

    // An explicitly configured clinic wins; otherwise fall back to the
    // oldest known clinic. No clinic at all aborts the run.
    let clinic_id = match &config.clinic_id {
        Some(clinic_id) => clinic_id.clone(),
        None => repository
            .oldest_clinic()
            .await?
            .ok_or("no clinic available; set CLINIC_ID or create a clinic first")?,
    };
    info!(clinic_id = %clinic_id, "resolved target clinic");

    let pipeline = IngestionPipeline::with_config(
        Arc::clone(&repository) as Arc<dyn ContentRepository>,
        PipelineConfig {
            max_chunk_tokens: config.max_chunk_tokens,
            chunk_overlap: config.chunk_overlap,
            default_content_type: config.default_content_type.clone(),
        },
    );

    let mut summary = IngestSummary::default();

    if let Some(dir) = &config.starter_pack_dir {
        info!(dir = %dir, "ingesting starter pack");
        let pack_summary = pipeline
            .ingest_starter_pack(&clinic_id, Path::new(dir))
            .await?;
        summary.merge(&pack_summary);
    }

    if !config.document_paths.is_empty() {
        let collection = repository
            .find_or_create_collection(&clinic_id, &config.collection_title, "Imported documents")
            .await?;
        for path in &config.document_paths {
            info!(path = %path, "ingesting document");
            // A missing or unreadable source file aborts the whole run
            let text = std::fs::read_to_string(path)?;
            let file_name = Path::new(path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.clone());
            let document_summary = pipeline
                .ingest_document(&clinic_id, &collection, &text, &file_name)
                .await?;
            summary.merge(&document_summary);
        }
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !summary.ok {
        std::process::exit(1);
    }
    Ok(())
}
