#![allow(clippy::missing_docs_in_private_items)]

pub mod checksum;
pub mod chunking;
pub mod metadata;
pub mod parse;
pub mod pipeline;
pub mod publish;
pub mod slug;
pub mod starter_pack;

pub use pipeline::{IngestSummary, IngestionPipeline, PipelineConfig};
