use thiserror::Error;

// Core internal errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing metadata field: {0}")]
    MissingMetadataField(String),
    #[error("Sections must be an array")]
    InvalidSections,
    #[error("Cannot publish. Missing required sections: {}", .0.join(", "))]
    PublishValidation(Vec<String>),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Ingestion aborted: {0}")]
    Ingestion(String),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Internal service error: {0}")]
    InternalError(String),
}
