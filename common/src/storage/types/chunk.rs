use serde::{Deserialize, Serialize};

/// Bounded, overlapping word-window over one section's text, used for
/// retrieval indexing. Disposable: the full chunk set of a version is
/// regenerated whenever the version changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub version_number: u32,
    /// Increments across the whole item, not per section.
    pub chunk_index: usize,
    pub heading_path: String,
    pub text: String,
    pub token_count: usize,
}
