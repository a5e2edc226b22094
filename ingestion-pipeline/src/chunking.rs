//! Sliding-window retrieval chunking over section text.

use common::storage::types::{chunk::Chunk, section::Section};

pub const DEFAULT_MAX_TOKENS: usize = 1000;
pub const DEFAULT_OVERLAP: usize = 120;

/// Converts an item's sections into overlapping word-window chunks.
///
/// Tokens are whitespace-delimited words. Each window holds at most
/// `max_tokens` words; consecutive windows within one section share
/// `overlap` words, so no word is permanently excluded. The chunk index
/// increments across the whole item, not per section. Sections with no
/// words produce no chunks.
///
/// Both knobs come from operator configuration, so they are clamped into a
/// terminating combination: the window is at least one word and the
/// effective overlap stays below the window size.
pub fn build_chunks(
    item_title: &str,
    sections: &[Section],
    version_number: u32,
    max_tokens: usize,
    overlap: usize,
) -> Vec<Chunk> {
    let max_tokens = max_tokens.max(1);
    let overlap = overlap.min(max_tokens.saturating_sub(1));

    let mut chunks = Vec::new();
    let mut index = 0usize;

    for section in sections {
        let heading_path = if section.heading_path.is_empty() {
            let section_title = if section.title.is_empty() {
                "Section"
            } else {
                section.title.as_str()
            };
            format!("{item_title} > {section_title}")
        } else {
            section.heading_path.clone()
        };

        let words: Vec<&str> = section.text.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let mut start = 0usize;
        while start < words.len() {
            let end = (start + max_tokens).min(words.len());
            let slice = &words[start..end];
            chunks.push(Chunk {
                version_number,
                chunk_index: index,
                heading_path: heading_path.clone(),
                text: slice.join(" "),
                token_count: slice.len(),
            });
            index += 1;
            if end >= words.len() {
                break;
            }
            start = end.saturating_sub(overlap);
        }
    }

    chunks
}
