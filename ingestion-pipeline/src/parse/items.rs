use super::heading::is_heading_line;

/// Top-level unit cut out of a document before section segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub body: String,
}

/// Minimum trimmed length for a heading to open a new item. Short decorative
/// caps lines ("FORM", page markers) revise the running title instead.
const ITEM_BOUNDARY_MIN_CHARS: usize = 6;

/// A heading only flushes the running buffer once a real body has
/// accumulated behind it.
const MIN_BODY_LINES: usize = 5;

/// Splits normalized document text into titled items.
///
/// Runs a single pass over the lines keeping a running title (initially
/// "Untitled Item") and a body buffer. A qualifying heading either closes
/// the current item, when enough body lines have accumulated, or revises the
/// title of the item still being collected. Items whose body trims to
/// nothing are dropped.
pub fn split_items(text: &str) -> Vec<RawItem> {
    let mut items = Vec::new();
    let mut current_title = String::from("Untitled Item");
    let mut buffer: Vec<&str> = Vec::new();
    let mut started = false;

    for line in text.split('\n') {
        let trimmed = line.trim();
        if is_heading_line(line) && trimmed.chars().count() > ITEM_BOUNDARY_MIN_CHARS {
            if started && buffer.len() > MIN_BODY_LINES {
                items.push(RawItem {
                    title: current_title.clone(),
                    body: buffer.join("\n"),
                });
                buffer.clear();
            }
            current_title = trimmed.strip_suffix(':').unwrap_or(trimmed).trim().to_string();
            started = true;
            continue;
        }
        buffer.push(line);
    }

    if !buffer.is_empty() {
        items.push(RawItem {
            title: current_title,
            body: buffer.join("\n"),
        });
    }

    items.retain(|item| !item.body.trim().is_empty());
    items
}
