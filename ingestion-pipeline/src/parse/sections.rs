use common::storage::types::section::{Audience, Section};

use super::{heading::is_heading_line, normalize::normalize_whitespace};

/// Splits one item's body into titled sections.
///
/// Text before the first recognized heading lands in a default "Overview"
/// section. Each heading flushes the accumulated section when its normalized
/// text is non-empty; the final buffer always flushes at end of input. The
/// heading path is built as `Collection > Item > Section`.
pub fn split_sections(item_title: &str, body: &str, collection_title: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current_title = String::from("Overview");
    let mut buffer: Vec<&str> = Vec::new();

    let flush = |sections: &mut Vec<Section>, title: &str, buffer: &[&str]| {
        let text = normalize_whitespace(&buffer.join("\n"));
        if text.is_empty() {
            return;
        }
        sections.push(Section {
            heading_path: format!("{collection_title} > {item_title} > {title}"),
            title: title.to_string(),
            text,
            section_type: title.to_string(),
            audience: Audience::from_section_title(title),
        });
    };

    for line in body.split('\n') {
        if is_heading_line(line) {
            flush(&mut sections, &current_title, &buffer);
            let trimmed = line.trim();
            current_title = trimmed.strip_suffix(':').unwrap_or(trimmed).trim().to_string();
            buffer.clear();
            continue;
        }
        buffer.push(line);
    }

    flush(&mut sections, &current_title, &buffer);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_headings_and_strips_colons() {
        let sections = split_sections(
            "Sample Form",
            "Overview:\nIntro text.\n\nInstructions:\nDo the thing.",
            "Collection",
        );
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Overview");
        assert_eq!(sections[0].audience, Audience::Clinician);
        assert_eq!(sections[0].text, "Intro text.");
        assert_eq!(
            sections[0].heading_path,
            "Collection > Sample Form > Overview"
        );
        assert_eq!(sections[1].title, "Instructions");
        assert_eq!(sections[1].text, "Do the thing.");
    }

    #[test]
    fn leading_prose_becomes_overview() {
        let sections = split_sections("Item", "plain intro line\nmore prose", "Collection");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Overview");
        assert_eq!(sections[0].section_type, "Overview");
    }

    #[test]
    fn client_titles_flip_audience() {
        let sections = split_sections(
            "Item",
            "Instructions for Clients:\nTake this home.",
            "Collection",
        );
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].audience, Audience::Client);
    }

    #[test]
    fn empty_buffers_are_not_flushed() {
        // Two back-to-back headings: nothing accumulates under the first
        let sections = split_sections("Item", "Purpose:\nScoring:\nSum items.", "Collection");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Scoring");
    }

    #[test]
    fn section_type_mirrors_the_raw_title() {
        let sections = split_sections("Item", "Cautions:\nGo slowly.", "Collection");
        assert_eq!(sections[0].section_type, "Cautions");
    }
}
