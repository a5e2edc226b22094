//! Heuristic segmentation of extracted document text into items and titled
//! sections. Everything in here is a total function over well-formed UTF-8:
//! no I/O, no state, no panics.

pub mod heading;
pub mod items;
pub mod normalize;
pub mod sections;

pub use heading::{is_heading_line, KNOWN_SECTION_HEADERS};
pub use items::{split_items, RawItem};
pub use normalize::{normalize_whitespace, slugify};
pub use sections::split_sections;
