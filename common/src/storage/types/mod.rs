pub mod chunk;
pub mod collection;
pub mod content_item;
pub mod content_item_version;
pub mod measure;
pub mod metadata;
pub mod section;
pub mod tag;
