use serde::{Deserialize, Serialize};

/// Named grouping of content items within one clinic. The collection title
/// is the first segment of every section's heading path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub clinic_id: String,
    pub title: String,
    pub description: String,
}
