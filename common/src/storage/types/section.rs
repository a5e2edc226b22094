use serde::{Deserialize, Serialize};

/// Who a section is written for. Inferred from the section title on the
/// document path and from the section kind on the starter-pack path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    Clinician,
    Client,
}

impl Audience {
    /// A section addressed at clients is recognizable by its title alone.
    pub fn from_section_title(title: &str) -> Self {
        if title.to_lowercase().contains("client") {
            Audience::Client
        } else {
            Audience::Clinician
        }
    }
}

/// One titled slice of an item's body. Owned by its parent item/version,
/// never shared between items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Breadcrumb of the form `Collection > Item > Section`.
    pub heading_path: String,
    pub title: String,
    pub text: String,
    pub section_type: String,
    pub audience: Audience,
}
