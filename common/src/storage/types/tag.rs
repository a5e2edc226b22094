use serde::{Deserialize, Serialize};

/// Clinic-scoped tag, unique per `(clinic_id, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub clinic_id: String,
    pub name: String,
}
