use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// An uploaded CV file belonging to a candidate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CvDocument {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(default)]
    #[schema(example = "ada-lovelace-cv.pdf")]
    pub file_name: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl CvDocument {
    pub fn new(id: Uuid, owner_id: Uuid, file_name: impl Into<String>) -> Self {
        Self {
            id,
            owner_id,
            file_name: file_name.into(),
            uploaded_at: None,
        }
    }
}
