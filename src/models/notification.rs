use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(id: Uuid, recipient_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            id,
            recipient_id,
            message: message.into(),
            read: false,
            created_at: None,
        }
    }
}
