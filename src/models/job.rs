use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    #[default]
    Open,
    Closed,
}

/// A job posting published by an enterprise account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobPosting {
    pub id: Uuid,
    /// Account id of the enterprise that owns the posting.
    pub enterprise_id: Uuid,
    #[serde(default)]
    #[schema(example = "Senior Rust Engineer")]
    pub title: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    pub fn new(id: Uuid, enterprise_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id,
            enterprise_id,
            title: title.into(),
            status: JobStatus::default(),
            published_at: None,
        }
    }

    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.enterprise_id == account_id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    Shortlisted,
    Rejected,
    Withdrawn,
}

/// A candidate's application to a job posting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    /// Enterprise owning the job applied to; lets the enterprise side see its applicants.
    pub enterprise_id: Uuid,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl JobApplication {
    pub fn new(id: Uuid, posting: &JobPosting, candidate_id: Uuid) -> Self {
        Self {
            id,
            job_id: posting.id,
            candidate_id,
            enterprise_id: posting.enterprise_id,
            status: ApplicationStatus::default(),
            submitted_at: None,
        }
    }
}
