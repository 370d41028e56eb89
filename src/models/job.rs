use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::table::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
    Paused,
}

impl Entity for Job {
    const TABLE: &'static str = "jobs";

    fn id(&self) -> &str {
        &self.id
    }
}
