use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Candidate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub resume: Option<String>,
    pub applied_date: Option<DateTime<Utc>>,
}

impl CreateCandidatePayload {
    pub fn into_candidate(self) -> Candidate {
        Candidate {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name,
            email: self.email,
            phone: self.phone,
            resume: self.resume,
            applied_date: self.applied_date.unwrap_or_else(Utc::now),
        }
    }
}
