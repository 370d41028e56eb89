use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::table::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub job_id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

/// Question payloads are tagged by kind so the store never holds
/// free-form untyped question data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Question {
    MultipleChoice { text: String, options: Vec<String> },
    CodingChallenge { text: String },
}

impl Entity for Assessment {
    const TABLE: &'static str = "assessments";

    fn id(&self) -> &str {
        &self.id
    }
}
