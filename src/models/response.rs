use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::table::Entity;

/// A candidate's submission for one assessment. Exists only when that
/// candidate's timeline for the assessment's job reached stage Assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: String,
    pub candidate_id: String,
    pub assessment_id: String,
    pub answers: Vec<Answer>,
    pub submitted_at: DateTime<Utc>,
    /// 0-100.
    pub score: u8,
}

/// Answer payloads mirror the question kinds they respond to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Answer {
    MultipleChoice { selected: String },
    CodingChallenge { source: String },
}

impl Entity for CandidateResponse {
    const TABLE: &'static str = "responses";

    fn id(&self) -> &str {
        &self.id
    }
}
