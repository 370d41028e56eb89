use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::table::Entity;

/// One step of a candidate's progress against a single job. For a given
/// candidate-job pair the entries form a gapless prefix of
/// [`Stage::SEQUENCE`] with strictly increasing timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub id: String,
    pub job_id: String,
    pub candidate_id: String,
    pub stage: Stage,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Applied,
    Screening,
    Assessment,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl Stage {
    pub const SEQUENCE: [Stage; 7] = [
        Stage::Applied,
        Stage::Screening,
        Stage::Assessment,
        Stage::Interview,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Applied => "Applied",
            Stage::Screening => "Screening",
            Stage::Assessment => "Assessment",
            Stage::Interview => "Interview",
            Stage::Offer => "Offer",
            Stage::Hired => "Hired",
            Stage::Rejected => "Rejected",
        };
        f.write_str(name)
    }
}

impl Entity for Timeline {
    const TABLE: &'static str = "timelines";

    fn id(&self) -> &str {
        &self.id
    }
}
