use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::table::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume: Option<String>,
    pub applied_date: DateTime<Utc>,
}

impl Entity for Candidate {
    const TABLE: &'static str = "candidates";

    fn id(&self) -> &str {
        &self.id
    }
}
