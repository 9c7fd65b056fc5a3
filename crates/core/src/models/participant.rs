//! Participant roster model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered participant. The phone number is the dedup key, both
/// on the per-event roster and in the global roster store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub phone_number: String,
    pub name: String,
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(phone_number: String, name: String, now: DateTime<Utc>) -> Self {
        Self {
            phone_number,
            name,
            registered_at: now,
        }
    }
}
