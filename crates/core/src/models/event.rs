//! Event details model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default timezone for new events.
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// Human-facing details of a single planning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub title: String,
    pub description: String,
    pub timezone: String,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

impl EventDetails {
    pub fn seeded() -> Self {
        Self {
            title: "Invites+".to_string(),
            description:
                "Vote on the time and place. After it locks, confirm if you're going."
                    .to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            start_at: None,
            end_at: None,
        }
    }
}
