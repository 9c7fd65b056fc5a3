//! Vote and RSVP models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalize a display name into the key votes and RSVPs are stored
/// under. Two differently-cased inputs from the same person collide
/// into one record by design.
pub fn voter_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One participant's current selection. Re-voting overwrites in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub display_name: String,
    #[serde(default)]
    pub time_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// RSVP status after the plan locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsvpStatus {
    #[serde(rename = "going")]
    Going,
    #[serde(rename = "notGoing")]
    NotGoing,
}

/// One participant's attendance answer. Overwrites by key like votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub display_name: String,
    pub status: RsvpStatus,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voter_key_normalizes() {
        assert_eq!(voter_key("  Alice "), "alice");
        assert_eq!(voter_key("ALICE"), voter_key("alice"));
    }

    #[test]
    fn test_rsvp_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&RsvpStatus::NotGoing).unwrap(),
            "\"notGoing\""
        );
        assert_eq!(
            serde_json::from_str::<RsvpStatus>("\"going\"").unwrap(),
            RsvpStatus::Going
        );
    }
}
