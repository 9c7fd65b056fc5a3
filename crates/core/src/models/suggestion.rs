//! Participant suggestion model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

/// A participant-proposed option awaiting host approval.
///
/// Promotion removes the record from the pending list, so everything
/// persisted here is pending by construction. The `approved` flag stays
/// on the wire for compatibility with old documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub label: String,
    pub suggested_by: String,
    pub suggested_at: DateTime<Utc>,
    #[serde(default)]
    pub approved: bool,
}

impl Suggestion {
    pub fn new(label: String, suggested_by: String, now: DateTime<Utc>) -> Self {
        Self {
            id: ids::new_suggestion_id(),
            label,
            suggested_by,
            suggested_at: now,
            approved: false,
        }
    }
}

/// Pending suggestions per option kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSet {
    pub times: Vec<Suggestion>,
    pub locations: Vec<Suggestion>,
}

impl SuggestionSet {
    pub fn list(&self, kind: super::OptionKind) -> &[Suggestion] {
        match kind {
            super::OptionKind::Time => &self.times,
            super::OptionKind::Location => &self.locations,
        }
    }

    pub fn list_mut(&mut self, kind: super::OptionKind) -> &mut Vec<Suggestion> {
        match kind {
            super::OptionKind::Time => &mut self.times,
            super::OptionKind::Location => &mut self.locations,
        }
    }
}
