//! Voteable option model

use serde::{Deserialize, Serialize};

/// Which option list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Time,
    Location,
}

/// A candidate time or location eligible for voting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOption {
    pub id: String,
    pub label: String,
}

impl PlanOption {
    pub fn new(id: String, label: String) -> Self {
        Self { id, label }
    }
}

/// The ordered option lists participants vote on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSet {
    pub times: Vec<PlanOption>,
    pub locations: Vec<PlanOption>,
}

impl OptionSet {
    pub fn list(&self, kind: OptionKind) -> &[PlanOption] {
        match kind {
            OptionKind::Time => &self.times,
            OptionKind::Location => &self.locations,
        }
    }

    pub fn list_mut(&mut self, kind: OptionKind) -> &mut Vec<PlanOption> {
        match kind {
            OptionKind::Time => &mut self.times,
            OptionKind::Location => &mut self.locations,
        }
    }

    /// Label of an option by id, if it still exists.
    pub fn label(&self, kind: OptionKind, id: &str) -> Option<&str> {
        self.list(kind)
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.label.as_str())
    }

    pub fn contains(&self, kind: OptionKind, id: &str) -> bool {
        self.list(kind).iter().any(|o| o.id == id)
    }
}
