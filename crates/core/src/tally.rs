//! Vote tallying and winner resolution
//!
//! Both are pure functions over the document. Votes referencing
//! options that were removed after the vote was cast are silently
//! excluded from counts but still count toward the voter total.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::EventDocument;

/// Per-option vote counts derived from current vote records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub time_counts: BTreeMap<String, u32>,
    pub location_counts: BTreeMap<String, u32>,
    pub total_voters: usize,
}

/// The resolved winning time and location ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winners {
    pub time_id: String,
    pub location_id: String,
}

/// Compute per-option counts and the distinct voter total.
pub fn tally(doc: &EventDocument) -> Tally {
    let mut time_counts: BTreeMap<String, u32> = doc
        .options
        .times
        .iter()
        .map(|o| (o.id.clone(), 0))
        .collect();
    let mut location_counts: BTreeMap<String, u32> = doc
        .options
        .locations
        .iter()
        .map(|o| (o.id.clone(), 0))
        .collect();

    for vote in doc.votes.values() {
        if let Some(count) = vote.time_id.as_ref().and_then(|id| time_counts.get_mut(id)) {
            *count += 1;
        }
        if let Some(count) = vote
            .location_id
            .as_ref()
            .and_then(|id| location_counts.get_mut(id))
        {
            *count += 1;
        }
    }

    Tally {
        time_counts,
        location_counts,
        total_voters: doc.votes.len(),
    }
}

/// Select the winning time and location independently.
///
/// Options are scanned in stored order and the tracked winner is
/// replaced only on a strictly greater count, so ties resolve to the
/// earliest-listed option.
pub fn resolve_winners(doc: &EventDocument) -> Result<Winners> {
    let counts = tally(doc);
    let time_id = best(&doc.options.times, &counts.time_counts)
        .ok_or_else(|| Error::InvalidState("no time options to resolve".into()))?;
    let location_id = best(&doc.options.locations, &counts.location_counts)
        .ok_or_else(|| Error::InvalidState("no location options to resolve".into()))?;
    Ok(Winners { time_id, location_id })
}

fn best(options: &[crate::models::PlanOption], counts: &BTreeMap<String, u32>) -> Option<String> {
    let mut winner = options.first()?;
    let mut max = counts.get(&winner.id).copied().unwrap_or(0);
    for option in options {
        let count = counts.get(&option.id).copied().unwrap_or(0);
        if count > max {
            max = count;
            winner = option;
        }
    }
    Some(winner.id.clone())
}
