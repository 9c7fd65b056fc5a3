//! The persisted event document
//!
//! One `EventDocument` per planning session. Every handler mutates the
//! document in place; the storage layer persists it as a single atomic
//! whole-document replace keyed by `event_id`.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{
    voter_key, EventDetails, OptionKind, OptionSet, Participant, PlanOption, Reminder, Rsvp,
    RsvpStatus, SuggestionSet, Vote,
};
use crate::error::{Error, Result};
use crate::ids;

/// Organizer password unless overridden per-document. A demo-grade
/// gate, not a security boundary.
pub const DEFAULT_HOST_PASSWORD: &str = "admin";

/// Current document schema version, stamped by the migrator.
pub const SCHEMA_VERSION: u32 = 5;

/// Written exactly once, when the plan locks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockRecord {
    pub locked_at: Option<DateTime<Utc>>,
    pub locked_time_id: Option<String>,
    pub locked_location_id: Option<String>,
}

impl LockRecord {
    /// All three fields written; holds iff the document is locked.
    pub fn is_complete(&self) -> bool {
        self.locked_at.is_some() && self.locked_time_id.is_some() && self.locked_location_id.is_some()
    }
}

/// Host-side state: the organizer password, the per-event roster, and
/// the reminder history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostState {
    #[serde(rename = "pass")]
    pub password: String,
    #[serde(rename = "users", default)]
    pub roster: Vec<Participant>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            password: DEFAULT_HOST_PASSWORD.to_string(),
            roster: Vec::new(),
            reminders: Vec::new(),
        }
    }
}

/// Root persisted entity for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
    pub event_id: String,
    #[serde(default)]
    pub schema_version: u32,
    pub event: EventDetails,
    pub locked: bool,
    #[serde(default)]
    pub lock_record: LockRecord,
    #[serde(default)]
    pub options: OptionSet,
    #[serde(default)]
    pub suggestions: SuggestionSet,
    #[serde(default)]
    pub votes: BTreeMap<String, Vote>,
    #[serde(default)]
    pub rsvps: BTreeMap<String, Rsvp>,
    #[serde(default)]
    pub host: HostState,
}

impl EventDocument {
    /// Fresh document with seeded defaults.
    pub fn seed(event_id: String) -> Self {
        Self {
            event_id,
            schema_version: SCHEMA_VERSION,
            event: EventDetails::seeded(),
            locked: false,
            lock_record: LockRecord::default(),
            options: OptionSet::default(),
            suggestions: SuggestionSet::default(),
            votes: BTreeMap::new(),
            rsvps: BTreeMap::new(),
            host: HostState::default(),
        }
    }

    /// Record or overwrite a vote. The normalized name is the key, so
    /// the same person re-voting replaces their previous selection.
    pub fn record_vote(
        &mut self,
        name: &str,
        time_id: String,
        location_id: String,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.locked {
            return Err(Error::AlreadyLocked);
        }
        let key = voter_key(name);
        if key.is_empty() {
            return Err(Error::InvalidState("voter name is empty".into()));
        }
        self.votes.insert(
            key,
            Vote {
                display_name: name.trim().to_string(),
                time_id: Some(time_id),
                location_id: Some(location_id),
                updated_at: now,
            },
        );
        Ok(())
    }

    /// Record or overwrite an RSVP, keyed like votes.
    pub fn record_rsvp(&mut self, name: &str, status: RsvpStatus, now: DateTime<Utc>) -> Result<()> {
        let key = voter_key(name);
        if key.is_empty() {
            return Err(Error::InvalidState("rsvp name is empty".into()));
        }
        self.rsvps.insert(
            key,
            Rsvp {
                display_name: name.trim().to_string(),
                status,
                updated_at: now,
            },
        );
        Ok(())
    }

    /// Append a host-added option with a generated id.
    pub fn add_option(&mut self, kind: OptionKind, label: String) -> PlanOption {
        let id = match kind {
            OptionKind::Time => ids::new_time_id(),
            OptionKind::Location => ids::new_location_id(),
        };
        let option = PlanOption::new(id, label);
        self.options.list_mut(kind).push(option.clone());
        option
    }

    /// Remove an option. Removing the locked-in time or location is
    /// refused so a locked document always resolves its labels; an
    /// absent id is a no-op.
    pub fn remove_option(&mut self, kind: OptionKind, id: &str) -> Result<bool> {
        let locked_in = match kind {
            OptionKind::Time => self.lock_record.locked_time_id.as_deref(),
            OptionKind::Location => self.lock_record.locked_location_id.as_deref(),
        };
        if locked_in == Some(id) {
            return Err(Error::InvalidState(format!(
                "option {id} is locked in and cannot be removed"
            )));
        }
        let list = self.options.list_mut(kind);
        let before = list.len();
        list.retain(|o| o.id != id);
        Ok(list.len() != before)
    }

    /// Edit the scheduled date range. A missing end defaults to one
    /// hour after the start.
    pub fn set_schedule(&mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) {
        if let Some(start) = start {
            self.event.start_at = Some(start);
            self.event.end_at = Some(end.unwrap_or(start + Duration::hours(1)));
        } else if end.is_some() {
            self.event.end_at = end;
        }
    }

    /// Add a participant to the roster, deduped by phone number.
    pub fn register_participant(&mut self, participant: Participant) {
        if !self
            .host
            .roster
            .iter()
            .any(|p| p.phone_number == participant.phone_number)
        {
            self.host.roster.push(participant);
        }
    }

    /// Replace everything with the seed, preserving identity. The only
    /// path back from `locked` to open voting.
    pub fn reset(&mut self) {
        *self = Self::seed(std::mem::take(&mut self.event_id));
    }

    /// Label of the locked-in time, once locked.
    pub fn locked_time_label(&self) -> Option<&str> {
        let id = self.lock_record.locked_time_id.as_deref()?;
        self.options.label(OptionKind::Time, id)
    }

    /// Label of the locked-in location, once locked.
    pub fn locked_location_label(&self) -> Option<&str> {
        let id = self.lock_record.locked_location_id.as_deref()?;
        self.options.label(OptionKind::Location, id)
    }
}
