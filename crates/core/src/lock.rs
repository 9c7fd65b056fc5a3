//! Lock state machine
//!
//! An event moves OPEN -> LOCKED exactly once; only a full document
//! reset goes back. Locking resolves the winning time and location
//! from the current tallies and writes the lock record in one step, so
//! no partially locked document is ever observable. `doc.locked` is
//! the single source of truth the UI gates voting and suggestions on.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{EventDocument, LockRecord};
use crate::tally::resolve_winners;

/// Credential gate for organizer actions.
///
/// The shipped implementation is a plaintext comparison; the trait
/// exists so a real credential check can replace it without touching
/// the state machine.
pub trait HostAuth {
    fn authorize(&self, supplied: &str) -> bool;
}

/// Plain equality against the per-document organizer password.
pub struct PlainPassword {
    password: String,
}

impl PlainPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Gate for a document's own configured password.
    pub fn for_document(doc: &EventDocument) -> Self {
        Self::new(doc.host.password.clone())
    }
}

impl HostAuth for PlainPassword {
    fn authorize(&self, supplied: &str) -> bool {
        supplied == self.password
    }
}

/// Lock the plan: resolve winners and write the lock record.
///
/// Fails with `Unauthorized` on a bad password and `AlreadyLocked` on
/// a locked document, leaving the document untouched in both cases.
pub fn lock_plan(
    doc: &mut EventDocument,
    auth: &impl HostAuth,
    supplied: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    if !auth.authorize(supplied) {
        return Err(Error::Unauthorized);
    }
    if doc.locked {
        return Err(Error::AlreadyLocked);
    }

    let winners = resolve_winners(doc)?;

    doc.locked = true;
    doc.lock_record = LockRecord {
        locked_at: Some(now),
        locked_time_id: Some(winners.time_id),
        locked_location_id: Some(winners.location_id),
    };

    info!(
        event_id = %doc.event_id,
        time_id = doc.lock_record.locked_time_id.as_deref(),
        location_id = doc.lock_record.locked_location_id.as_deref(),
        "Plan locked"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanOption;

    fn doc() -> EventDocument {
        let mut doc = EventDocument::seed("LOCK01".to_string());
        doc.options.times = vec![
            PlanOption::new("t1".into(), "Fri 7:00 PM".into()),
            PlanOption::new("t2".into(), "Sat 1:00 PM".into()),
        ];
        doc.options.locations = vec![
            PlanOption::new("l1".into(), "Ramen Tatsu-Ya".into()),
            PlanOption::new("l2".into(), "Home Poker Night".into()),
        ];
        doc
    }

    #[test]
    fn test_wrong_password_unauthorized() {
        let mut doc = doc();
        let err = lock_plan(
            &mut doc,
            &PlainPassword::new("admin"),
            "wrong",
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
        assert!(!doc.locked);
        assert_eq!(doc.lock_record, LockRecord::default());
    }

    #[test]
    fn test_lock_writes_winners_and_timestamp() {
        let mut doc = doc();
        doc.record_vote("alice", "t2".into(), "l1".into(), Utc::now())
            .unwrap();
        let now = Utc::now();

        let auth = PlainPassword::for_document(&doc);
        lock_plan(&mut doc, &auth, "admin", now).unwrap();

        assert!(doc.locked);
        assert_eq!(doc.lock_record.locked_at, Some(now));
        assert_eq!(doc.lock_record.locked_time_id.as_deref(), Some("t2"));
        assert_eq!(doc.lock_record.locked_location_id.as_deref(), Some("l1"));
        assert!(doc.lock_record.is_complete());
    }

    #[test]
    fn test_lock_is_one_way() {
        let mut doc = doc();
        let now = Utc::now();
        lock_plan(&mut doc, &PlainPassword::new("admin"), "admin", now).unwrap();
        let before = doc.clone();

        // Second lock fails regardless of password and changes nothing.
        let err = lock_plan(&mut doc, &PlainPassword::new("admin"), "admin", Utc::now())
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyLocked));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_lock_without_options_invalid_state() {
        let mut doc = EventDocument::seed("EMPTY1".to_string());
        let err = lock_plan(&mut doc, &PlainPassword::new("admin"), "admin", Utc::now())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert!(!doc.locked);
    }

    #[test]
    fn test_reset_reopens() {
        let mut doc = doc();
        lock_plan(&mut doc, &PlainPassword::new("admin"), "admin", Utc::now()).unwrap();
        doc.reset();
        assert!(!doc.locked);
        assert_eq!(doc.lock_record, LockRecord::default());
    }
}
