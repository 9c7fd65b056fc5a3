//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible document states during
//! development. These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{voter_key, EventDocument, LockRecord, OptionKind};

/// Validate that a document's lock state is internally consistent
pub fn assert_lock_invariants(doc: &EventDocument) {
    debug_assert!(
        !doc.locked || doc.lock_record.is_complete(),
        "Event {} is locked but its lock record is incomplete: {:?}",
        doc.event_id,
        doc.lock_record
    );

    debug_assert!(
        doc.locked || doc.lock_record == LockRecord::default(),
        "Event {} is open but carries a lock record",
        doc.event_id
    );

    if doc.locked {
        if let Some(id) = doc.lock_record.locked_time_id.as_deref() {
            debug_assert!(
                doc.options.contains(OptionKind::Time, id),
                "Event {} locked-in time {} is missing from options",
                doc.event_id,
                id
            );
        }
        if let Some(id) = doc.lock_record.locked_location_id.as_deref() {
            debug_assert!(
                doc.options.contains(OptionKind::Location, id),
                "Event {} locked-in location {} is missing from options",
                doc.event_id,
                id
            );
        }
    }
}

/// Validate that vote and RSVP keys are normalized
pub fn assert_voter_key_invariants(doc: &EventDocument) {
    for key in doc.votes.keys().chain(doc.rsvps.keys()) {
        debug_assert!(
            *key == voter_key(key),
            "Event {} has non-normalized voter key {:?}",
            doc.event_id,
            key
        );
    }
}

/// Validate that option ids are unique within each list
pub fn assert_option_invariants(doc: &EventDocument) {
    for kind in [OptionKind::Time, OptionKind::Location] {
        let mut seen = HashSet::new();
        for option in doc.options.list(kind) {
            debug_assert!(
                seen.insert(option.id.as_str()),
                "Event {} has duplicate {:?} option id {}",
                doc.event_id,
                kind,
                option.id
            );
        }
    }
}

/// Run every document invariant check
pub fn assert_document_invariants(doc: &EventDocument) {
    assert_lock_invariants(doc);
    assert_voter_key_invariants(doc);
    assert_option_invariants(doc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::{lock_plan, PlainPassword};
    use crate::models::PlanOption;
    use chrono::Utc;

    fn make_doc() -> EventDocument {
        let mut doc = EventDocument::seed("INVAR1".to_string());
        doc.options.times = vec![PlanOption::new("t1".into(), "Fri".into())];
        doc.options.locations = vec![PlanOption::new("l1".into(), "Home".into())];
        doc
    }

    #[test]
    fn test_seeded_document_valid() {
        assert_document_invariants(&make_doc());
    }

    #[test]
    fn test_locked_document_valid() {
        let mut doc = make_doc();
        lock_plan(&mut doc, &PlainPassword::new("admin"), "admin", Utc::now()).unwrap();
        assert_document_invariants(&doc);
    }

    #[test]
    #[should_panic(expected = "lock record is incomplete")]
    fn test_incomplete_lock_record_caught() {
        let mut doc = make_doc();
        doc.locked = true;
        assert_lock_invariants(&doc);
    }

    #[test]
    #[should_panic(expected = "non-normalized voter key")]
    fn test_denormalized_key_caught() {
        let mut doc = make_doc();
        doc.record_vote("alice", "t1".into(), "l1".into(), Utc::now())
            .unwrap();
        let vote = doc.votes.remove("alice").unwrap();
        doc.votes.insert("Alice".into(), vote);
        assert_voter_key_invariants(&doc);
    }
}
