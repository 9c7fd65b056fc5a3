//! Suggestion approval workflow
//!
//! Participants submit candidate times and locations; the host either
//! promotes them into the voteable option lists or rejects them.
//! Promotion reuses the suggestion's id and label and removes the
//! pending record, so nothing lingers as "approved".

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::{EventDocument, OptionKind, PlanOption, Suggestion};

/// Submit a pending suggestion. Rejected once the plan is locked.
pub fn submit(
    doc: &mut EventDocument,
    kind: OptionKind,
    label: String,
    suggested_by: String,
    now: DateTime<Utc>,
) -> Result<&Suggestion> {
    if doc.locked {
        return Err(Error::AlreadyLocked);
    }
    let list = doc.suggestions.list_mut(kind);
    list.push(Suggestion::new(label, suggested_by, now));
    // Just pushed, so the list is non-empty.
    Ok(&list[list.len() - 1])
}

/// Promote a pending suggestion into the option list. An absent id
/// (already approved or removed) is a no-op, not an error.
pub fn approve(doc: &mut EventDocument, kind: OptionKind, suggestion_id: &str) -> bool {
    let list = doc.suggestions.list_mut(kind);
    let Some(index) = list.iter().position(|s| s.id == suggestion_id) else {
        return false;
    };
    let suggestion = list.remove(index);
    doc.options
        .list_mut(kind)
        .push(PlanOption::new(suggestion.id, suggestion.label));
    true
}

/// Remove a pending suggestion; absent id is a no-op.
pub fn reject(doc: &mut EventDocument, kind: OptionKind, suggestion_id: &str) -> bool {
    let list = doc.suggestions.list_mut(kind);
    let before = list.len();
    list.retain(|s| s.id != suggestion_id);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> EventDocument {
        EventDocument::seed("SUGGST".to_string())
    }

    #[test]
    fn test_approve_promotes_and_removes() {
        let mut doc = doc();
        let id = submit(
            &mut doc,
            OptionKind::Location,
            "Tacos".into(),
            "alice".into(),
            Utc::now(),
        )
        .unwrap()
        .id
        .clone();

        assert!(approve(&mut doc, OptionKind::Location, &id));

        assert_eq!(doc.options.label(OptionKind::Location, &id), Some("Tacos"));
        assert!(doc.suggestions.locations.is_empty());
    }

    #[test]
    fn test_approve_absent_is_noop() {
        let mut doc = doc();
        assert!(!approve(&mut doc, OptionKind::Time, "missing"));
        assert!(doc.options.times.is_empty());
    }

    #[test]
    fn test_double_approve_second_is_noop() {
        let mut doc = doc();
        let id = submit(&mut doc, OptionKind::Time, "Sat 7:00 PM".into(), "bob".into(), Utc::now())
            .unwrap()
            .id
            .clone();

        assert!(approve(&mut doc, OptionKind::Time, &id));
        assert!(!approve(&mut doc, OptionKind::Time, &id));
        assert_eq!(doc.options.times.len(), 1);
    }

    #[test]
    fn test_reject_removes_without_promoting() {
        let mut doc = doc();
        let id = submit(&mut doc, OptionKind::Time, "Sun".into(), "cara".into(), Utc::now())
            .unwrap()
            .id
            .clone();

        assert!(reject(&mut doc, OptionKind::Time, &id));
        assert!(doc.suggestions.times.is_empty());
        assert!(doc.options.times.is_empty());

        assert!(!reject(&mut doc, OptionKind::Time, &id));
    }

    #[test]
    fn test_submit_rejected_when_locked() {
        let mut doc = doc();
        doc.locked = true;
        let err = submit(&mut doc, OptionKind::Time, "Late".into(), "dan".into(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyLocked));
        assert!(doc.suggestions.times.is_empty());
    }
}
