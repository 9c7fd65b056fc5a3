//! Reminder scheduling
//!
//! Reminders are simulated text messages recorded on the document. The
//! UI calls `process_due` on a recurring tick; the check is idempotent
//! and safe at arbitrary intervals, and `sent` never flips back.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{EventDocument, Reminder};

/// Create a reminder. Without a send time it is created already-sent
/// (send-now semantics) and the scheduler never touches it.
pub fn create(
    doc: &mut EventDocument,
    message: String,
    send_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> &Reminder {
    let reminder = Reminder::new(message, send_at, now);
    doc.host.reminders.push(reminder);
    // Just pushed, so the list is non-empty.
    &doc.host.reminders[doc.host.reminders.len() - 1]
}

/// Mark every due reminder sent. Returns whether anything changed so
/// the caller knows whether to persist and re-render.
pub fn process_due(doc: &mut EventDocument, now: DateTime<Utc>) -> bool {
    let mut mutated = false;
    for reminder in &mut doc.host.reminders {
        if reminder.is_due(now) {
            reminder.sent = true;
            mutated = true;
            debug!(event_id = %doc.event_id, reminder_id = %reminder.id, "Reminder dispatched");
        }
    }
    mutated
}

/// Send a scheduled reminder immediately, stamping the send time.
/// An absent or already-sent id is a no-op.
pub fn send_now(doc: &mut EventDocument, reminder_id: &str, now: DateTime<Utc>) -> bool {
    match doc
        .host
        .reminders
        .iter_mut()
        .find(|r| r.id == reminder_id && !r.sent)
    {
        Some(reminder) => {
            reminder.sent = true;
            reminder.send_at = Some(now);
            true
        }
        None => false,
    }
}

/// Delete a reminder by id; absent id is a no-op.
pub fn delete(doc: &mut EventDocument, reminder_id: &str) -> bool {
    let before = doc.host.reminders.len();
    doc.host.reminders.retain(|r| r.id != reminder_id);
    doc.host.reminders.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn doc() -> EventDocument {
        EventDocument::seed("REMIND".to_string())
    }

    #[test]
    fn test_immediate_reminder_bypasses_scheduler() {
        let mut doc = doc();
        let now = Utc::now();
        let id = create(&mut doc, "now!".into(), None, now).id.clone();

        assert!(doc.host.reminders[0].sent);
        assert!(!process_due(&mut doc, now + Duration::days(365)));
        assert!(doc.host.reminders.iter().any(|r| r.id == id && r.sent));
    }

    #[test]
    fn test_due_reminders_dispatched_at_or_after() {
        let mut doc = doc();
        let now = Utc::now();
        create(&mut doc, "soon".into(), Some(now + Duration::minutes(10)), now);

        assert!(!process_due(&mut doc, now));
        assert!(!doc.host.reminders[0].sent);

        assert!(process_due(&mut doc, now + Duration::minutes(10)));
        assert!(doc.host.reminders[0].sent);
    }

    #[test]
    fn test_process_due_idempotent() {
        let mut doc = doc();
        let now = Utc::now();
        create(&mut doc, "a".into(), Some(now - Duration::minutes(1)), now - Duration::hours(1));

        assert!(process_due(&mut doc, now));
        let after_first = doc.clone();
        // Same tick again: no change, nothing unsent.
        assert!(!process_due(&mut doc, now));
        assert_eq!(doc, after_first);
    }

    #[test]
    fn test_sent_never_reverts() {
        let mut doc = doc();
        let now = Utc::now();
        create(&mut doc, "a".into(), Some(now), now);
        process_due(&mut doc, now);

        // A tick from "before" the send time cannot unsend.
        assert!(!process_due(&mut doc, now - Duration::hours(1)));
        assert!(doc.host.reminders[0].sent);
    }

    #[test]
    fn test_send_now_stamps_send_time() {
        let mut doc = doc();
        let now = Utc::now();
        let id = create(&mut doc, "later".into(), Some(now + Duration::days(1)), now)
            .id
            .clone();

        let sent_at = now + Duration::minutes(5);
        assert!(send_now(&mut doc, &id, sent_at));
        assert!(doc.host.reminders[0].sent);
        assert_eq!(doc.host.reminders[0].send_at, Some(sent_at));

        // Already sent: no-op.
        assert!(!send_now(&mut doc, &id, sent_at));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut doc = doc();
        let now = Utc::now();
        let id = create(&mut doc, "x".into(), None, now).id.clone();

        assert!(delete(&mut doc, &id));
        assert!(!delete(&mut doc, &id));
        assert!(doc.host.reminders.is_empty());
    }
}
