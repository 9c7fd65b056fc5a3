//! Reminder model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

/// A host-authored message with an optional deferred send time.
///
/// `sent` transitions only false -> true. A reminder created without a
/// send time is sent immediately and never touched by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub message: String,
    #[serde(default)]
    pub send_at: Option<DateTime<Utc>>,
    pub sent: bool,
}

impl Reminder {
    pub fn new(message: String, send_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        Self {
            id: ids::new_reminder_id(),
            created_at: now,
            message,
            // No send time means send-now semantics.
            sent: send_at.is_none(),
            send_at,
        }
    }

    /// Whether the scheduler should dispatch this reminder at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.sent && self.send_at.is_some_and(|at| at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_send_now_created_sent() {
        let now = Utc::now();
        let r = Reminder::new("hi".into(), None, now);
        assert!(r.sent);
        assert!(!r.is_due(now));
    }

    #[test]
    fn test_due_at_or_after_send_time() {
        let now = Utc::now();
        let r = Reminder::new("hi".into(), Some(now), now - Duration::minutes(5));
        assert!(!r.is_due(now - Duration::seconds(1)));
        assert!(r.is_due(now));
        assert!(r.is_due(now + Duration::hours(1)));
    }
}
