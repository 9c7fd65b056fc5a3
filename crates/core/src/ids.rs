//! Identifier generation
//!
//! Event codes are short shareable strings; everything else gets a
//! uuid-backed id so promoted suggestions can never collide with
//! manually added options.

use rand::Rng;
use uuid::Uuid;

/// Alphabet for shareable event codes (no lowercase, no symbols).
const EVENT_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a shareable event code.
pub const EVENT_CODE_LEN: usize = 6;

/// Generate a shareable event code, e.g. "K3QZ7P".
pub fn generate_event_code() -> String {
    let mut rng = rand::thread_rng();
    (0..EVENT_CODE_LEN)
        .map(|_| EVENT_CODE_ALPHABET[rng.gen_range(0..EVENT_CODE_ALPHABET.len())] as char)
        .collect()
}

fn prefixed(prefix: char) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

/// Id for a voteable time option.
pub fn new_time_id() -> String {
    prefixed('t')
}

/// Id for a voteable location option.
pub fn new_location_id() -> String {
    prefixed('l')
}

/// Id for a pending suggestion.
pub fn new_suggestion_id() -> String {
    prefixed('s')
}

/// Id for a reminder.
pub fn new_reminder_id() -> String {
    prefixed('r')
}
