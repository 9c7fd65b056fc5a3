//! Document schema migrations
//!
//! Upgrades a persisted event document to the current shape. Each step
//! is a pure function over the raw JSON map, applied in version order,
//! so a document from any earlier shape lands on the current one and a
//! current document passes through untouched.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::ids;
use crate::models::{EventDocument, DEFAULT_HOST_PASSWORD, DEFAULT_TIMEZONE, SCHEMA_VERSION};

/// A document migration step
struct DocMigration {
    /// Version number (must be sequential starting from 1)
    version: u32,
    /// Description of what this step does
    description: &'static str,
    /// Transformation to run for this step
    apply: fn(&mut Map<String, Value>),
}

/// All migration steps in order
const MIGRATIONS: &[DocMigration] = &[
    DocMigration {
        version: 1,
        description: "Normalize legacy field names and epoch-millisecond timestamps",
        apply: normalize_legacy_shape,
    },
    DocMigration {
        version: 2,
        description: "Fill missing event fields with defaults",
        apply: ensure_event_defaults,
    },
    DocMigration {
        version: 3,
        description: "Fill missing lock, option, vote, and host containers",
        apply: ensure_containers,
    },
    DocMigration {
        version: 4,
        description: "Seed canned options for documents with nothing voteable",
        apply: seed_default_options,
    },
    DocMigration {
        version: 5,
        description: "Backfill a schedule for documents locked before scheduling existed",
        apply: backfill_locked_schedule,
    },
];

/// Migrate a raw persisted document to the current schema.
///
/// Safe to run on an already-current document; re-running on the
/// output is a no-op.
#[instrument(skip(raw))]
pub fn migrate(raw: Value) -> Result<EventDocument> {
    let mut doc = match raw {
        Value::Object(map) => map,
        // Anything unrecognizable is treated as an empty first-use
        // document and fully seeded by the chain.
        _ => Map::new(),
    };

    let current = doc
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32;

    for step in MIGRATIONS {
        if step.version > current {
            debug!(version = step.version, description = step.description, "Applying document migration");
            (step.apply)(&mut doc);
        }
    }
    doc.insert("schemaVersion".into(), json!(SCHEMA_VERSION));

    Ok(serde_json::from_value(Value::Object(doc))?)
}

fn ensure_object<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = map.entry(key.to_string()).or_insert_with(|| json!({}));
    if !slot.is_object() {
        *slot = json!({});
    }
    match slot {
        Value::Object(obj) => obj,
        _ => unreachable!(),
    }
}

fn ensure_array<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Vec<Value> {
    let slot = map.entry(key.to_string()).or_insert_with(|| json!([]));
    if !slot.is_array() {
        *slot = json!([]);
    }
    match slot {
        Value::Array(arr) => arr,
        _ => unreachable!(),
    }
}

/// Insert a default for a missing field. A null default marks the
/// field nullable (an existing null stays); a non-null default also
/// replaces an explicit null so required fields always deserialize.
fn set_default(map: &mut Map<String, Value>, key: &str, default: Value) {
    let needs_default = match map.get(key) {
        None => true,
        Some(Value::Null) => !default.is_null(),
        Some(_) => false,
    };
    if needs_default {
        map.insert(key.to_string(), default);
    }
}

fn rename_key(map: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = map.remove(from) {
        map.entry(to.to_string()).or_insert(value);
    }
}

/// Rewrite an epoch-millisecond number in place as an RFC3339 string.
fn normalize_timestamp(map: &mut Map<String, Value>, key: &str) {
    let Some(ms) = map.get(key).and_then(Value::as_i64) else {
        return;
    };
    if let Some(at) = DateTime::<Utc>::from_timestamp_millis(ms) {
        map.insert(key.to_string(), json!(at.to_rfc3339()));
    }
}

/// v1: the original persisted shape used `organizer` for the lock
/// record, `*ISO` suffixes for the scheduled range, and raw
/// epoch-millisecond numbers for most timestamps.
fn normalize_legacy_shape(doc: &mut Map<String, Value>) {
    let has_event_id = doc.get("eventId").and_then(Value::as_str).is_some_and(|s| !s.is_empty());
    if !has_event_id {
        doc.insert("eventId".into(), json!(ids::generate_event_code()));
    }

    rename_key(doc, "organizer", "lockRecord");
    if let Some(lock) = doc.get_mut("lockRecord").and_then(Value::as_object_mut) {
        normalize_timestamp(lock, "lockedAt");
    }

    if let Some(event) = doc.get_mut("event").and_then(Value::as_object_mut) {
        rename_key(event, "startAtISO", "startAt");
        rename_key(event, "endAtISO", "endAt");
    }

    for key in ["votes", "rsvps"] {
        if let Some(records) = doc.get_mut(key).and_then(Value::as_object_mut) {
            for record in records.values_mut() {
                if let Some(record) = record.as_object_mut() {
                    normalize_timestamp(record, "updatedAt");
                }
            }
        }
    }

    if let Some(suggestions) = doc.get_mut("suggestions").and_then(Value::as_object_mut) {
        for key in ["times", "locations"] {
            if let Some(list) = suggestions.get_mut(key).and_then(Value::as_array_mut) {
                for item in list.iter_mut().filter_map(Value::as_object_mut) {
                    normalize_timestamp(item, "suggestedAt");
                }
            }
        }
    }

    if let Some(host) = doc.get_mut("host").and_then(Value::as_object_mut) {
        if let Some(reminders) = host.get_mut("reminders").and_then(Value::as_array_mut) {
            for reminder in reminders.iter_mut().filter_map(Value::as_object_mut) {
                rename_key(reminder, "sendAtISO", "sendAt");
                normalize_timestamp(reminder, "createdAt");
            }
        }
        if let Some(users) = host.get_mut("users").and_then(Value::as_array_mut) {
            for user in users.iter_mut().filter_map(Value::as_object_mut) {
                normalize_timestamp(user, "registeredAt");
            }
        }
    }
}

/// v2: every event field present, nullable ones defaulting to null.
fn ensure_event_defaults(doc: &mut Map<String, Value>) {
    let event = ensure_object(doc, "event");
    set_default(event, "title", json!("Invites+"));
    set_default(
        event,
        "description",
        json!("Vote on the time and place. After it locks, confirm if you're going."),
    );
    set_default(event, "timezone", json!(DEFAULT_TIMEZONE));
    set_default(event, "startAt", Value::Null);
    set_default(event, "endAt", Value::Null);
}

/// v3: every container present with documented defaults.
fn ensure_containers(doc: &mut Map<String, Value>) {
    set_default(doc, "locked", json!(false));

    let lock = ensure_object(doc, "lockRecord");
    set_default(lock, "lockedAt", Value::Null);
    set_default(lock, "lockedTimeId", Value::Null);
    set_default(lock, "lockedLocationId", Value::Null);

    let options = ensure_object(doc, "options");
    ensure_array(options, "times");
    ensure_array(options, "locations");

    let suggestions = ensure_object(doc, "suggestions");
    ensure_array(suggestions, "times");
    ensure_array(suggestions, "locations");

    ensure_object(doc, "votes");
    ensure_object(doc, "rsvps");

    let host = ensure_object(doc, "host");
    set_default(host, "pass", json!(DEFAULT_HOST_PASSWORD));
    ensure_array(host, "users");
    ensure_array(host, "reminders");
}

/// v4: a document with literally nothing voteable gets usable starting
/// options. Pending suggestions count as "something", so the host's
/// review queue is never papered over with canned entries.
fn seed_default_options(doc: &mut Map<String, Value>) {
    let no_time_suggestions = doc
        .get("suggestions")
        .and_then(|s| s.get("times"))
        .and_then(Value::as_array)
        .is_none_or(|list| list.is_empty());
    let no_location_suggestions = doc
        .get("suggestions")
        .and_then(|s| s.get("locations"))
        .and_then(Value::as_array)
        .is_none_or(|list| list.is_empty());

    let options = ensure_object(doc, "options");
    if ensure_array(options, "times").is_empty() && no_time_suggestions {
        options.insert(
            "times".into(),
            json!([
                { "id": "t1", "label": "Fri 7:00 PM" },
                { "id": "t2", "label": "Sat 1:00 PM" },
                { "id": "t3", "label": "Sun 11:00 AM" },
            ]),
        );
    }
    if ensure_array(options, "locations").is_empty() && no_location_suggestions {
        options.insert(
            "locations".into(),
            json!([
                { "id": "l1", "label": "Ramen Tatsu-Ya" },
                { "id": "l2", "label": "Home Poker Night" },
                { "id": "l3", "label": "Zilker Picnic" },
            ]),
        );
    }
}

/// v5: events locked before scheduling support existed get a
/// calendar-exportable range derived from the lock time.
fn backfill_locked_schedule(doc: &mut Map<String, Value>) {
    if doc.get("locked").and_then(Value::as_bool) != Some(true) {
        return;
    }
    let locked_at = doc
        .get("lockRecord")
        .and_then(|l| l.get("lockedAt"))
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|at| at.with_timezone(&Utc));
    let Some(locked_at) = locked_at else {
        return;
    };

    let event = ensure_object(doc, "event");
    if event.get("startAt").is_none_or(Value::is_null) {
        let start = locked_at + chrono::Duration::days(7);
        event.insert("startAt".into(), json!(start.to_rfc3339()));
        event.insert(
            "endAt".into(),
            json!((start + chrono::Duration::hours(1)).to_rfc3339()),
        );
    }
}
