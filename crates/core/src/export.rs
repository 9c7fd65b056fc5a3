//! Calendar and clipboard export
//!
//! The only two serialization formats the core produces: an iCalendar
//! payload for download and a plain-text summary for copy-to-clipboard.
//! Both are built from the locked plan; neither is a wire protocol.

use chrono::{DateTime, Duration, Utc};

use crate::models::EventDocument;

/// Stamp a datetime the way iCalendar wants it: `YYYYMMDDTHHMMSS`.
fn ics_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%S").to_string()
}

/// Lowercased, whitespace-collapsed title for the UID.
fn slug(title: &str) -> String {
    title.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// Build the iCalendar invite for a scheduled event.
///
/// Returns `None` when no start time is set; the caller disables
/// export instead of crashing. A missing end defaults to one hour
/// after the start.
pub fn calendar_invite(doc: &EventDocument, now: DateTime<Utc>) -> Option<String> {
    let start = doc.event.start_at?;
    let end = doc.event.end_at.unwrap_or(start + Duration::hours(1));

    let time_label = doc.locked_time_label().unwrap_or("");
    let location_label = doc.locked_location_label().unwrap_or("");

    let uid = format!(
        "invites-{}-{}@invites-mvp",
        slug(&doc.event.title),
        doc.lock_record
            .locked_at
            .map(|at| at.timestamp_millis())
            .unwrap_or_default()
    );

    Some(format!(
        "BEGIN:VCALENDAR\n\
         VERSION:2.0\n\
         PRODID:-//Invites MVP//EN\n\
         BEGIN:VEVENT\n\
         UID:{uid}\n\
         DTSTAMP:{dtstamp}\n\
         DTSTART:{dtstart}\n\
         DTEND:{dtend}\n\
         SUMMARY:{summary}\n\
         LOCATION:{location}\n\
         DESCRIPTION:{description}\\n\\nTime: {time_label}\\nLocation: {location_label}\n\
         END:VEVENT\n\
         END:VCALENDAR",
        dtstamp = ics_stamp(now),
        dtstart = ics_stamp(start),
        dtend = ics_stamp(end),
        summary = doc.event.title,
        location = location_label,
        description = doc.event.description,
    ))
}

/// Multi-line human text for copy-to-clipboard.
pub fn plain_summary(doc: &EventDocument) -> String {
    let mut text = format!(
        "{}\n\n{}\n\nTime: {}\nLocation: {}",
        doc.event.title,
        doc.event.description,
        doc.locked_time_label().unwrap_or(""),
        doc.locked_location_label().unwrap_or(""),
    );
    if let Some(start) = doc.event.start_at {
        text.push_str(&format!("\nStarts: {}", start.format("%Y-%m-%d %H:%M")));
    }
    if let Some(end) = doc.event.end_at {
        text.push_str(&format!("\nEnds: {}", end.format("%Y-%m-%d %H:%M")));
    }
    text
}
