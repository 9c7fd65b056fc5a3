//! Event document storage
//!
//! The document is persisted whole: every save is an atomic
//! whole-document replace keyed by the event code, and every load
//! routes the raw JSON through the schema migrator so callers only
//! ever see the current shape.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::Value;
use tracing::{debug, warn};

use super::parse::OptionalExt;
use crate::error::{Error, Result};
use crate::ids;
use crate::migrate;
use crate::models::EventDocument;

pub struct EventStore<'a> {
    conn: &'a Connection,
}

/// Event codes are shared verbally and typed back in, so lookups are
/// case- and whitespace-insensitive.
fn canonical_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl<'a> EventStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist a document, replacing any previous version whole.
    pub fn save(&self, doc: &EventDocument) -> Result<()> {
        let doc_json = serde_json::to_string(doc)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO event_documents (event_id, doc_json, updated_at)
             VALUES (?1, ?2, ?3)",
            params![doc.event_id, doc_json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Load the raw persisted JSON without migrating it.
    pub fn load_raw(&self, code: &str) -> Result<Option<Value>> {
        let stored = self
            .conn
            .query_row(
                "SELECT doc_json FROM event_documents WHERE event_id = ?1",
                params![canonical_code(code)],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match stored {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Load a document, upgraded to the current schema.
    pub fn load(&self, code: &str) -> Result<Option<EventDocument>> {
        match self.load_raw(code)? {
            Some(raw) => {
                let doc = migrate::migrate(raw)?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Load a document that must already exist (join flow).
    pub fn require(&self, code: &str) -> Result<EventDocument> {
        self.load(code)?
            .ok_or_else(|| Error::NotFound(format!("event {}", canonical_code(code))))
    }

    /// Load a document, seeding a fresh one on first use.
    pub fn load_or_create(&self, code: &str) -> Result<EventDocument> {
        if let Some(doc) = self.load(code)? {
            return Ok(doc);
        }
        debug!(event_id = %canonical_code(code), "Seeding first-use event document");
        let doc = migrate::migrate(serde_json::json!({ "eventId": canonical_code(code) }))?;
        self.save(&doc)?;
        Ok(doc)
    }

    /// Create a brand-new event with a generated code.
    pub fn create(&self) -> Result<EventDocument> {
        let mut code = ids::generate_event_code();
        while self.exists(&code)? {
            warn!(event_id = %code, "Event code collision, regenerating");
            code = ids::generate_event_code();
        }
        self.load_or_create(&code)
    }

    /// Whether an event with this code exists (join flow).
    pub fn exists(&self, code: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM event_documents WHERE event_id = ?1",
                params![canonical_code(code)],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All stored event codes, most recently touched first.
    pub fn list_codes(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT event_id FROM event_documents ORDER BY updated_at DESC")?;
        let codes = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(codes)
    }

    /// Delete an event document entirely.
    pub fn delete(&self, code: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM event_documents WHERE event_id = ?1",
            params![canonical_code(code)],
        )?;
        Ok(())
    }
}
