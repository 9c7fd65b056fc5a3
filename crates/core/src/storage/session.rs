//! Active session persistence
//!
//! The durable "which event, which user" record. The original kept
//! these in process globals; modeling them as an explicit single-row
//! record keeps every core operation free of implicit shared state.

use chrono::Utc;
use rusqlite::{params, Connection};

use super::parse::OptionalExt;
use crate::error::Result;

/// The current event/user pointer. Both halves are independent: a
/// signed-in user may not have entered an event yet, and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSession {
    pub current_event_id: Option<String>,
    pub user_phone: Option<String>,
}

pub struct SessionStore<'a> {
    conn: &'a Connection,
}

impl<'a> SessionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Save the session, replacing the single row.
    pub fn save(&self, session: &ActiveSession) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO active_session (id, current_event_id, user_phone, updated_at)
             VALUES (1, ?1, ?2, ?3)",
            params![
                session.current_event_id,
                session.user_phone,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Load the session; a missing row means a fresh install.
    pub fn load(&self) -> Result<ActiveSession> {
        let session = self
            .conn
            .query_row(
                "SELECT current_event_id, user_phone FROM active_session WHERE id = 1",
                [],
                |row| {
                    Ok(ActiveSession {
                        current_event_id: row.get(0)?,
                        user_phone: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(session.unwrap_or_default())
    }

    /// Leave the current event, keeping the signed-in user.
    pub fn leave_event(&self) -> Result<()> {
        let mut session = self.load()?;
        session.current_event_id = None;
        self.save(&session)
    }

    /// Sign out entirely.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM active_session", [])?;
        Ok(())
    }
}
