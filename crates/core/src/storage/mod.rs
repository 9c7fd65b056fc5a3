//! SQLite storage layer for Invites
//!
//! The storage collaborator the core hands documents to: event
//! documents persisted whole (atomic replace), the global participant
//! roster, and the durable session pointer.

mod events;
mod migrations;
mod parse;
mod roster;
mod session;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;
use tracing::instrument;

use crate::error::{Error, Result};

pub use events::EventStore;
pub use roster::RosterStore;
pub use session::{ActiveSession, SessionStore};

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Default on-disk location, created if necessary
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "invites").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no home directory for application data",
            ))
        })?;
        std::fs::create_dir_all(dirs.data_dir())?;
        Ok(dirs.data_dir().join("invites.db"))
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get event document store
    pub fn events(&self) -> EventStore<'_> {
        EventStore::new(&self.conn)
    }

    /// Get global participant roster store
    pub fn roster(&self) -> RosterStore<'_> {
        RosterStore::new(&self.conn)
    }

    /// Get active session store
    pub fn session(&self) -> SessionStore<'_> {
        SessionStore::new(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invites.db");

        {
            let db = Database::open(&path).unwrap();
            let doc = db.events().create().unwrap();
            db.session()
                .save(&ActiveSession {
                    current_event_id: Some(doc.event_id.clone()),
                    user_phone: None,
                })
                .unwrap();
        }

        // Reopen: schema is current, data survived.
        let db = Database::open(&path).unwrap();
        assert!(db.schema_version() > 0);
        let session = db.session().load().unwrap();
        let code = session.current_event_id.unwrap();
        assert!(db.events().exists(&code).unwrap());
    }
}
