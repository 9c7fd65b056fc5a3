//! Global participant roster
//!
//! One account works across every event; the phone number is the
//! dedup key.

use rusqlite::{params, Connection};

use super::parse::{parse_datetime, OptionalExt};
use crate::error::Result;
use crate::models::Participant;

pub struct RosterStore<'a> {
    conn: &'a Connection,
}

impl<'a> RosterStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Register a participant. Registering an existing phone number is
    /// a no-op (sign-in), returning false.
    pub fn register(&self, participant: &Participant) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO global_users (phone_number, name, registered_at)
             VALUES (?1, ?2, ?3)",
            params![
                participant.phone_number,
                participant.name,
                participant.registered_at.to_rfc3339(),
            ],
        )?;
        Ok(inserted > 0)
    }

    /// Find a registered participant by phone number.
    pub fn find_by_phone(&self, phone_number: &str) -> Result<Option<Participant>> {
        let participant = self
            .conn
            .query_row(
                "SELECT phone_number, name, registered_at FROM global_users
                 WHERE phone_number = ?1",
                params![phone_number],
                |row| {
                    Ok(Participant {
                        phone_number: row.get(0)?,
                        name: row.get(1)?,
                        registered_at: parse_datetime(&row.get::<_, String>(2)?)?,
                    })
                },
            )
            .optional()?;
        Ok(participant)
    }

    /// All registered participants, oldest first.
    pub fn list(&self) -> Result<Vec<Participant>> {
        let mut stmt = self.conn.prepare(
            "SELECT phone_number, name, registered_at FROM global_users
             ORDER BY registered_at",
        )?;
        let participants = stmt
            .query_map([], |row| {
                Ok(Participant {
                    phone_number: row.get(0)?,
                    name: row.get(1)?,
                    registered_at: parse_datetime(&row.get::<_, String>(2)?)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use chrono::Utc;

    #[test]
    fn test_register_and_find() {
        let db = Database::open_in_memory().unwrap();
        let store = db.roster();

        let ana = Participant::new("5551234567".into(), "Ana".into(), Utc::now());
        assert!(store.register(&ana).unwrap());

        let found = store.find_by_phone("5551234567").unwrap().unwrap();
        assert_eq!(found.name, "Ana");
    }

    #[test]
    fn test_reregister_is_sign_in() {
        let db = Database::open_in_memory().unwrap();
        let store = db.roster();
        let now = Utc::now();

        assert!(store
            .register(&Participant::new("5551234567".into(), "Ana".into(), now))
            .unwrap());
        // Same phone, different display name: existing record wins.
        assert!(!store
            .register(&Participant::new("5551234567".into(), "Ana B.".into(), now))
            .unwrap());

        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.find_by_phone("5551234567").unwrap().unwrap().name, "Ana");
    }

    #[test]
    fn test_unknown_phone_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.roster().find_by_phone("0000000000").unwrap().is_none());
    }
}
