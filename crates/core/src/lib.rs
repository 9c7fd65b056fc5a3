//! Invites Core Library
//!
//! The decision engine behind a small event-planning tool: vote
//! tallying, winner resolution, the lock state machine, scheduled
//! reminders, suggestion approval, document schema migration, and the
//! SQLite persistence behind all of it. Rendering and input wiring
//! live in an outer UI layer that calls into this crate.

pub mod error;
pub mod export;
pub mod ids;
pub mod invariants;
pub mod lock;
pub mod migrate;
pub mod models;
pub mod reminders;
pub mod storage;
pub mod suggestions;
pub mod tally;

pub use error::{Error, Result};
pub use lock::{lock_plan, HostAuth, PlainPassword};
pub use migrate::migrate;
pub use models::*;
pub use storage::{ActiveSession, Database, EventStore, RosterStore, SessionStore};
pub use tally::{resolve_winners, tally, Tally, Winners};
