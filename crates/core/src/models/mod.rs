//! Data models for Invites

mod document;
mod event;
mod option;
mod participant;
mod reminder;
mod suggestion;
mod vote;

pub use document::*;
pub use event::*;
pub use option::*;
pub use participant::*;
pub use reminder::*;
pub use suggestion::*;
pub use vote::*;
