//! Interactive dice rolling sessions.
//!
//! [`RollSession`] wraps a dice pool behind a line-oriented command
//! interface: load dice, roll, select, reroll, and remove, with a roll
//! history that exports as markdown or plain text.

pub mod config;
pub mod error;
pub mod history;
pub mod session;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use history::{HistoryEntry, KindLine, RollHistory};
pub use session::RollSession;
