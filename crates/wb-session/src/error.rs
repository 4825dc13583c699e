//! Error types for the roll session.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while processing session commands.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A die kind the engine does not know.
    #[error("unknown die kind: {0}")]
    UnknownDie(String),

    /// A count argument that is not a number.
    #[error("invalid count: {0}")]
    InvalidCount(String),

    /// A die id that does not parse.
    #[error("invalid die id: {0}")]
    InvalidId(String),

    /// A request that would push one kind past the per-kind limit.
    #[error("too many dice: at most {max} {kind} in the pool")]
    TooManyDice {
        /// The kind that would overflow.
        kind: String,
        /// The per-kind limit.
        max: u32,
    },

    /// Rolling with nothing loaded.
    #[error("no dice to roll; add some first")]
    EmptyPool,

    /// Rerolling or removing with nothing selected.
    #[error("no dice selected to {0}")]
    NothingSelected(String),

    /// Invalid choice or input.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
