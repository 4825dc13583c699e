//! Dice pool and roll-resolution engine for Würfelbecher.
//!
//! Provides a pool of standard polyhedral dice (d2 through d100) that can
//! be loaded, rolled, selectively rerolled, and selectively removed, with
//! per-kind and grand totals reported as immutable snapshots. Randomness
//! is injected through the [`RandomSource`] trait so callers control
//! determinism.

pub mod die;
pub mod pool;
pub mod random;
pub mod snapshot;
pub mod stats;
pub mod validate;

pub use die::{Die, DieId, DieKind};
pub use pool::DicePool;
pub use random::{FixedSequence, RandomSource, StdRandom};
pub use snapshot::{KindSummary, Snapshot};
pub use stats::RollStats;
pub use validate::{MAX_DICE_PER_KIND, ValidationIssue, validate_config};
