//! Die kinds, die identities, and rolled dice.
//!
//! A [`DieKind`] names one of the eight supported polyhedral dice. A
//! [`Die`] is one rolled instance: an immutable value carrying its
//! identity, face value, and selection/removal flags. State changes
//! produce a replacement value rather than mutating in place.

use serde::{Deserialize, Serialize};

/// A supported polyhedral die kind.
///
/// The set is closed: these eight kinds are the only dice the engine
/// knows. Variants are declared in ascending side order, and every
/// deterministic iteration over kinds (totals, snapshots, listings)
/// follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieKind {
    /// Two-sided die (coin flip).
    D2,
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
}

impl DieKind {
    /// Every kind, in ascending side order.
    pub const ALL: [DieKind; 8] = [
        Self::D2,
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    /// Number of supported kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the number of sides on this die kind.
    pub fn sides(self) -> u32 {
        match self {
            Self::D2 => 2,
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// Parse a kind from a string like "d20", "D6", or a bare "6".
    ///
    /// Returns `None` for anything outside the supported set (there is
    /// no d30 here); unknown strings stop at this boundary and never
    /// reach the pool.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let s = s.strip_prefix('d').unwrap_or(&s);
        match s {
            "2" => Some(Self::D2),
            "4" => Some(Self::D4),
            "6" => Some(Self::D6),
            "8" => Some(Self::D8),
            "10" => Some(Self::D10),
            "12" => Some(Self::D12),
            "20" => Some(Self::D20),
            "100" => Some(Self::D100),
            _ => None,
        }
    }

    /// Position of this kind within [`DieKind::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            Self::D2 => 0,
            Self::D4 => 1,
            Self::D6 => 2,
            Self::D8 => 3,
            Self::D10 => 4,
            Self::D12 => 5,
            Self::D20 => 6,
            Self::D100 => 7,
        }
    }
}

impl std::fmt::Display for DieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Identity of a rolled die, unique for the lifetime of its pool.
///
/// Ids come from a monotonically increasing counter and are never
/// reused, even after the die is removed or its kind is reset. An id
/// that no longer matches a die is "stale"; every operation that
/// accepts ids tolerates stale ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DieId(pub u64);

impl DieId {
    /// Parse an id from a string like "7" or "#7".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        s.parse::<u64>().ok().map(Self)
    }
}

impl std::fmt::Display for DieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One rolled die.
///
/// Transitions replace the whole value: [`Die::rerolled`] yields the die
/// with a new face value, [`Die::discarded`] yields it out of play.
/// Removal is terminal; a removed die is never rerolled or reselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    /// Pool-unique identity.
    pub id: DieId,
    /// The kind that produced this die.
    pub kind: DieKind,
    /// Face value, 1 through `kind.sides()`.
    pub value: u32,
    /// Whether the die is currently selected.
    pub selected: bool,
    /// Whether the die has been removed from play.
    pub removed: bool,
}

impl Die {
    /// A fresh die: unselected, in play.
    pub fn new(id: DieId, kind: DieKind, value: u32) -> Self {
        Self {
            id,
            kind,
            value,
            selected: false,
            removed: false,
        }
    }

    /// The die after a reroll: new face value, deselected.
    pub fn rerolled(self, value: u32) -> Self {
        Self {
            value,
            selected: false,
            ..self
        }
    }

    /// The die after removal: out of play and deselected.
    pub fn discarded(self) -> Self {
        Self {
            removed: true,
            selected: false,
            ..self
        }
    }

    /// The die with its selection flag set or cleared.
    pub fn with_selected(self, selected: bool) -> Self {
        Self { selected, ..self }
    }

    /// True if the die is still in play.
    pub fn is_live(self) -> bool {
        !self.removed
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.value)
    }
}
