//! Immutable roll reports.
//!
//! Every pool operation that changes face values returns a [`Snapshot`]:
//! a self-contained copy of the affected results with per-kind and grand
//! totals. Snapshots never change after creation; later operations on
//! the pool leave earlier snapshots untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::die::{Die, DieKind};

/// One kind's slice of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSummary {
    /// The kind summarized.
    pub kind: DieKind,
    /// Every die of this kind in the current result generation, removed
    /// dice included (in roll order).
    pub rolls: Vec<Die>,
    /// Sum of face values over dice still in play.
    pub total: u32,
    /// Number of dice still in play.
    pub count: u32,
}

impl KindSummary {
    /// Summarize a result slice; totals cover live dice only.
    pub(crate) fn from_rolls(kind: DieKind, rolls: Vec<Die>) -> Self {
        let total = rolls.iter().filter(|d| d.is_live()).map(|d| d.value).sum();
        let count = rolls.iter().filter(|d| d.is_live()).count() as u32;
        Self {
            kind,
            rolls,
            total,
            count,
        }
    }

    /// Face values of the live dice, in roll order.
    pub fn live_values(&self) -> Vec<u32> {
        self.rolls
            .iter()
            .filter(|d| d.is_live())
            .map(|d| d.value)
            .collect()
    }
}

impl std::fmt::Display for KindSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} total: {}", self.count, self.kind, self.total)
    }
}

/// An immutable report of the pool after one operation.
///
/// `by_kind` lists summaries in ascending kind order. Which kinds appear
/// depends on the operation: a full roll covers every kind with dice
/// loaded, while reroll and removal cover every kind that currently has
/// results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Per-kind summaries in ascending kind order.
    pub by_kind: Vec<KindSummary>,
    /// Sum of every per-kind total.
    pub grand_total: u32,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Seal a set of summaries into a timestamped snapshot.
    pub(crate) fn new(by_kind: Vec<KindSummary>) -> Self {
        let grand_total = by_kind.iter().map(|s| s.total).sum();
        Self {
            by_kind,
            grand_total,
            timestamp: Utc::now(),
        }
    }

    /// The summary for one kind, if the snapshot covers it.
    pub fn kind(&self, kind: DieKind) -> Option<&KindSummary> {
        self.by_kind.iter().find(|s| s.kind == kind)
    }

    /// Face values of every live die, grouped by kind in ascending order.
    pub fn live_values(&self) -> Vec<u32> {
        self.by_kind
            .iter()
            .flat_map(KindSummary::live_values)
            .collect()
    }

    /// True if the snapshot covers no kinds at all.
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for summary in &self.by_kind {
            writeln!(f, "{summary}")?;
        }
        write!(f, "Grand Total: {}", self.grand_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::die::DieId;

    fn die(id: u64, kind: DieKind, value: u32) -> Die {
        Die::new(DieId(id), kind, value)
    }

    #[test]
    fn summary_totals_skip_removed() {
        let rolls = vec![
            die(1, DieKind::D6, 3),
            die(2, DieKind::D6, 5).discarded(),
            die(3, DieKind::D6, 4),
        ];
        let summary = KindSummary::from_rolls(DieKind::D6, rolls);
        assert_eq!(summary.total, 7);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.rolls.len(), 3);
        assert_eq!(summary.live_values(), vec![3, 4]);
    }

    #[test]
    fn summary_display() {
        let rolls = vec![die(1, DieKind::D6, 3), die(2, DieKind::D6, 4)];
        let summary = KindSummary::from_rolls(DieKind::D6, rolls);
        assert_eq!(summary.to_string(), "2d6 total: 7");
    }

    #[test]
    fn snapshot_grand_total_sums_kinds() {
        let snapshot = Snapshot::new(vec![
            KindSummary::from_rolls(DieKind::D6, vec![die(1, DieKind::D6, 3)]),
            KindSummary::from_rolls(DieKind::D20, vec![die(2, DieKind::D20, 15)]),
        ]);
        assert_eq!(snapshot.grand_total, 18);
        assert_eq!(snapshot.kind(DieKind::D6).map(|s| s.total), Some(3));
        assert!(snapshot.kind(DieKind::D8).is_none());
        assert_eq!(snapshot.live_values(), vec![3, 15]);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = Snapshot::new(Vec::new());
        assert_eq!(snapshot.grand_total, 0);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.to_string(), "Grand Total: 0");
    }

    #[test]
    fn snapshot_display() {
        let snapshot = Snapshot::new(vec![
            KindSummary::from_rolls(
                DieKind::D6,
                vec![die(1, DieKind::D6, 3), die(2, DieKind::D6, 4)],
            ),
            KindSummary::from_rolls(DieKind::D20, vec![die(3, DieKind::D20, 15)]),
        ]);
        assert_eq!(
            snapshot.to_string(),
            "2d6 total: 7\n1d20 total: 15\nGrand Total: 22"
        );
    }

    #[test]
    fn snapshot_serde_round_trip() {
        let snapshot = Snapshot::new(vec![KindSummary::from_rolls(
            DieKind::D10,
            vec![die(1, DieKind::D10, 9), die(2, DieKind::D10, 2).discarded()],
        )]);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.by_kind, snapshot.by_kind);
        assert_eq!(back.grand_total, snapshot.grand_total);
    }
}
