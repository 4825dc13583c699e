//! Roll history storage and export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wb_engine::Snapshot;

/// One kind's line within a roll entry, like `2d6: [3, 5] = 8`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindLine {
    /// Count-prefixed kind, like "2d6".
    pub expression: String,
    /// Live face values in roll order.
    pub values: Vec<u32>,
    /// Sum of the values.
    pub total: u32,
}

impl KindLine {
    fn from_snapshot(snapshot: &Snapshot) -> Vec<Self> {
        snapshot
            .by_kind
            .iter()
            .map(|summary| Self {
                expression: format!("{}{}", summary.count, summary.kind),
                values: summary.live_values(),
                total: summary.total,
            })
            .collect()
    }
}

impl std::fmt::Display for KindLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vals: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "{}: [{}] = {}", self.expression, vals.join(", "), self.total)
    }
}

/// A single entry in the roll history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HistoryEntry {
    /// A full roll of the loaded pool.
    Rolled {
        /// One line per kind rolled.
        lines: Vec<KindLine>,
        /// Grand total across kinds.
        grand_total: u32,
        /// When rolled.
        timestamp: DateTime<Utc>,
    },
    /// A reroll of the selected dice.
    Rerolled {
        /// How many dice were rerolled.
        count: usize,
        /// Grand total after the reroll.
        grand_total: u32,
        /// When rerolled.
        timestamp: DateTime<Utc>,
    },
    /// Removal of the selected dice from play.
    Removed {
        /// How many dice were removed.
        count: usize,
        /// Grand total after the removal.
        grand_total: u32,
        /// When removed.
        timestamp: DateTime<Utc>,
    },
    /// A pool reset: one kind, or everything.
    Cleared {
        /// What was cleared, like "d6" or "all".
        target: String,
        /// When cleared.
        timestamp: DateTime<Utc>,
    },
}

impl HistoryEntry {
    /// A roll entry built from a fresh snapshot.
    pub fn rolled(snapshot: &Snapshot) -> Self {
        Self::Rolled {
            lines: KindLine::from_snapshot(snapshot),
            grand_total: snapshot.grand_total,
            timestamp: Utc::now(),
        }
    }

    /// A reroll entry for `count` rerolled dice.
    pub fn rerolled(count: usize, snapshot: &Snapshot) -> Self {
        Self::Rerolled {
            count,
            grand_total: snapshot.grand_total,
            timestamp: Utc::now(),
        }
    }

    /// A removal entry for `count` removed dice.
    pub fn removed(count: usize, snapshot: &Snapshot) -> Self {
        Self::Removed {
            count,
            grand_total: snapshot.grand_total,
            timestamp: Utc::now(),
        }
    }

    /// A reset entry for one kind or for "all".
    pub fn cleared(target: &str) -> Self {
        Self::Cleared {
            target: target.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// A chronological log of pool events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollHistory {
    entries: Vec<HistoryEntry>,
}

impl RollHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the history as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Roll History\n\n");
        for entry in &self.entries {
            match entry {
                HistoryEntry::Rolled {
                    lines, grand_total, ..
                } => {
                    out.push_str(&format!("**Roll**: grand total {grand_total}\n"));
                    for line in lines {
                        out.push_str(&format!("- {line}\n"));
                    }
                    out.push('\n');
                }
                HistoryEntry::Rerolled {
                    count, grand_total, ..
                } => {
                    out.push_str(&format!(
                        "**Reroll** ({count} dice): grand total {grand_total}\n\n"
                    ));
                }
                HistoryEntry::Removed {
                    count, grand_total, ..
                } => {
                    out.push_str(&format!(
                        "**Remove** ({count} dice): grand total {grand_total}\n\n"
                    ));
                }
                HistoryEntry::Cleared { target, .. } => {
                    out.push_str(&format!("*Cleared*: {target}\n\n"));
                }
            }
        }
        out
    }

    /// Export the history as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Roll History\n============\n\n");
        for entry in &self.entries {
            match entry {
                HistoryEntry::Rolled {
                    lines, grand_total, ..
                } => {
                    out.push_str(&format!("Roll: grand total {grand_total}\n"));
                    for line in lines {
                        out.push_str(&format!("  {line}\n"));
                    }
                    out.push('\n');
                }
                HistoryEntry::Rerolled {
                    count, grand_total, ..
                } => {
                    out.push_str(&format!(
                        "Reroll ({count} dice): grand total {grand_total}\n\n"
                    ));
                }
                HistoryEntry::Removed {
                    count, grand_total, ..
                } => {
                    out.push_str(&format!(
                        "Remove ({count} dice): grand total {grand_total}\n\n"
                    ));
                }
                HistoryEntry::Cleared { target, .. } => {
                    out.push_str(&format!("Cleared: {target}\n\n"));
                }
            }
        }
        out
    }
}
