//! Summary statistics over rolled face values.

use crate::snapshot::Snapshot;

/// Summary statistics for a set of face values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollStats {
    /// Number of values.
    pub count: usize,
    /// Sum of all values.
    pub sum: u32,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median; the mean of the two middle values when the count is even.
    pub median: f64,
    /// Smallest value.
    pub min: u32,
    /// Largest value.
    pub max: u32,
}

impl RollStats {
    /// Compute statistics over the given values, or `None` when empty.
    pub fn from_values(values: &[u32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let sum: u32 = values.iter().sum();
        let mean = f64::from(sum) / count as f64;
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
        } else {
            f64::from(sorted[mid])
        };
        Some(Self {
            count,
            sum,
            mean,
            median,
            min: sorted[0],
            max: sorted[count - 1],
        })
    }

    /// Statistics over every live die in a snapshot, or `None` when the
    /// snapshot holds no live dice.
    pub fn from_snapshot(snapshot: &Snapshot) -> Option<Self> {
        Self::from_values(&snapshot.live_values())
    }
}

impl std::fmt::Display for RollStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} dice: sum {}, mean {:.2}, median {:.1}, min {}, max {}",
            self.count, self.sum, self.mean, self.median, self.min, self.max
        )
    }
}
