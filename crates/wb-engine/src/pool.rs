//! The dice pool state machine.
//!
//! A [`DicePool`] tracks, for each kind, how many dice are loaded
//! (queued for the next full roll) and the latest rolled results. Rolled
//! dice are addressed by id: they can be selected, then rerolled or
//! removed as a group. Every operation is total; stale ids and empty
//! selections are benign no-ops. The pool is synchronous and
//! single-threaded, so callers needing shared access serialize mutations
//! themselves.

use std::collections::HashSet;

use crate::die::{Die, DieId, DieKind};
use crate::random::{RandomSource, StdRandom};
use crate::snapshot::{KindSummary, Snapshot};

/// Per-kind slot: loaded count plus the current result generation.
#[derive(Debug, Clone, Default)]
struct PoolEntry {
    /// Dice queued for the next full roll.
    count: u32,
    /// Latest results, replaced wholesale by the next roll of this kind.
    /// Removed dice stay in place with their flag set.
    results: Vec<Die>,
}

/// A pool of polyhedral dice.
///
/// Loaded counts and rolled results are deliberately decoupled: loading
/// shapes what the next full roll produces, while selection, reroll, and
/// removal act on dice already rolled. Removing a rolled die from play
/// does not unload anything.
#[derive(Debug)]
pub struct DicePool {
    entries: [PoolEntry; DieKind::COUNT],
    selection: HashSet<DieId>,
    source: Box<dyn RandomSource>,
    next_id: u64,
}

impl DicePool {
    /// An empty pool drawing randomness from OS entropy.
    pub fn new() -> Self {
        Self::with_source(Box::new(StdRandom::new()))
    }

    /// An empty pool with deterministic randomness derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(Box::new(StdRandom::seeded(seed)))
    }

    /// An empty pool drawing from the given source.
    pub fn with_source(source: Box<dyn RandomSource>) -> Self {
        Self {
            entries: std::array::from_fn(|_| PoolEntry::default()),
            selection: HashSet::new(),
            source,
            next_id: 0,
        }
    }

    fn entry(&self, kind: DieKind) -> &PoolEntry {
        &self.entries[kind.index()]
    }

    fn entry_mut(&mut self, kind: DieKind) -> &mut PoolEntry {
        &mut self.entries[kind.index()]
    }

    fn mint_id(&mut self) -> DieId {
        self.next_id += 1;
        DieId(self.next_id)
    }

    fn find_die(&self, id: DieId) -> Option<Die> {
        self.entries
            .iter()
            .flat_map(|entry| entry.results.iter())
            .find(|die| die.id == id)
            .copied()
    }

    /// Load `n` more dice of `kind`; returns the new loaded count.
    pub fn add_dice(&mut self, kind: DieKind, n: u32) -> u32 {
        let entry = self.entry_mut(kind);
        entry.count = entry.count.saturating_add(n);
        entry.count
    }

    /// Unload up to `n` dice of `kind`; returns the new loaded count.
    ///
    /// Saturates at zero and never touches rolled results.
    pub fn remove_dice(&mut self, kind: DieKind, n: u32) -> u32 {
        let entry = self.entry_mut(kind);
        entry.count = entry.count.saturating_sub(n);
        entry.count
    }

    /// Clear one kind: loaded count to zero, results dropped.
    ///
    /// The selection is left alone. Ids that pointed into the dropped
    /// results go stale, and stale ids are tolerated everywhere ids are
    /// accepted.
    pub fn reset_kind(&mut self, kind: DieKind) {
        let entry = self.entry_mut(kind);
        entry.count = 0;
        entry.results.clear();
    }

    /// Clear every kind and the selection. The only full reset.
    pub fn reset_all(&mut self) {
        for entry in &mut self.entries {
            entry.count = 0;
            entry.results.clear();
        }
        self.selection.clear();
    }

    /// Roll every loaded kind.
    ///
    /// Each kind with a nonzero loaded count gets a fresh generation:
    /// `count` new dice with newly minted ids, replacing that kind's
    /// previous results wholesale. Kinds with nothing loaded keep their
    /// old results but do not appear in the snapshot.
    ///
    /// The selection is not cleared here. Fresh dice have fresh ids, so
    /// anything selected before the roll is stale afterwards; the next
    /// selection-consuming operation clears it harmlessly.
    pub fn roll_all(&mut self) -> Snapshot {
        let mut by_kind = Vec::new();
        for kind in DieKind::ALL {
            let count = self.entry(kind).count;
            if count == 0 {
                continue;
            }
            let mut results = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let value = self.source.roll(kind.sides());
                let id = self.mint_id();
                results.push(Die::new(id, kind, value));
            }
            self.entry_mut(kind).results = results.clone();
            by_kind.push(KindSummary::from_rolls(kind, results));
        }
        Snapshot::new(by_kind)
    }

    /// Reroll every selected die still in play.
    ///
    /// Each one is replaced by a copy with a fresh face value, keeping
    /// its id, and is deselected. Removed dice never reroll, even if the
    /// selection somehow holds their id. Afterwards the selection is
    /// empty, stale ids included.
    pub fn reroll_selected(&mut self) -> Snapshot {
        for entry in &mut self.entries {
            for die in &mut entry.results {
                if die.is_live() && self.selection.contains(&die.id) {
                    let value = self.source.roll(die.kind.sides());
                    *die = die.rerolled(value);
                }
            }
        }
        self.selection.clear();
        self.current_results()
    }

    /// Remove every selected die from play.
    ///
    /// Marked dice keep their slot and face value, so roll sequences
    /// keep their history, but they stop counting toward totals and can
    /// never be rerolled or reselected. Loaded counts are untouched:
    /// removal acts on rolled results, not on what the next roll will
    /// produce. The selection is cleared, stale ids included.
    pub fn remove_selected(&mut self) -> Snapshot {
        for entry in &mut self.entries {
            for die in &mut entry.results {
                if self.selection.contains(&die.id) {
                    *die = die.discarded();
                }
            }
        }
        self.selection.clear();
        self.current_results()
    }

    /// Flip one id's selection membership; returns the new state.
    ///
    /// An id matching a removed die is ignored entirely: no membership
    /// change, no flag change, returns `false`. An id matching no die at
    /// all still toggles membership (callers are trusted with ids they
    /// once saw), while a live die also gets its flag synced.
    pub fn toggle_selection(&mut self, id: DieId) -> bool {
        if let Some(die) = self.find_die(id)
            && !die.is_live()
        {
            return false;
        }
        let now_selected = if self.selection.contains(&id) {
            self.selection.remove(&id);
            false
        } else {
            self.selection.insert(id);
            true
        };
        for entry in &mut self.entries {
            for die in &mut entry.results {
                if die.id == id {
                    *die = die.with_selected(now_selected);
                }
            }
        }
        now_selected
    }

    /// Snapshot every kind that currently has results, without rolling.
    ///
    /// This is the report shape reroll and removal return: a kind whose
    /// dice are all removed still appears, with a zero total.
    pub fn current_results(&self) -> Snapshot {
        let mut by_kind = Vec::new();
        for kind in DieKind::ALL {
            let entry = self.entry(kind);
            if entry.results.is_empty() {
                continue;
            }
            by_kind.push(KindSummary::from_rolls(kind, entry.results.clone()));
        }
        Snapshot::new(by_kind)
    }

    /// Loaded count for one kind.
    pub fn count_of(&self, kind: DieKind) -> u32 {
        self.entry(kind).count
    }

    /// The current result generation for one kind, removed dice included.
    pub fn results_of(&self, kind: DieKind) -> &[Die] {
        &self.entry(kind).results
    }

    /// Every kind with at least one die loaded, in ascending kind order.
    pub fn loaded_counts(&self) -> Vec<(DieKind, u32)> {
        DieKind::ALL
            .iter()
            .filter_map(|&kind| {
                let count = self.entry(kind).count;
                (count > 0).then_some((kind, count))
            })
            .collect()
    }

    /// Total dice loaded across all kinds.
    pub fn total_dice_count(&self) -> u32 {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Number of ids currently selected, stale ids included.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// True if the id is currently in the selection.
    pub fn is_selected(&self, id: DieId) -> bool {
        self.selection.contains(&id)
    }
}

impl Default for DicePool {
    fn default() -> Self {
        Self::new()
    }
}
