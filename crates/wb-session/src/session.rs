//! Interactive dice rolling session.
//!
//! `RollSession` owns a `DicePool` and a `RollHistory` and exposes a
//! line-oriented command interface on top of them: load dice, roll the
//! pool, select rolled dice by id, reroll or remove the selection, and
//! inspect totals, statistics, and history.

use strsim::jaro_winkler;

use wb_engine::{
    DicePool, Die, DieId, DieKind, MAX_DICE_PER_KIND, RollStats, Snapshot,
};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::history::{HistoryEntry, RollHistory};

/// Minimum similarity score for command suggestions (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Every command name, for near-miss suggestions.
const COMMANDS: [&str; 18] = [
    "add", "drop", "clear", "reset", "pool", "roll", "select", "sel", "reroll", "remove", "show",
    "total", "stats", "history", "export", "dice", "help", "quit",
];

/// An interactive dice rolling session.
pub struct RollSession {
    pool: DicePool,
    history: RollHistory,
    history_window: usize,
}

impl RollSession {
    /// Create a session from configuration.
    pub fn new(config: SessionConfig) -> Self {
        let pool = match config.seed {
            Some(seed) => DicePool::seeded(seed),
            None => DicePool::new(),
        };
        Self {
            pool,
            history: RollHistory::new(),
            history_window: config.history_window,
        }
    }

    /// Create a session over a specific pool.
    pub fn with_pool(pool: DicePool) -> Self {
        Self {
            pool,
            history: RollHistory::new(),
            history_window: SessionConfig::default().history_window,
        }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    /// Get the roll history.
    pub fn history(&self) -> &RollHistory {
        &self.history
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "add" => self.do_add(rest),
            "drop" => self.do_drop(rest),
            "clear" => self.do_clear(rest),
            "reset" => self.do_clear("all"),
            "pool" => self.do_pool(),
            "roll" => self.do_roll(),
            "select" | "sel" => self.do_select(rest),
            "reroll" => self.do_reroll(),
            "remove" => self.do_remove(),
            "show" => self.do_show(),
            "total" | "totals" => self.do_total(),
            "stats" => self.do_stats(),
            "history" => self.do_history(),
            "export" => self.do_export(rest),
            "dice" => self.do_dice(),
            "help" => self.do_help(rest),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            other => Err(unknown_command(other)),
        }
    }

    fn do_add(&mut self, rest: &str) -> SessionResult<String> {
        let (kind, n) = parse_dice_args(rest, "usage: add <die> [count]")?;
        let have = self.pool.count_of(kind);
        if have.saturating_add(n) > MAX_DICE_PER_KIND {
            return Err(SessionError::TooManyDice {
                kind: kind.to_string(),
                max: MAX_DICE_PER_KIND,
            });
        }
        let now = self.pool.add_dice(kind, n);
        Ok(format!("Added {n}x{kind} ({kind}: {now} loaded)"))
    }

    fn do_drop(&mut self, rest: &str) -> SessionResult<String> {
        let (kind, n) = parse_dice_args(rest, "usage: drop <die> [count]")?;
        let now = self.pool.remove_dice(kind, n);
        Ok(format!("Dropped {n}x{kind} ({kind}: {now} loaded)"))
    }

    fn do_clear(&mut self, rest: &str) -> SessionResult<String> {
        if rest.is_empty() {
            return Err(SessionError::InvalidChoice(
                "usage: clear <die>|all".to_string(),
            ));
        }
        if rest.eq_ignore_ascii_case("all") {
            self.pool.reset_all();
            self.history.record(HistoryEntry::cleared("all"));
            return Ok("All dice cleared".to_string());
        }
        let kind = parse_kind(rest)?;
        self.pool.reset_kind(kind);
        self.history.record(HistoryEntry::cleared(&kind.to_string()));
        Ok(format!("{kind} reset to 0"))
    }

    fn do_pool(&self) -> SessionResult<String> {
        let loaded = self.pool.loaded_counts();
        if loaded.is_empty() {
            return Ok("Pool is empty. Use 'add' to load dice.".to_string());
        }
        let parts: Vec<String> = loaded
            .iter()
            .map(|(kind, count)| format!("{count}x{kind}"))
            .collect();
        Ok(format!(
            "Pool: {} ({} dice)",
            parts.join(", "),
            self.pool.total_dice_count()
        ))
    }

    fn do_roll(&mut self) -> SessionResult<String> {
        if self.pool.total_dice_count() == 0 {
            return Err(SessionError::EmptyPool);
        }
        let snapshot = self.pool.roll_all();
        self.history.record(HistoryEntry::rolled(&snapshot));
        let rolled: usize = snapshot.by_kind.iter().map(|s| s.rolls.len()).sum();
        Ok(format!("Rolled {rolled} dice:\n{}", render_snapshot(&snapshot)))
    }

    fn do_select(&mut self, rest: &str) -> SessionResult<String> {
        if rest.is_empty() {
            return Err(SessionError::InvalidChoice(
                "usage: select <id>".to_string(),
            ));
        }
        let id = DieId::parse(rest).ok_or_else(|| SessionError::InvalidId(rest.to_string()))?;
        if let Some(die) = self.find_die(id)
            && die.removed
        {
            return Err(SessionError::InvalidChoice(format!(
                "die {id} has been removed"
            )));
        }
        let selected = self.pool.toggle_selection(id);
        let verb = if selected { "Selected" } else { "Deselected" };
        Ok(format!(
            "{verb} {id} ({} selected)",
            self.pool.selected_count()
        ))
    }

    fn do_reroll(&mut self) -> SessionResult<String> {
        if self.pool.selected_count() == 0 {
            return Err(SessionError::NothingSelected("reroll".to_string()));
        }
        let count = self.selected_die_count();
        let snapshot = self.pool.reroll_selected();
        self.history.record(HistoryEntry::rerolled(count, &snapshot));
        Ok(format!(
            "Selected dice rerolled:\n{}",
            render_snapshot(&snapshot)
        ))
    }

    fn do_remove(&mut self) -> SessionResult<String> {
        if self.pool.selected_count() == 0 {
            return Err(SessionError::NothingSelected("remove".to_string()));
        }
        let count = self.selected_die_count();
        let snapshot = self.pool.remove_selected();
        self.history.record(HistoryEntry::removed(count, &snapshot));
        Ok(format!(
            "Selected dice removed:\n{}",
            render_snapshot(&snapshot)
        ))
    }

    fn do_show(&self) -> SessionResult<String> {
        let snapshot = self.pool.current_results();
        if snapshot.is_empty() {
            return Ok("No results yet. Try 'roll'.".to_string());
        }
        Ok(render_snapshot(&snapshot))
    }

    fn do_total(&self) -> SessionResult<String> {
        let snapshot = self.pool.current_results();
        if snapshot.is_empty() {
            return Ok("No results yet. Try 'roll'.".to_string());
        }
        Ok(snapshot.to_string())
    }

    fn do_stats(&self) -> SessionResult<String> {
        match RollStats::from_snapshot(&self.pool.current_results()) {
            Some(stats) => Ok(stats.to_string()),
            None => Ok("No dice to summarize.".to_string()),
        }
    }

    fn do_history(&self) -> SessionResult<String> {
        if self.history.is_empty() {
            return Ok("History is empty.".to_string());
        }
        let entries = self.history.entries();
        let start = entries.len().saturating_sub(self.history_window);
        let recent = &entries[start..];

        let mut out = format!(
            "History ({} entries, showing last {}):\n\n",
            entries.len(),
            recent.len()
        );
        let mut mini = RollHistory::new();
        for entry in recent {
            mini.record(entry.clone());
        }
        out.push_str(&mini.export_text());
        Ok(out.trim_end().to_string())
    }

    fn do_export(&self, format: &str) -> SessionResult<String> {
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(self.history.export_markdown()),
            "text" | "txt" => Ok(self.history.export_text()),
            other => Err(SessionError::InvalidChoice(format!(
                "unknown format '{other}', use: markdown, text"
            ))),
        }
    }

    fn do_dice(&self) -> SessionResult<String> {
        let kinds: Vec<String> = DieKind::ALL.iter().map(|k| k.to_string()).collect();
        Ok(format!("Supported dice: {}", kinds.join(", ")))
    }

    fn do_help(&self, topic: &str) -> SessionResult<String> {
        match topic.to_lowercase().as_str() {
            "pool" | "add" => Ok("\
Pool Commands:
  add <die> [n]           Load dice (e.g. 'add d6 2')
  drop <die> [n]          Unload dice
  clear <die>             Reset one kind to 0
  clear all               Clear everything, selection included
  pool                    Show what is loaded"
                .to_string()),
            "roll" | "show" => Ok("\
Rolling Commands:
  roll                    Roll every loaded die
  show                    Show current results with die ids
  total                   Per-kind totals and the grand total
  stats                   Sum, mean, median, min, max of live dice"
                .to_string()),
            "select" | "reroll" | "remove" => Ok("\
Selection Commands:
  select <id>             Toggle selection of a rolled die (e.g. 'select 3')
  reroll                  Reroll every selected die
  remove                  Take every selected die out of play

Removed dice keep their place in the roll sequence but stop counting
toward totals, and they can never be selected or rerolled again."
                .to_string()),
            "history" | "export" => Ok("\
History Commands:
  history                 Show recent events
  export [markdown|text]  Export the full history"
                .to_string()),
            _ => Ok("\
Dice Pool Commands:
  add <die> [n]           Load dice into the pool
  drop <die> [n]          Unload dice
  clear <die>|all         Reset one kind or everything
  pool                    Show what is loaded
  roll                    Roll every loaded die
  select <id>             Toggle selection of a rolled die
  reroll                  Reroll the selected dice
  remove                  Remove the selected dice from play
  show                    Show current results
  total                   Show totals
  stats                   Statistics over current results
  history                 Show recent events
  export [markdown|text]  Export the full history
  dice                    List supported die kinds
  help [topic]            Show help (pool, roll, select, history)
  quit                    Exit"
                .to_string()),
        }
    }

    fn find_die(&self, id: DieId) -> Option<Die> {
        DieKind::ALL
            .iter()
            .flat_map(|&kind| self.pool.results_of(kind).iter())
            .find(|die| die.id == id)
            .copied()
    }

    /// Dice that will actually be affected by reroll/remove: live dice
    /// with their selection flag set. Stale ids in the selection match
    /// no die and affect nothing.
    fn selected_die_count(&self) -> usize {
        DieKind::ALL
            .iter()
            .flat_map(|&kind| self.pool.results_of(kind).iter())
            .filter(|die| die.selected)
            .count()
    }
}

impl Default for RollSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Render a snapshot for the terminal: one line per live die (selected
/// dice marked with `*`), then per-kind totals and the grand total.
/// Removed dice are hidden.
fn render_snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for summary in &snapshot.by_kind {
        for die in &summary.rolls {
            if die.removed {
                continue;
            }
            let mark = if die.selected { " *" } else { "" };
            out.push_str(&format!("  {} {die}{mark}\n", die.id));
        }
    }
    out.push_str(&snapshot.to_string());
    out
}

/// Parse `<die> [count]` arguments; the count defaults to 1.
fn parse_dice_args(rest: &str, usage: &str) -> SessionResult<(DieKind, u32)> {
    let mut words = rest.split_whitespace();
    let Some(kind_word) = words.next() else {
        return Err(SessionError::InvalidChoice(usage.to_string()));
    };
    let kind = parse_kind(kind_word)?;
    let n = match words.next() {
        Some(word) => word
            .parse::<u32>()
            .map_err(|_| SessionError::InvalidCount(word.to_string()))?,
        None => 1,
    };
    Ok((kind, n))
}

fn parse_kind(s: &str) -> SessionResult<DieKind> {
    DieKind::parse(s).ok_or_else(|| SessionError::UnknownDie(s.to_string()))
}

/// Build an unknown-command error, suggesting the closest command name
/// when one is similar enough.
fn unknown_command(cmd: &str) -> SessionError {
    let mut best_score = FUZZY_THRESHOLD;
    let mut suggestion = None;
    for candidate in COMMANDS {
        let score = jaro_winkler(cmd, candidate);
        if score >= best_score {
            best_score = score;
            suggestion = Some(candidate);
        }
    }
    match suggestion {
        Some(name) => SessionError::UnknownCommand(format!("{cmd} (did you mean '{name}'?)")),
        None => SessionError::UnknownCommand(cmd.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wb_engine::FixedSequence;

    fn scripted_session(values: &[u32]) -> RollSession {
        RollSession::with_pool(DicePool::with_source(Box::new(FixedSequence::new(
            values.to_vec(),
        ))))
    }

    fn test_session() -> RollSession {
        RollSession::with_pool(DicePool::seeded(42))
    }

    #[test]
    fn create_session() {
        let s = test_session();
        assert_eq!(s.pool().total_dice_count(), 0);
        assert!(s.history().is_empty());
    }

    #[test]
    fn add_and_pool() {
        let mut s = test_session();
        assert_eq!(s.process("add d6 2").unwrap(), "Added 2xd6 (d6: 2 loaded)");
        assert_eq!(s.process("add d6").unwrap(), "Added 1xd6 (d6: 3 loaded)");
        s.process("add d20 1").unwrap();
        assert_eq!(s.process("pool").unwrap(), "Pool: 3xd6, 1xd20 (4 dice)");
    }

    #[test]
    fn add_unknown_die() {
        let mut s = test_session();
        let err = s.process("add d7 2").unwrap_err();
        assert_eq!(err.to_string(), "unknown die kind: d7");
    }

    #[test]
    fn add_bad_count() {
        let mut s = test_session();
        let err = s.process("add d6 lots").unwrap_err();
        assert_eq!(err.to_string(), "invalid count: lots");
    }

    #[test]
    fn add_requires_arguments() {
        let mut s = test_session();
        let err = s.process("add").unwrap_err();
        assert!(err.to_string().contains("usage: add"));
    }

    #[test]
    fn add_respects_per_kind_limit() {
        let mut s = test_session();
        s.process("add d6 90").unwrap();
        let err = s.process("add d6 20").unwrap_err();
        assert_eq!(err.to_string(), "too many dice: at most 100 d6 in the pool");
        assert_eq!(s.pool().count_of(DieKind::D6), 90);
        s.process("add d6 10").unwrap();
        assert_eq!(s.pool().count_of(DieKind::D6), 100);
    }

    #[test]
    fn drop_dice() {
        let mut s = test_session();
        s.process("add d6 3").unwrap();
        assert_eq!(s.process("drop d6").unwrap(), "Dropped 1xd6 (d6: 2 loaded)");
        assert_eq!(
            s.process("drop d6 10").unwrap(),
            "Dropped 10xd6 (d6: 0 loaded)"
        );
    }

    #[test]
    fn clear_one_kind() {
        let mut s = test_session();
        s.process("add d6 3").unwrap();
        s.process("add d20 1").unwrap();
        assert_eq!(s.process("clear d6").unwrap(), "d6 reset to 0");
        assert_eq!(s.pool().count_of(DieKind::D6), 0);
        assert_eq!(s.pool().count_of(DieKind::D20), 1);
    }

    #[test]
    fn clear_all_and_reset() {
        let mut s = scripted_session(&[3, 5]);
        s.process("add d6 2").unwrap();
        s.process("roll").unwrap();
        s.process("select 1").unwrap();
        assert_eq!(s.process("clear all").unwrap(), "All dice cleared");
        assert_eq!(s.pool().total_dice_count(), 0);
        assert_eq!(s.pool().selected_count(), 0);
        assert_eq!(s.process("reset").unwrap(), "All dice cleared");
    }

    #[test]
    fn clear_requires_target() {
        let mut s = test_session();
        assert!(s.process("clear").is_err());
    }

    #[test]
    fn roll_requires_dice() {
        let mut s = test_session();
        let err = s.process("roll").unwrap_err();
        assert_eq!(err.to_string(), "no dice to roll; add some first");
    }

    #[test]
    fn roll_renders_results() {
        let mut s = scripted_session(&[3, 5, 17]);
        s.process("add d6 2").unwrap();
        s.process("add d20 1").unwrap();
        let out = s.process("roll").unwrap();
        assert!(out.starts_with("Rolled 3 dice:"));
        assert!(out.contains("#1 d6: 3"));
        assert!(out.contains("#2 d6: 5"));
        assert!(out.contains("#3 d20: 17"));
        assert!(out.contains("2d6 total: 8"));
        assert!(out.contains("1d20 total: 17"));
        assert!(out.contains("Grand Total: 25"));
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn select_toggles() {
        let mut s = scripted_session(&[3, 5]);
        s.process("add d6 2").unwrap();
        s.process("roll").unwrap();
        assert_eq!(s.process("select 1").unwrap(), "Selected #1 (1 selected)");
        assert_eq!(s.process("select #1").unwrap(), "Deselected #1 (0 selected)");
        assert_eq!(s.process("sel 2").unwrap(), "Selected #2 (1 selected)");
    }

    #[test]
    fn select_marks_die_in_show() {
        let mut s = scripted_session(&[3, 5]);
        s.process("add d6 2").unwrap();
        s.process("roll").unwrap();
        s.process("select 2").unwrap();
        let out = s.process("show").unwrap();
        assert!(out.contains("#2 d6: 5 *"));
        assert!(!out.contains("#1 d6: 3 *"));
    }

    #[test]
    fn select_bad_id() {
        let mut s = test_session();
        let err = s.process("select x").unwrap_err();
        assert_eq!(err.to_string(), "invalid die id: x");
    }

    #[test]
    fn select_removed_die_errors() {
        let mut s = scripted_session(&[3]);
        s.process("add d6 1").unwrap();
        s.process("roll").unwrap();
        s.process("select 1").unwrap();
        s.process("remove").unwrap();
        let err = s.process("select 1").unwrap_err();
        assert_eq!(err.to_string(), "invalid choice: die #1 has been removed");
    }

    #[test]
    fn reroll_requires_selection() {
        let mut s = test_session();
        let err = s.process("reroll").unwrap_err();
        assert_eq!(err.to_string(), "no dice selected to reroll");
    }

    #[test]
    fn reroll_flow() {
        let mut s = scripted_session(&[3, 5, 6]);
        s.process("add d6 2").unwrap();
        s.process("roll").unwrap();
        s.process("select 1").unwrap();
        let out = s.process("reroll").unwrap();
        assert!(out.starts_with("Selected dice rerolled:"));
        assert!(out.contains("#1 d6: 6"));
        assert!(out.contains("#2 d6: 5"));
        assert!(out.contains("Grand Total: 11"));
        assert_eq!(s.pool().selected_count(), 0);
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn remove_requires_selection() {
        let mut s = test_session();
        let err = s.process("remove").unwrap_err();
        assert_eq!(err.to_string(), "no dice selected to remove");
    }

    #[test]
    fn remove_flow() {
        let mut s = scripted_session(&[3, 5]);
        s.process("add d6 2").unwrap();
        s.process("roll").unwrap();
        s.process("select 2").unwrap();
        let out = s.process("remove").unwrap();
        assert!(out.starts_with("Selected dice removed:"));
        assert!(out.contains("#1 d6: 3"));
        assert!(!out.contains("#2"));
        assert!(out.contains("1d6 total: 3"));
        assert!(out.contains("Grand Total: 3"));
        // Loaded count is untouched by removal.
        assert_eq!(s.pool().count_of(DieKind::D6), 2);
    }

    #[test]
    fn show_hides_removed_dice() {
        let mut s = scripted_session(&[3, 5]);
        s.process("add d6 2").unwrap();
        s.process("roll").unwrap();
        s.process("select 1").unwrap();
        s.process("remove").unwrap();
        let out = s.process("show").unwrap();
        assert!(!out.contains("#1"));
        assert!(out.contains("#2 d6: 5"));
    }

    #[test]
    fn show_without_results() {
        let mut s = test_session();
        assert_eq!(s.process("show").unwrap(), "No results yet. Try 'roll'.");
    }

    #[test]
    fn total_shows_per_kind_and_grand() {
        let mut s = scripted_session(&[3, 5, 17]);
        s.process("add d6 2").unwrap();
        s.process("add d20 1").unwrap();
        s.process("roll").unwrap();
        let out = s.process("total").unwrap();
        assert_eq!(out, "2d6 total: 8\n1d20 total: 17\nGrand Total: 25");
    }

    #[test]
    fn stats_over_live_dice() {
        let mut s = scripted_session(&[3, 5]);
        s.process("add d6 2").unwrap();
        s.process("roll").unwrap();
        let out = s.process("stats").unwrap();
        assert_eq!(out, "2 dice: sum 8, mean 4.00, median 4.0, min 3, max 5");
    }

    #[test]
    fn stats_without_results() {
        let mut s = test_session();
        assert_eq!(s.process("stats").unwrap(), "No dice to summarize.");
    }

    #[test]
    fn history_shows_recent_events() {
        let mut s = scripted_session(&[3, 5]);
        s.process("add d6 2").unwrap();
        s.process("roll").unwrap();
        s.process("clear all").unwrap();
        let out = s.process("history").unwrap();
        assert!(out.starts_with("History (2 entries, showing last 2):"));
        assert!(out.contains("Roll: grand total 8"));
        assert!(out.contains("Cleared: all"));
    }

    #[test]
    fn history_empty() {
        let mut s = test_session();
        assert_eq!(s.process("history").unwrap(), "History is empty.");
    }

    #[test]
    fn export_formats() {
        let mut s = scripted_session(&[3, 5]);
        s.process("add d6 2").unwrap();
        s.process("roll").unwrap();
        assert!(s.process("export").unwrap().contains("# Roll History"));
        assert!(s.process("export md").unwrap().contains("# Roll History"));
        assert!(s.process("export text").unwrap().contains("============"));
        let err = s.process("export pdf").unwrap_err();
        assert!(err.to_string().contains("unknown format 'pdf'"));
    }

    #[test]
    fn dice_lists_kinds() {
        let mut s = test_session();
        assert_eq!(
            s.process("dice").unwrap(),
            "Supported dice: d2, d4, d6, d8, d10, d12, d20, d100"
        );
    }

    #[test]
    fn help_commands() {
        let mut s = test_session();
        let help = s.process("help").unwrap();
        assert!(help.contains("Dice Pool Commands"));
        let help = s.process("help select").unwrap();
        assert!(help.contains("Removed dice"));
    }

    #[test]
    fn unknown_command_suggests() {
        let mut s = test_session();
        let err = s.process("rolll").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown command: rolll (did you mean 'roll'?)"
        );
    }

    #[test]
    fn unknown_command_without_suggestion() {
        let mut s = test_session();
        let err = s.process("xyzzy").unwrap_err();
        assert_eq!(err.to_string(), "unknown command: xyzzy");
    }

    #[test]
    fn quit() {
        let mut s = test_session();
        assert_eq!(s.process("quit").unwrap(), "Goodbye!");
        assert_eq!(s.process("q").unwrap(), "Goodbye!");
    }

    #[test]
    fn empty_input() {
        let mut s = test_session();
        assert!(s.process("").unwrap().is_empty());
        assert!(s.process("   ").unwrap().is_empty());
    }

    #[test]
    fn stale_selection_reroll_after_new_roll() {
        let mut s = scripted_session(&[2, 4, 6]);
        s.process("add d6 1").unwrap();
        s.process("roll").unwrap();
        s.process("select 1").unwrap();
        // A new roll keeps the selection but replaces every die.
        s.process("roll").unwrap();
        assert_eq!(s.pool().selected_count(), 1);
        let out = s.process("reroll").unwrap();
        // Nothing live was selected, so values stay as rolled.
        assert!(out.contains("#2 d6: 4"));
        assert_eq!(s.pool().selected_count(), 0);
    }
}
