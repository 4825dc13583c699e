use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use wb_engine::{RollStats, Snapshot};

pub fn run(specs: &[String], seed: Option<u64>, stats: bool, json: bool) -> Result<(), String> {
    let mut pool = super::load_pool(specs, seed)?;
    let snapshot = pool.roll_all();

    if json {
        let rendered = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| format!("JSON export failed: {e}"))?;
        println!("{rendered}");
        return Ok(());
    }

    if snapshot.is_empty() {
        println!("  {}", "(no dice rolled)".dimmed());
        return Ok(());
    }

    let dice_rolled = snapshot.live_values().len();
    let note = match seed {
        Some(seed) => format!("({dice_rolled} dice, seed={seed})"),
        None => format!("({dice_rolled} dice)"),
    };
    println!("  {} {}", "Roll".bold(), note.dimmed());
    println!();

    println!("{}", render_table(&snapshot));
    println!();
    println!("  {} {}", "Grand Total:".bold(), snapshot.grand_total);

    if stats && let Some(summary) = RollStats::from_snapshot(&snapshot) {
        println!("  {}", summary.to_string().dimmed());
    }

    Ok(())
}

fn render_table(snapshot: &Snapshot) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Die", "Rolls", "Total"]);

    for summary in &snapshot.by_kind {
        let values: Vec<String> = summary
            .live_values()
            .iter()
            .map(ToString::to_string)
            .collect();
        table.add_row(vec![
            format!("{}{}", summary.count, summary.kind),
            values.join(", "),
            summary.total.to_string(),
        ]);
    }

    table
}
