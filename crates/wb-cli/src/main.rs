//! CLI frontend for the Würfelbecher dice-rolling engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wb",
    about = "Würfelbecher — a dice pool and roll-resolution engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a pool of dice once and print the results
    Roll {
        /// Dice to roll, as `<die>` or `<count>x<die>` (e.g. d20, 2xd6)
        #[arg(required = true)]
        dice: Vec<String>,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Also print summary statistics for the roll
        #[arg(long)]
        stats: bool,

        /// Print the roll as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive rolling session
    Play {
        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// List the supported die kinds
    Dice,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            dice,
            seed,
            stats,
            json,
        } => commands::roll::run(&dice, seed, stats, json),
        Commands::Play { seed } => commands::play::run(seed),
        Commands::Dice => commands::dice::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
