//! Digit Guess - CLI
//!
//! Guess the secret 4-digit number, in a TUI or a plain console.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use digit_guess::{
    commands::{GameConfig, run_simple, score_guess},
    game::save::DEFAULT_SAVE_FILE,
    output::print_score,
};
use std::{io, path::PathBuf};

#[derive(Parser)]
#[command(
    name = "digit_guess",
    about = "Guess the secret 4-digit number before your turns run out",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File used by the save and load menu options
    #[arg(long, global = true, default_value = DEFAULT_SAVE_FILE)]
    save_file: PathBuf,

    /// Seed for the secret generator (reproducible games)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Announce game phases as turns reach milestones
    #[arg(long, global = true)]
    phases: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Plain console mode with a numbered menu
    Simple,

    /// Score a single guess against a secret
    Score {
        /// The guess, 4 digits
        guess: String,

        /// The secret, 4 digits
        secret: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = GameConfig {
        save_path: cli.save_file,
        seed: cli.seed,
        show_phases: cli.phases,
    };

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(config),
        Commands::Simple => run_simple(&config).context("console session failed"),
        Commands::Score { guess, secret } => run_score_command(&guess, &secret),
    }
}

fn run_score_command(guess: &str, secret: &str) -> Result<()> {
    let report = score_guess(guess, secret).map_err(|e| anyhow::anyhow!(e))?;

    println!(
        "{} {} against {}",
        "Guess".bold(),
        report.guess,
        report.secret
    );
    print_score(&mut io::stdout().lock(), report.score)?;
    if report.score.is_perfect() {
        println!("{}", "Exact match!".green().bold());
    }
    Ok(())
}

fn run_play_command(config: GameConfig) -> Result<()> {
    use digit_guess::interactive::{App, run_tui};

    let app = App::new(config);
    run_tui(app)
}
