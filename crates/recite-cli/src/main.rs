//! recite CLI: generate, grade, and validate recitation quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "recite", version, about = "Fill-in-the-blank scripture recitation quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a quiz session from a unit file
    Quiz {
        /// Path to a .toml unit file
        #[arg(long)]
        unit: PathBuf,

        /// Seed for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the session as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Grade answers against a saved session
    Grade {
        /// Session JSON written by `recite quiz --output`
        #[arg(long)]
        session: PathBuf,

        /// Answers file, one answer per line in slot order
        #[arg(long)]
        answers: PathBuf,

        /// Ignore all whitespace when comparing (verse sessions only)
        #[arg(long)]
        ignore_spaces: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the {unit, score} card as JSON
        #[arg(long)]
        score_card: Option<PathBuf>,
    },

    /// Validate unit TOML files
    Validate {
        /// Path to unit file or directory
        #[arg(long)]
        unit: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example unit
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("recite=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            unit,
            seed,
            config,
            output,
        } => commands::quiz::execute(unit, seed, config, output),
        Commands::Grade {
            session,
            answers,
            ignore_spaces,
            format,
            score_card,
        } => commands::grade::execute(session, answers, ignore_spaces, format, score_card),
        Commands::Validate { unit, config } => commands::validate::execute(unit, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
