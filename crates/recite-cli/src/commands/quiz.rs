//! The `recite quiz` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use recite_core::config::load_config_from;
use recite_core::parser;
use recite_core::{Fragment, QuizAssembler, QuizItem, QuizMode, QuizSession};

pub fn execute(
    unit_path: PathBuf,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let unit = parser::parse_unit(&unit_path)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let assembler = QuizAssembler::new(config);
    let session = assembler.assemble(&unit, &mut rng);
    tracing::info!(
        "generated session {} for {} ({} of at most {} items)",
        session.id,
        unit.id,
        session.items.len(),
        assembler.config().item_cap
    );

    print_session(&session);

    if let Some(path) = output {
        session.save_json(&path)?;
        eprintln!("Session saved to: {}", path.display());
    }

    Ok(())
}

fn print_session(session: &QuizSession) {
    println!(
        "{} ({}, {} items, {} blanks)",
        session.unit_name,
        session.kind,
        session.items.len(),
        session.slot_count()
    );

    if session.is_empty() {
        println!("\nNo quiz items could be generated.");
    }

    for item in &session.items {
        println!("\n{}. [{}] {}", item.number, item.reference, render(item));
    }

    if !session.skipped.is_empty() {
        println!();
        for skipped in &session.skipped {
            println!("Skipped line {}: {}", skipped.line, skipped.reason);
        }
    }
}

/// Render an item with numbered blanks, e.g. `예수 (1)______ 계시라`.
fn render(item: &QuizItem) -> String {
    let mut out = String::new();
    for fragment in &item.fragments {
        match fragment {
            Fragment::Text { text } => out.push_str(text),
            Fragment::Slot { index } => out.push_str(&format!("({})______", index + 1)),
            Fragment::Break => out.push_str("\n   "),
        }
    }
    if item.mode == QuizMode::WholeVerse {
        out.push_str("  (whole verse)");
    }
    out
}
