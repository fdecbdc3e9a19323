//! The `recite grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use recite_core::{GradeReport, GradingPolicy, QuizSession, Review};

/// JSON output: the report plus its review note.
#[derive(Serialize)]
struct GradeOutput<'a> {
    #[serde(flatten)]
    report: &'a GradeReport,
    review: Review,
}

pub fn execute(
    session_path: PathBuf,
    answers_path: PathBuf,
    ignore_spaces: bool,
    format: String,
    score_card: Option<PathBuf>,
) -> Result<()> {
    let session = QuizSession::load_json(&session_path)?;
    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let submissions: Vec<String> = content.lines().map(str::to_string).collect();

    let policy = if ignore_spaces && session.policy.allows_space_toggle() {
        GradingPolicy::ignore_spaces()
    } else {
        if ignore_spaces {
            tracing::warn!("--ignore-spaces has no effect on {} sessions", session.kind);
        }
        session.policy
    };

    let report = session.grade_with(&submissions, &policy).map_err(|e| {
        let needed = e.expected_len();
        anyhow::Error::new(e).context(format!(
            "{} needs {needed} answer lines, one per blank",
            answers_path.display()
        ))
    })?;
    let review = report.review();

    match format.as_str() {
        "markdown" | "md" => {
            println!(
                "## {}: {} ({}/{})\n",
                report.unit_name, report.score, report.correct, report.total
            );
            print!("{}", review.to_markdown());
        }
        "json" => {
            let output = GradeOutput {
                report: &report,
                review,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!(
                "Score: {} ({}/{} correct)",
                report.score, report.correct, report.total
            );
            print_review(&review);
        }
    }

    if let Some(path) = score_card {
        report.score_card().save_json(&path)?;
        eprintln!("Score card saved to: {}", path.display());
    }

    Ok(())
}

fn print_review(review: &Review) {
    use comfy_table::{Cell, Table};

    match review {
        Review::NothingGraded => println!("\nNothing to grade."),
        Review::NoMistakes => println!("\nPerfect! No mistakes."),
        Review::Mistakes(groups) => {
            let mut table = Table::new();
            table.set_header(vec!["Reference", "Your answer", "Expected"]);

            for group in groups {
                for entry in &group.entries {
                    table.add_row(vec![
                        Cell::new(&group.reference),
                        Cell::new(&entry.submitted),
                        Cell::new(&entry.expected),
                    ]);
                }
            }

            println!("\nReview ({} mistakes):\n{table}", review.mistake_count());
        }
    }
}
