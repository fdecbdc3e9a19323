//! Mistake aggregation for the review note.

use serde::{Deserialize, Serialize};

use crate::grading::GradingResult;

/// Shown in place of an empty submission.
pub const NOT_ENTERED: &str = "(미입력)";

/// One wrong answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub submitted: String,
    pub expected: String,
}

/// Wrong answers sharing a reference label, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewGroup {
    pub reference: String,
    pub entries: Vec<ReviewEntry>,
}

/// Outcome of aggregating a grading run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "groups", rename_all = "kebab-case")]
pub enum Review {
    /// No results were given to aggregate.
    NothingGraded,
    /// Every slot was answered correctly.
    NoMistakes,
    /// Groups in first-seen reference order.
    Mistakes(Vec<ReviewGroup>),
}

impl Review {
    pub fn groups(&self) -> &[ReviewGroup] {
        match self {
            Review::Mistakes(groups) => groups,
            _ => &[],
        }
    }

    /// Total number of wrong answers across all groups.
    pub fn mistake_count(&self) -> usize {
        self.groups().iter().map(|g| g.entries.len()).sum()
    }

    /// Render the review note as markdown.
    pub fn to_markdown(&self) -> String {
        match self {
            Review::NothingGraded => "Nothing graded yet.\n".to_string(),
            Review::NoMistakes => "**Perfect!** No mistakes.\n".to_string(),
            Review::Mistakes(groups) => {
                let mut md = String::new();
                md.push_str(&format!(
                    "**Review:** {} mistake(s) in {} reference(s)\n\n",
                    self.mistake_count(),
                    groups.len()
                ));
                for group in groups {
                    md.push_str(&format!("### {}\n\n", group.reference));
                    md.push_str("| Your answer | Expected |\n");
                    md.push_str("|-------------|----------|\n");
                    for entry in &group.entries {
                        md.push_str(&format!(
                            "| ~~{}~~ | **{}** |\n",
                            escape_cell(&entry.submitted),
                            escape_cell(&entry.expected)
                        ));
                    }
                    md.push('\n');
                }
                md
            }
        }
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Group incorrect results by reference label.
///
/// Group order follows the first wrong answer seen for each reference, and
/// entries keep submission order. Empty submissions are reported as
/// [`NOT_ENTERED`].
pub fn aggregate(results: &[GradingResult]) -> Review {
    if results.is_empty() {
        return Review::NothingGraded;
    }

    let mut groups: Vec<ReviewGroup> = Vec::new();
    for result in results.iter().filter(|r| !r.correct) {
        let entry = ReviewEntry {
            submitted: if result.submitted.trim().is_empty() {
                NOT_ENTERED.to_string()
            } else {
                result.submitted.clone()
            },
            expected: result.expected.clone(),
        };
        match groups.iter_mut().find(|g| g.reference == result.reference) {
            Some(group) => group.entries.push(entry),
            None => groups.push(ReviewGroup {
                reference: result.reference.clone(),
                entries: vec![entry],
            }),
        }
    }

    if groups.is_empty() {
        Review::NoMistakes
    } else {
        Review::Mistakes(groups)
    }
}
