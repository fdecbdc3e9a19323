//! Core data model types for recite.
//!
//! These are the types every pipeline stage passes around: parsed verses,
//! units of verses, the chunks a verse is cut into, and the quiz items and
//! answer slots handed to the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single parsed verse: its reference label and body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Reference label, e.g. "3:5", or a positional label for untagged lines.
    pub reference: String,
    /// Body text with the tag removed. `{}` markup is kept.
    pub body: String,
    /// Whether the reference came from a tag in the source line.
    pub tagged: bool,
}

/// A merged run of one or more tokens; the unit of blank selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Display text, exactly as it appears in the cleaned verse.
    pub text: String,
    /// Whether this chunk may be turned into a blank.
    pub eligible: bool,
    /// Position of the chunk within its verse.
    pub position: usize,
    /// Whether the chunk is separated from the previous one by a space.
    pub space_before: bool,
}

/// How a quiz item asks for its verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    /// The whole verse is a single answer.
    WholeVerse,
    /// Selected chunks are blanked out of the displayed verse.
    PartialBlank,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::WholeVerse => write!(f, "whole-verse"),
            QuizMode::PartialBlank => write!(f, "partial-blank"),
        }
    }
}

/// One renderable piece of a quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Fragment {
    /// Literal display text, including any separating spaces.
    Text { text: String },
    /// Placeholder for the answer slot with this session-wide index.
    Slot { index: usize },
    /// Line boundary inside a multi-line item.
    Break,
}

/// One quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// 1-based question number in rendering order.
    pub number: usize,
    /// Reference label shown next to the question.
    pub reference: String,
    /// Whole-verse or partial-blank.
    pub mode: QuizMode,
    /// Fragments in rendering order.
    pub fragments: Vec<Fragment>,
    /// The full answer text, shown when the user asks for a hint.
    pub hint: String,
}

impl QuizItem {
    /// Session-wide indices of the slots in this item, left to right.
    pub fn slot_indices(&self) -> Vec<usize> {
        self.fragments
            .iter()
            .filter_map(|f| match f {
                Fragment::Slot { index } => Some(*index),
                _ => None,
            })
            .collect()
    }
}

/// The authoritative expected answer for one blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSlot {
    /// Session-wide slot index; defines grading order.
    pub index: usize,
    /// Number of the owning quiz item.
    pub item: usize,
    /// Reference label used to group mistakes for review.
    pub reference: String,
    /// Expected text, verbatim and never empty.
    pub expected: String,
}

/// What a unit file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// A chapter of verse lines, quizzed with randomized blanks.
    Verses,
    /// A prepared worksheet with inline `(answer)` blanks.
    Worksheet,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Verses => write!(f, "verses"),
            UnitKind::Worksheet => write!(f, "worksheet"),
        }
    }
}

impl FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verses" | "chapter" => Ok(UnitKind::Verses),
            "worksheet" | "weekly" => Ok(UnitKind::Worksheet),
            other => Err(format!("unknown unit kind: {other}")),
        }
    }
}

/// A quizzable unit: one chapter of verses, or one worksheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier for this unit.
    pub id: String,
    /// Display name, also handed to the ranking collaborator with the score.
    pub name: String,
    /// Verse chapter or worksheet.
    pub kind: UnitKind,
    /// Raw verse lines, for `UnitKind::Verses`.
    #[serde(default)]
    pub verses: Vec<String>,
    /// Raw worksheet text, for `UnitKind::Worksheet`.
    #[serde(default)]
    pub worksheet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_kind_display_and_parse() {
        assert_eq!(UnitKind::Verses.to_string(), "verses");
        assert_eq!("weekly".parse::<UnitKind>().unwrap(), UnitKind::Worksheet);
        assert_eq!("Chapter".parse::<UnitKind>().unwrap(), UnitKind::Verses);
        assert!("essay".parse::<UnitKind>().is_err());
    }

    #[test]
    fn slot_indices_in_render_order() {
        let item = QuizItem {
            number: 1,
            reference: "1:1".into(),
            mode: QuizMode::PartialBlank,
            fragments: vec![
                Fragment::Text { text: "a ".into() },
                Fragment::Slot { index: 3 },
                Fragment::Text { text: " b ".into() },
                Fragment::Slot { index: 4 },
            ],
            hint: String::new(),
        };
        assert_eq!(item.slot_indices(), vec![3, 4]);
    }

    #[test]
    fn fragment_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Fragment::Slot { index: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"slot","index":2}"#);
        let mode = serde_json::to_string(&QuizMode::WholeVerse).unwrap();
        assert_eq!(mode, r#""whole-verse""#);
    }
}
