//! Quiz sessions and grade reports with JSON persistence.
//!
//! A session is built once per generation request and never mutated. Grading
//! reads it and produces a fresh [`GradeReport`]; reshuffling builds a new
//! session instead of touching the old one.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GradingError;
use crate::grading::{self, GradingPolicy, GradingResult};
use crate::model::{AnswerSlot, QuizItem, UnitKind};
use crate::review::{self, Review};

/// A verse that was left out of the quiz, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedVerse {
    /// 1-based line number within the unit.
    pub line: usize,
    pub reason: String,
}

/// One generated quiz: items for display plus the parallel answer list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// When the session was generated.
    pub created_at: DateTime<Utc>,
    pub unit_id: String,
    pub unit_name: String,
    pub kind: UnitKind,
    /// Normalization used when this session is graded.
    pub policy: GradingPolicy,
    /// Items in rendering order.
    pub items: Vec<QuizItem>,
    /// Answer slots in rendering order across all items.
    pub answers: Vec<AnswerSlot>,
    /// Verses dropped during generation.
    #[serde(default)]
    pub skipped: Vec<SkippedVerse>,
}

impl QuizSession {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.answers.len()
    }

    /// Grade with the session's own policy.
    pub fn grade(&self, submissions: &[String]) -> Result<GradeReport, GradingError> {
        self.grade_with(submissions, &self.policy)
    }

    /// Grade with an explicit policy.
    pub fn grade_with(
        &self,
        submissions: &[String],
        policy: &GradingPolicy,
    ) -> Result<GradeReport, GradingError> {
        let results = grading::grade(&self.answers, submissions, policy)?;
        let correct = results.iter().filter(|r| r.correct).count();
        let total = results.len();

        Ok(GradeReport {
            session_id: self.id,
            unit_name: self.unit_name.clone(),
            policy: *policy,
            score: grading::score(correct, total),
            correct,
            total,
            results,
        })
    }

    /// Save the session as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize session")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session to {}", path.display()))?;
        Ok(())
    }

    /// Load a session from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session from {}", path.display()))?;
        let session: QuizSession =
            serde_json::from_str(&content).context("failed to parse session JSON")?;
        Ok(session)
    }
}

/// Outcome of grading one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    pub session_id: Uuid,
    pub unit_name: String,
    pub policy: GradingPolicy,
    /// Percentage score, 0 to 100.
    pub score: u32,
    pub correct: usize,
    pub total: usize,
    /// Per-slot results in slot order.
    pub results: Vec<GradingResult>,
}

impl GradeReport {
    /// Wrong answers grouped by reference.
    pub fn review(&self) -> Review {
        review::aggregate(&self.results)
    }

    /// The score and unit label handed to the ranking service.
    pub fn score_card(&self) -> ScoreCard {
        ScoreCard {
            unit: self.unit_name.clone(),
            score: self.score,
        }
    }
}

/// Score hand-off for the ranking collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub unit: String,
    pub score: u32,
}

impl ScoreCard {
    /// Save the score card as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize score card")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write score card to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fragment, QuizMode};

    fn make_session() -> QuizSession {
        let items = vec![
            QuizItem {
                number: 1,
                reference: "1:1".into(),
                mode: QuizMode::PartialBlank,
                fragments: vec![
                    Fragment::Text {
                        text: "예수 ".into(),
                    },
                    Fragment::Slot { index: 0 },
                    Fragment::Text {
                        text: " 계시라".into(),
                    },
                ],
                hint: "예수 그리스도의 계시라".into(),
            },
            QuizItem {
                number: 2,
                reference: "1:3".into(),
                mode: QuizMode::WholeVerse,
                fragments: vec![Fragment::Slot { index: 1 }],
                hint: "때가 가까움이라".into(),
            },
        ];
        let answers = vec![
            AnswerSlot {
                index: 0,
                item: 1,
                reference: "1:1".into(),
                expected: "그리스도의".into(),
            },
            AnswerSlot {
                index: 1,
                item: 2,
                reference: "1:3".into(),
                expected: "때가 가까움이라".into(),
            },
        ];
        QuizSession {
            id: Uuid::nil(),
            created_at: Utc::now(),
            unit_id: "rev-01".into(),
            unit_name: "계시록 1장".into(),
            kind: UnitKind::Verses,
            policy: GradingPolicy::standard(),
            items,
            answers,
            skipped: vec![],
        }
    }

    #[test]
    fn grade_scores_and_reviews() {
        let session = make_session();
        let report = session
            .grade(&["그리스도의".to_string(), String::new()])
            .unwrap();
        assert_eq!(report.correct, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.score, 50);

        let review = report.review();
        assert_eq!(review.groups().len(), 1);
        assert_eq!(review.groups()[0].reference, "1:3");
        assert_eq!(
            report.score_card(),
            ScoreCard {
                unit: "계시록 1장".into(),
                score: 50
            }
        );
    }

    #[test]
    fn grade_with_overrides_policy() {
        let session = make_session();
        let subs = vec!["그리스도의".to_string(), "때가가까움이라".to_string()];
        assert_eq!(session.grade(&subs).unwrap().score, 50);
        let report = session
            .grade_with(&subs, &GradingPolicy::ignore_spaces())
            .unwrap();
        assert_eq!(report.score, 100);
        assert_eq!(report.review(), Review::NoMistakes);
    }

    #[test]
    fn grade_rejects_wrong_submission_count() {
        let session = make_session();
        assert!(session.grade(&["하나".to_string()]).is_err());
    }

    #[test]
    fn json_roundtrip() {
        let session = make_session();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session.json");

        session.save_json(&path).unwrap();
        let loaded = QuizSession::load_json(&path).unwrap();

        assert_eq!(loaded.unit_id, "rev-01");
        assert_eq!(loaded.items, session.items);
        assert_eq!(loaded.answers, session.answers);
        assert_eq!(loaded.policy, GradingPolicy::standard());
    }

    #[test]
    fn load_missing_session_fails() {
        assert!(QuizSession::load_json(Path::new("no/such/session.json")).is_err());
    }
}
