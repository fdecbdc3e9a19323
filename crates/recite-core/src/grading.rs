//! Grading engine: answer normalization, per-slot comparison, and scoring.
//!
//! Grading is deterministic. The same expected text, submission, and policy
//! always give the same verdict.

use serde::{Deserialize, Serialize};

use crate::error::GradingError;
use crate::model::AnswerSlot;

/// Historical spellings rewritten to their modern form before comparison.
pub const SPELLING_FIXES: &[(&str, &str)] = &[("찌어다", "지어다")];

/// How internal whitespace is treated when comparing answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespaceMode {
    /// Runs of whitespace become a single space.
    Collapse,
    /// All whitespace is removed.
    Ignore,
    /// Whitespace is compared as written.
    Preserve,
}

/// The normalization applied to both sides of every comparison in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingPolicy {
    pub whitespace: WhitespaceMode,
    /// Apply [`SPELLING_FIXES`].
    pub spelling_fixes: bool,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl GradingPolicy {
    /// Spelling fixes on, whitespace runs collapsed.
    pub fn standard() -> Self {
        Self {
            whitespace: WhitespaceMode::Collapse,
            spelling_fixes: true,
        }
    }

    /// Spelling fixes on, whitespace removed.
    pub fn ignore_spaces() -> Self {
        Self {
            whitespace: WhitespaceMode::Ignore,
            spelling_fixes: true,
        }
    }

    /// Trim only. Used for worksheets, where the answer must match exactly.
    pub fn strict() -> Self {
        Self {
            whitespace: WhitespaceMode::Preserve,
            spelling_fixes: false,
        }
    }

    /// Standard or ignore-space policy, from the session setting.
    pub fn from_ignore_spaces(ignore_spaces: bool) -> Self {
        if ignore_spaces {
            Self::ignore_spaces()
        } else {
            Self::standard()
        }
    }

    /// Whether the user may toggle ignore-space mode under this policy.
    pub fn allows_space_toggle(&self) -> bool {
        self.whitespace != WhitespaceMode::Preserve
    }
}

/// Normalize an answer for comparison.
///
/// Whitespace is settled before spelling fixes run.
pub fn normalize(text: &str, policy: &GradingPolicy) -> String {
    let t = text.trim();
    let mut t = match policy.whitespace {
        WhitespaceMode::Collapse => t.split_whitespace().collect::<Vec<_>>().join(" "),
        WhitespaceMode::Ignore => t.chars().filter(|c| !c.is_whitespace()).collect(),
        WhitespaceMode::Preserve => t.to_string(),
    };
    if policy.spelling_fixes {
        for &(old, new) in SPELLING_FIXES {
            if t.contains(old) {
                t = t.replace(old, new);
            }
        }
    }
    t
}

/// Compare one submission against its expected text.
///
/// A submission that normalizes to nothing is never correct.
pub fn is_correct(expected: &str, submitted: &str, policy: &GradingPolicy) -> bool {
    let submitted = normalize(submitted, policy);
    !submitted.is_empty() && submitted == normalize(expected, policy)
}

/// Per-slot grading outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    /// Session-wide slot index.
    pub slot: usize,
    /// Reference label of the owning item.
    pub reference: String,
    /// Expected text, verbatim.
    pub expected: String,
    /// Submitted text, trimmed.
    pub submitted: String,
    /// Whether the normalized texts matched.
    pub correct: bool,
}

/// Grade submissions against the session's answer slots, index for index.
pub fn grade(
    slots: &[AnswerSlot],
    submissions: &[String],
    policy: &GradingPolicy,
) -> Result<Vec<GradingResult>, GradingError> {
    if slots.len() != submissions.len() {
        return Err(GradingError::LengthMismatch {
            slots: slots.len(),
            submissions: submissions.len(),
        });
    }

    Ok(slots
        .iter()
        .zip(submissions)
        .map(|(slot, submitted)| GradingResult {
            slot: slot.index,
            reference: slot.reference.clone(),
            expected: slot.expected.clone(),
            submitted: submitted.trim().to_string(),
            correct: is_correct(&slot.expected, submitted, policy),
        })
        .collect())
}

/// Percentage score rounded to the nearest integer; 0 when nothing was graded.
pub fn score(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// As-you-type feedback for a partially entered answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiveStatus {
    /// Nothing typed yet.
    Empty,
    /// The input is a prefix of the expected answer.
    OnTrack,
    /// The input has diverged from the expected answer.
    Off,
}

/// Check a partial input against the expected answer by prefix.
pub fn live_status(expected: &str, partial: &str, ignore_spaces: bool) -> LiveStatus {
    if partial.is_empty() {
        return LiveStatus::Empty;
    }
    let on_track = if ignore_spaces {
        let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        strip(expected).starts_with(&strip(partial))
    } else {
        expected.starts_with(partial)
    };
    if on_track {
        LiveStatus::OnTrack
    } else {
        LiveStatus::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(index: usize, reference: &str, expected: &str) -> AnswerSlot {
        AnswerSlot {
            index,
            item: 1,
            reference: reference.into(),
            expected: expected.into(),
        }
    }

    #[test]
    fn ignore_space_mode_accepts_missing_space() {
        let policy = GradingPolicy::ignore_spaces();
        assert!(is_correct("하나님 말씀", "하나님말씀", &policy));
    }

    #[test]
    fn default_mode_keeps_a_single_space() {
        let policy = GradingPolicy::standard();
        assert!(!is_correct("하나님 말씀", "하나님말씀", &policy));
        assert!(is_correct("하나님 말씀", "  하나님   말씀 ", &policy));
    }

    #[test]
    fn empty_never_matches_empty() {
        for policy in [
            GradingPolicy::standard(),
            GradingPolicy::ignore_spaces(),
            GradingPolicy::strict(),
        ] {
            assert!(!is_correct("", "", &policy));
            assert!(!is_correct("   ", " ", &policy));
        }
    }

    #[test]
    fn spelling_fix_applies_to_both_sides() {
        let policy = GradingPolicy::standard();
        assert!(is_correct("볼찌어다", "볼지어다", &policy));
        assert!(is_correct("볼지어다", "볼찌어다", &policy));
        assert!(!is_correct("볼찌어다", "볼지어다", &GradingPolicy::strict()));
    }

    #[test]
    fn spelling_fix_sees_through_removed_spaces() {
        let policy = GradingPolicy::ignore_spaces();
        assert_eq!(normalize("볼찌 어다", &policy), "볼지어다");
        assert!(is_correct("볼지어다", "볼찌 어다", &policy));
        assert!(is_correct("볼찌 어다 내가", "볼지어다내가", &policy));
        assert!(!is_correct("볼지어다", "볼찌 어다", &GradingPolicy::standard()));
    }

    #[test]
    fn strict_mode_only_trims() {
        let policy = GradingPolicy::strict();
        assert!(is_correct("일곱 별", " 일곱 별 ", &policy));
        assert!(!is_correct("일곱 별", "일곱  별", &policy));
        assert!(!policy.allows_space_toggle());
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = ["  볼찌어다   내가  ", "볼찌 어다", "a\t b\n c", "", "하나님 말씀"];
        for policy in [
            GradingPolicy::standard(),
            GradingPolicy::ignore_spaces(),
            GradingPolicy::strict(),
        ] {
            for s in samples {
                let once = normalize(s, &policy);
                assert_eq!(normalize(&once, &policy), once);
            }
        }
    }

    #[test]
    fn score_rounds_to_percent() {
        assert_eq!(score(3, 5), 60);
        assert_eq!(score(0, 0), 0);
        assert_eq!(score(2, 3), 67);
        assert_eq!(score(1, 3), 33);
        assert_eq!(score(5, 5), 100);
    }

    #[test]
    fn grade_rejects_length_mismatch() {
        let slots = vec![slot(0, "1:1", "a"), slot(1, "1:2", "b")];
        let err = grade(&slots, &["a".to_string()], &GradingPolicy::standard()).unwrap_err();
        assert_eq!(
            err,
            GradingError::LengthMismatch {
                slots: 2,
                submissions: 1
            }
        );
    }

    #[test]
    fn grade_aligns_by_index() {
        let slots = vec![slot(0, "1:1", "일곱 교회"), slot(1, "1:2", "증거")];
        let subs = vec!["일곱 교회 ".to_string(), "증언".to_string()];
        let results = grade(&slots, &subs, &GradingPolicy::standard()).unwrap();
        assert!(results[0].correct);
        assert_eq!(results[0].submitted, "일곱 교회");
        assert!(!results[1].correct);
        assert_eq!(results[1].reference, "1:2");
    }

    #[test]
    fn grading_is_repeatable() {
        let slots = vec![slot(0, "1:1", "일곱 금 촛대")];
        let subs = vec!["일곱금촛대".to_string()];
        let policy = GradingPolicy::ignore_spaces();
        assert_eq!(
            grade(&slots, &subs, &policy).unwrap(),
            grade(&slots, &subs, &policy).unwrap()
        );
    }

    #[test]
    fn live_status_tracks_prefix() {
        assert_eq!(live_status("일곱 별", "", false), LiveStatus::Empty);
        assert_eq!(live_status("일곱 별", "일곱 ", false), LiveStatus::OnTrack);
        assert_eq!(live_status("일곱 별", "일곱별", false), LiveStatus::Off);
        assert_eq!(live_status("일곱 별", "일곱별", true), LiveStatus::OnTrack);
        assert_eq!(live_status("일곱 별", "여덟", true), LiveStatus::Off);
    }
}
