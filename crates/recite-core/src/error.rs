//! Core error types.
//!
//! Verse errors are per-line and never abort a quiz generation: the assembler
//! records them and moves on. Grading errors are caller contract violations
//! and reject the whole grading call.

use thiserror::Error;

/// A raw verse line that could not be turned into a [`crate::model::Verse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerseError {
    /// Nothing left to quiz on once the tag and markup are removed.
    #[error("verse {label} has an empty body")]
    EmptyBody { label: String },

    /// The line opens with `[` but the tag is not `chapter:verse`.
    #[error("malformed reference tag: {tag:?}")]
    MalformedReference { tag: String },
}

/// Errors raised while grading a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// Submissions must line up index-for-index with the answer slots.
    #[error("expected {slots} submissions, got {submissions}")]
    LengthMismatch { slots: usize, submissions: usize },
}

impl GradingError {
    /// Number of answer slots the session expected.
    pub fn expected_len(&self) -> usize {
        match self {
            GradingError::LengthMismatch { slots, .. } => *slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_message() {
        let err = GradingError::LengthMismatch {
            slots: 4,
            submissions: 3,
        };
        assert_eq!(err.to_string(), "expected 4 submissions, got 3");
        assert_eq!(err.expected_len(), 4);
    }

    #[test]
    fn malformed_reference_message() {
        let err = VerseError::MalformedReference { tag: "[abc".into() };
        assert!(err.to_string().contains("[abc"));
    }
}
