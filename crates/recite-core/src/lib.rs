//! recite-core: blank selection, grading, and review aggregation.
//!
//! This crate turns units of verses (or prepared worksheets) into fill-in-
//! the-blank quiz sessions, grades submitted answers, and groups mistakes
//! for review. Everything is synchronous; randomness is injected by the
//! caller so sessions can be reproduced from a seed.

pub mod assembler;
pub mod chunker;
pub mod config;
pub mod error;
pub mod extract;
pub mod grading;
pub mod model;
pub mod parser;
pub mod review;
pub mod selector;
pub mod session;
pub mod tokenizer;
pub mod verse;
pub mod worksheet;

pub use assembler::QuizAssembler;
pub use config::QuizConfig;
pub use error::{GradingError, VerseError};
pub use grading::{GradingPolicy, GradingResult, LiveStatus};
pub use model::{AnswerSlot, Chunk, Fragment, QuizItem, QuizMode, Unit, UnitKind, Verse};
pub use review::{Review, ReviewGroup};
pub use session::{GradeReport, QuizSession, ScoreCard};
