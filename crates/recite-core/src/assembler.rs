//! Quiz assembly.
//!
//! Turns a unit into a [`QuizSession`]: verse order is shuffled, up to
//! `item_cap` verses become items, and every item's answer slots are
//! appended to one session-wide list in rendering order.

use std::collections::BTreeSet;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::config::QuizConfig;
use crate::extract::{Extractors, MarkedExtractor, PlainExtractor};
use crate::grading::GradingPolicy;
use crate::model::{AnswerSlot, Chunk, Fragment, QuizItem, QuizMode, Unit, UnitKind, Verse};
use crate::selector::select_blanks;
use crate::session::{QuizSession, SkippedVerse};
use crate::tokenizer::StopWords;
use crate::worksheet::build_worksheet;

/// Builds quiz sessions from units under one configuration.
pub struct QuizAssembler {
    config: QuizConfig,
    extractors: Extractors,
}

impl QuizAssembler {
    pub fn new(config: QuizConfig) -> Self {
        let stop_words = StopWords::with_extra(config.extra_stop_words.iter().cloned());
        let extractors = Extractors::new(
            PlainExtractor::new(stop_words, config.merge_cap),
            MarkedExtractor::new(config.short_span_chars),
        );
        Self { config, extractors }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Build a session for any kind of unit.
    pub fn assemble<R: Rng + ?Sized>(&self, unit: &Unit, rng: &mut R) -> QuizSession {
        match unit.kind {
            UnitKind::Verses => self.assemble_verses(&unit.id, &unit.name, &unit.verses, rng),
            UnitKind::Worksheet => self.assemble_worksheet(&unit.id, &unit.name, &unit.worksheet),
        }
    }

    /// Build a randomized session from raw verse lines.
    ///
    /// Malformed lines and verses without a blankable chunk are recorded in
    /// the session's skip list. A skipped verse does not count toward
    /// `item_cap`: the next shuffled verse takes its place, so more than
    /// `item_cap` verses may be visited. An empty input gives an empty
    /// session.
    pub fn assemble_verses<R: Rng + ?Sized>(
        &self,
        unit_id: &str,
        unit_name: &str,
        lines: &[String],
        rng: &mut R,
    ) -> QuizSession {
        let mut skipped = Vec::new();
        let mut verses = Vec::new();

        for (i, raw) in lines.iter().enumerate() {
            let line = i + 1;
            match Verse::parse(raw, line) {
                Ok(verse) => verses.push((line, verse)),
                Err(e) => {
                    tracing::warn!("{unit_id}: skipping line {line}: {e}");
                    skipped.push(SkippedVerse {
                        line,
                        reason: e.to_string(),
                    });
                }
            }
        }

        verses.shuffle(rng);

        let mut items = Vec::new();
        let mut answers = Vec::new();
        for (line, verse) in verses {
            if items.len() >= self.config.item_cap {
                break;
            }
            match self.build_item(&verse, items.len() + 1, &mut answers, rng) {
                Some(item) => items.push(item),
                None => {
                    tracing::warn!("{unit_id}: verse {} has no blankable chunk", verse.reference);
                    skipped.push(SkippedVerse {
                        line,
                        reason: format!("verse {} has no blankable chunk", verse.reference),
                    });
                }
            }
        }

        tracing::debug!(
            "{unit_id}: assembled {} items with {} slots ({} skipped)",
            items.len(),
            answers.len(),
            skipped.len()
        );

        QuizSession {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            unit_id: unit_id.to_string(),
            unit_name: unit_name.to_string(),
            kind: UnitKind::Verses,
            policy: GradingPolicy::from_ignore_spaces(self.config.ignore_spaces),
            items,
            answers,
            skipped,
        }
    }

    /// Build a session from worksheet text. Worksheets are not randomized and
    /// always grade strictly.
    pub fn assemble_worksheet(&self, unit_id: &str, unit_name: &str, text: &str) -> QuizSession {
        let (items, answers) = build_worksheet(text);
        tracing::debug!(
            "{unit_id}: worksheet with {} items and {} slots",
            items.len(),
            answers.len()
        );

        QuizSession {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            unit_id: unit_id.to_string(),
            unit_name: unit_name.to_string(),
            kind: UnitKind::Worksheet,
            policy: GradingPolicy::strict(),
            items,
            answers,
            skipped: vec![],
        }
    }

    /// Build one item, appending its slots to `answers`. Returns `None`, with
    /// `answers` untouched, when the verse has nothing to blank.
    pub fn build_item<R: Rng + ?Sized>(
        &self,
        verse: &Verse,
        number: usize,
        answers: &mut Vec<AnswerSlot>,
        rng: &mut R,
    ) -> Option<QuizItem> {
        let hint = verse.clean_text();

        if rng.gen::<f64>() < self.config.whole_verse_probability {
            let index = answers.len();
            answers.push(AnswerSlot {
                index,
                item: number,
                reference: verse.reference.clone(),
                expected: hint.clone(),
            });
            tracing::debug!("{}: whole-verse item", verse.reference);
            return Some(QuizItem {
                number,
                reference: verse.reference.clone(),
                mode: QuizMode::WholeVerse,
                fragments: vec![Fragment::Slot { index }],
                hint,
            });
        }

        let extractor = self.extractors.for_body(&verse.body);
        let chunks = extractor.extract(&verse.body);
        let selected = select_blanks(&chunks, self.config.density, rng);
        if selected.is_empty() {
            return None;
        }
        tracing::debug!(
            "{}: {} blanks from {} chunks ({})",
            verse.reference,
            selected.len(),
            chunks.len(),
            extractor.name()
        );

        let (fragments, slots) = blank_out(&chunks, &selected, answers.len(), number, &verse.reference);
        answers.extend(slots);

        Some(QuizItem {
            number,
            reference: verse.reference.clone(),
            mode: QuizMode::PartialBlank,
            fragments,
            hint,
        })
    }
}

/// Render chunks as fragments, replacing selected positions with slots
/// numbered from `first_index`.
fn blank_out(
    chunks: &[Chunk],
    selected: &BTreeSet<usize>,
    first_index: usize,
    item: usize,
    reference: &str,
) -> (Vec<Fragment>, Vec<AnswerSlot>) {
    let mut fragments = Vec::new();
    let mut slots = Vec::new();
    let mut text = String::new();

    for chunk in chunks {
        if chunk.space_before {
            text.push(' ');
        }
        if selected.contains(&chunk.position) {
            if !text.is_empty() {
                fragments.push(Fragment::Text {
                    text: std::mem::take(&mut text),
                });
            }
            let index = first_index + slots.len();
            fragments.push(Fragment::Slot { index });
            slots.push(AnswerSlot {
                index,
                item,
                reference: reference.to_string(),
                expected: chunk.text.clone(),
            });
        } else {
            text.push_str(&chunk.text);
        }
    }
    if !text.is_empty() {
        fragments.push(Fragment::Text { text });
    }

    (fragments, slots)
}
