//! Worksheet parsing.
//!
//! A worksheet is prepared text where every blank is written inline as
//! `(answer)`. Lines starting with a question marker (`3.`, `3~5.`, `:12`)
//! open a new card; every line up to the next marker belongs to that card.
//! Lines starting with `답>` are shown as written.

use crate::model::{AnswerSlot, Fragment, QuizItem, QuizMode};

/// Prefix of a literal answer line.
pub const ANSWER_LINE_PREFIX: &str = "답>";

/// A piece of one worksheet line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Blank(String),
}

/// Whether a trimmed line starts with a question marker.
pub fn is_heading(line: &str) -> bool {
    heading_marker(line).is_some()
}

/// The number part of a question marker: `3.` gives `3`, `3~5.` gives
/// `3~5`, `:12` gives `12`.
fn heading_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix(':') {
        let digits = leading_digits(rest);
        return (digits > 0).then(|| &rest[..digits]);
    }

    let first = leading_digits(line);
    if first == 0 {
        return None;
    }
    let mut end = first;
    if line[end..].starts_with('~') {
        end += 1;
        end += leading_digits(&line[end..]);
    }
    line[end..].starts_with('.').then(|| &line[..end])
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Review label for a card opened by `line`, e.g. `3번`.
pub fn heading_label(line: &str) -> Option<String> {
    heading_marker(line).map(|marker| format!("{marker}번"))
}

/// Split a line into literal text and `(answer)` blanks.
///
/// Answers are trimmed. Parentheses holding only whitespace, and an
/// unclosed `(`, stay literal.
pub fn split_blanks(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut rest = line;

    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')').map(|c| open + c) else {
            break;
        };
        let answer = rest[open + 1..close].trim();
        if answer.is_empty() {
            text.push_str(&rest[..=close]);
        } else {
            text.push_str(&rest[..open]);
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(Segment::Blank(answer.to_string()));
        }
        rest = &rest[close + 1..];
    }
    text.push_str(rest);
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }

    segments
}

/// A card being built.
struct Card {
    label: Option<String>,
    fragments: Vec<Fragment>,
    hint: Vec<String>,
    slots: Vec<AnswerSlot>,
}

impl Card {
    fn new(label: Option<String>) -> Self {
        Self {
            label,
            fragments: Vec::new(),
            hint: Vec::new(),
            slots: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str, first_index: usize) {
        if !self.fragments.is_empty() {
            self.fragments.push(Fragment::Break);
        }

        let segments = if line.starts_with(ANSWER_LINE_PREFIX) {
            vec![Segment::Text(line.to_string())]
        } else {
            split_blanks(line)
        };

        let mut hint = String::new();
        for segment in segments {
            match segment {
                Segment::Text(text) => {
                    hint.push_str(&text);
                    self.fragments.push(Fragment::Text { text });
                }
                Segment::Blank(answer) => {
                    let index = first_index + self.slots.len();
                    hint.push_str(&answer);
                    self.fragments.push(Fragment::Slot { index });
                    self.slots.push(AnswerSlot {
                        index,
                        item: 0,
                        reference: self
                            .label
                            .clone()
                            .unwrap_or_else(|| format!("문항 {}", index + 1)),
                        expected: answer,
                    });
                }
            }
        }
        self.hint.push(hint);
    }
}

/// Build quiz items and the session answer list from worksheet text.
///
/// Worksheets keep their written order. Cards without a single blank are
/// dropped; they hold no slots, so slot indices stay contiguous.
pub fn build_worksheet(text: &str) -> (Vec<QuizItem>, Vec<AnswerSlot>) {
    let mut cards = Vec::new();
    let mut current: Option<Card> = None;
    let mut slot_count = 0;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_heading(line) {
            if let Some(card) = current.take() {
                slot_count += card.slots.len();
                cards.push(card);
            }
            current = Some(Card::new(heading_label(line)));
        }
        current
            .get_or_insert_with(|| Card::new(None))
            .push_line(line, slot_count);
    }
    if let Some(card) = current {
        cards.push(card);
    }

    let mut items = Vec::new();
    let mut answers = Vec::new();
    for card in cards {
        if card.slots.is_empty() {
            tracing::debug!("dropping worksheet card without blanks: {:?}", card.label);
            continue;
        }
        let number = items.len() + 1;
        let reference = card
            .label
            .clone()
            .unwrap_or_else(|| format!("문항 {number}"));

        answers.extend(card.slots.into_iter().map(|slot| AnswerSlot {
            item: number,
            ..slot
        }));
        items.push(QuizItem {
            number,
            reference,
            mode: QuizMode::PartialBlank,
            fragments: card.fragments,
            hint: card.hint.join("\n"),
        });
    }

    (items, answers)
}
