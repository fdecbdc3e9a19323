//! Blank-candidate extraction.
//!
//! A verse body is cut into chunks one of two ways. Plain text goes through
//! the tokenizer and chunk merger. A body carrying `{...}` markup uses the
//! marked spans as the candidates instead. [`Extractors::for_body`] picks the
//! variant by looking for well-formed markup.

use crate::chunker::{merge_chunks, reconstruct};
use crate::model::Chunk;
use crate::tokenizer::{tokenize, StopWords};

/// Produces the chunk sequence blank selection runs over.
pub trait CandidateExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Cut `body` into ordered chunks with eligibility flags.
    fn extract(&self, body: &str) -> Vec<Chunk>;
}

/// Tokenize, filter stop words, and merge eligible runs.
#[derive(Debug, Clone)]
pub struct PlainExtractor {
    stop_words: StopWords,
    merge_cap: usize,
}

impl PlainExtractor {
    pub fn new(stop_words: StopWords, merge_cap: usize) -> Self {
        Self {
            stop_words,
            merge_cap,
        }
    }
}

impl CandidateExtractor for PlainExtractor {
    fn name(&self) -> &str {
        "plain"
    }

    fn extract(&self, body: &str) -> Vec<Chunk> {
        let text = strip_markup(body);
        merge_chunks(&tokenize(&text, &self.stop_words), self.merge_cap)
    }
}

/// Use `{...}` spans as the only candidates.
///
/// Spans shorter than `short_span_chars` are eligible. When no span is that
/// short, the single shortest span is made eligible so the verse still gets
/// a blank.
#[derive(Debug, Clone)]
pub struct MarkedExtractor {
    short_span_chars: usize,
}

impl MarkedExtractor {
    pub fn new(short_span_chars: usize) -> Self {
        Self { short_span_chars }
    }
}

impl CandidateExtractor for MarkedExtractor {
    fn name(&self) -> &str {
        "marked"
    }

    fn extract(&self, body: &str) -> Vec<Chunk> {
        let pieces = scan_markup(body);

        let mut chunks: Vec<Chunk> = pieces
            .iter()
            .enumerate()
            .map(|(position, piece)| Chunk {
                text: piece.text.clone(),
                eligible: piece.span && piece.text.chars().count() < self.short_span_chars,
                position,
                space_before: piece.space_before,
            })
            .collect();

        if !chunks.iter().any(|c| c.eligible) {
            let shortest = pieces
                .iter()
                .enumerate()
                .filter(|(_, p)| p.span)
                .min_by_key(|(_, p)| p.text.chars().count())
                .map(|(i, _)| i);
            if let Some(i) = shortest {
                chunks[i].eligible = true;
            }
        }

        chunks
    }
}

/// Both extraction variants, built once per configuration.
pub struct Extractors {
    plain: PlainExtractor,
    marked: MarkedExtractor,
}

impl Extractors {
    pub fn new(plain: PlainExtractor, marked: MarkedExtractor) -> Self {
        Self { plain, marked }
    }

    /// The extractor suited to this body.
    pub fn for_body(&self, body: &str) -> &dyn CandidateExtractor {
        if has_marked_spans(body) {
            &self.marked
        } else {
            &self.plain
        }
    }
}

/// A word of literal text or one `{...}` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Piece {
    pub text: String,
    pub span: bool,
    pub space_before: bool,
}

struct Scanner {
    pieces: Vec<Piece>,
    pending_space: bool,
}

impl Scanner {
    fn push(&mut self, raw: &str, span: bool) {
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return;
        }
        let space_before = self.pending_space && !self.pieces.is_empty();
        self.pieces.push(Piece {
            text,
            span,
            space_before,
        });
        self.pending_space = false;
    }
}

/// Split a body into literal words and `{...}` spans.
///
/// Stray `}` characters are dropped; an unclosed `{` turns back into literal
/// words.
pub(crate) fn scan_markup(body: &str) -> Vec<Piece> {
    let mut scanner = Scanner {
        pieces: Vec::new(),
        pending_space: false,
    };
    let mut buf = String::new();
    let mut in_span = false;

    for ch in body.chars() {
        match ch {
            '{' if !in_span => {
                scanner.push(&buf, false);
                buf.clear();
                in_span = true;
            }
            '}' if in_span => {
                scanner.push(&buf, true);
                buf.clear();
                in_span = false;
            }
            '{' | '}' => {}
            c if c.is_whitespace() && !in_span => {
                scanner.push(&buf, false);
                buf.clear();
                scanner.pending_space = true;
            }
            c => buf.push(c),
        }
    }

    if in_span {
        if buf.starts_with(char::is_whitespace) {
            scanner.pending_space = true;
        }
        for word in buf.split_whitespace() {
            scanner.push(word, false);
            scanner.pending_space = true;
        }
    } else {
        scanner.push(&buf, false);
    }

    scanner.pieces
}

/// Whether `body` holds at least one non-empty `{...}` span.
pub fn has_marked_spans(body: &str) -> bool {
    scan_markup(body).iter().any(|p| p.span)
}

/// The body with markup removed and whitespace collapsed.
pub fn strip_markup(body: &str) -> String {
    let chunks: Vec<Chunk> = scan_markup(body)
        .into_iter()
        .enumerate()
        .map(|(position, p)| Chunk {
            text: p.text,
            eligible: false,
            position,
            space_before: p.space_before,
        })
        .collect();
    reconstruct(&chunks)
}
