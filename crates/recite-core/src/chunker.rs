//! Chunk merger: coalesces runs of eligible tokens into blank candidates.

use crate::model::Chunk;
use crate::tokenizer::Token;

/// Merge adjacent eligible tokens into chunks in a single left-to-right pass.
///
/// A run starts at the first unconsumed eligible token and absorbs following
/// eligible tokens while fewer than `merge_cap` have been added to it, so a
/// chunk holds at most `merge_cap + 1` tokens. Ineligible tokens become
/// singleton, non-blankable chunks. Token text is kept verbatim.
pub fn merge_chunks(tokens: &[Token], merge_cap: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let start = i;
        let mut text = tokens[i].raw.clone();

        if tokens[i].eligible {
            while i + 1 < tokens.len() && tokens[i + 1].eligible && i - start < merge_cap {
                i += 1;
                text.push(' ');
                text.push_str(&tokens[i].raw);
            }
        }

        chunks.push(Chunk {
            text,
            eligible: tokens[start].eligible,
            position: chunks.len(),
            space_before: start > 0,
        });
        i += 1;
    }

    chunks
}

/// Rebuild the cleaned text a chunk sequence was cut from.
pub fn reconstruct(chunks: &[Chunk]) -> String {
    let mut out = String::new();
    for chunk in chunks {
        if chunk.space_before && !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&chunk.text);
    }
    out
}
