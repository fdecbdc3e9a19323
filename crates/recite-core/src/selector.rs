//! Blank selection over a verse's chunks.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Chunk;

/// Number of blanks to aim for: `ceil(eligible * density)`, at least one
/// whenever any chunk is eligible.
pub fn target_count(eligible: usize, density: f64) -> usize {
    if eligible == 0 {
        return 0;
    }
    let target = (eligible as f64 * density).ceil() as usize;
    target.clamp(1, eligible)
}

/// Choose which eligible chunks to blank out.
///
/// Candidates are visited in a uniformly shuffled order and accepted greedily
/// unless a neighbouring position is already taken. The result can fall
/// short of [`target_count`]; the adjacency rule always wins.
pub fn select_blanks<R: Rng + ?Sized>(chunks: &[Chunk], density: f64, rng: &mut R) -> BTreeSet<usize> {
    let mut candidates: Vec<usize> = chunks
        .iter()
        .filter(|c| c.eligible)
        .map(|c| c.position)
        .collect();
    let target = target_count(candidates.len(), density);
    candidates.shuffle(rng);

    let mut selected = BTreeSet::new();
    for position in candidates {
        if selected.len() >= target {
            break;
        }
        let before = position.checked_sub(1).is_some_and(|p| selected.contains(&p));
        let after = selected.contains(&(position + 1));
        if !before && !after {
            selected.insert(position);
        }
    }

    selected
}
