//! Draw allocator: random, non-repeating picks from the 52-card space.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{CardId, Rank, Suit};

/// Sample a uniformly random identity not in `excluding`.
///
/// Rank and suit are sampled independently, with replacement across
/// attempts, until the pair falls outside the exclusion set. Termination is
/// only probabilistic: if `excluding` already covers all 52 identities this
/// loops forever. Callers cap their requests at 52.
pub fn draw_one<R: Rng>(rng: &mut R, excluding: &HashSet<CardId>) -> CardId {
    loop {
        let rank = *Rank::ALL.choose(rng).expect("rank set is non-empty");
        let suit = *Suit::ALL.choose(rng).expect("suit set is non-empty");
        let id = CardId::new(rank, suit);
        if !excluding.contains(&id) {
            return id;
        }
    }
}

/// Draw `n` distinct identities, feeding each result back into the exclusion
/// set before the next draw. Re-sampled duplicates are retried silently and
/// never counted toward `n`.
pub fn draw_n<R: Rng>(rng: &mut R, n: usize, excluding: &HashSet<CardId>) -> Vec<CardId> {
    let mut used = excluding.clone();
    let mut drawn = Vec::with_capacity(n);
    while drawn.len() < n {
        let id = draw_one(rng, &used);
        used.insert(id);
        drawn.push(id);
    }
    drawn
}
