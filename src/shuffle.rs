//! Result shuffling
//!
//! Matching sentences are shown in random order for variety. Nothing here is
//! seeded by the app, so two searches for the same word rarely look alike.

use rand::Rng;
use rand::seq::SliceRandom;

/// Return a uniformly random permutation of `items`, leaving `items` untouched
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}

#[cfg(test)]
#[path = "shuffle_tests.rs"]
mod shuffle_tests;
