//! Shared utilities for game implementations
//!
//! Deck handling and move-set enumeration used by more than one game. All
//! randomness flows through the caller's `ChaCha20Rng`.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::game::{Outcome, Player};

/// Remove and return a uniformly random element of `deck`.
///
/// Order of the remaining cards is not preserved, which is fine for decks
/// modeled as unordered multisets. Returns `None` on an empty deck.
///
/// # Example
/// ```
/// use engine_core::game_utils::draw_random;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut rng = ChaCha20Rng::seed_from_u64(7);
/// let mut deck = vec![1, 2, 3];
/// let card = draw_random(&mut deck, &mut rng).unwrap();
/// assert!((1..=3).contains(&card));
/// assert_eq!(deck.len(), 2);
/// ```
#[inline]
pub fn draw_random<T>(deck: &mut Vec<T>, rng: &mut ChaCha20Rng) -> Option<T> {
    if deck.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..deck.len());
    Some(deck.swap_remove(idx))
}

/// Draw up to `n` cards, stopping early if the deck runs out.
pub fn draw_many<T>(deck: &mut Vec<T>, n: usize, rng: &mut ChaCha20Rng) -> Vec<T> {
    let mut drawn = Vec::with_capacity(n);
    for _ in 0..n {
        match draw_random(deck, rng) {
            Some(card) => drawn.push(card),
            None => break,
        }
    }
    drawn
}

/// Shuffle a freshly built deck in place.
#[inline]
pub fn shuffle<T>(deck: &mut [T], rng: &mut ChaCha20Rng) {
    deck.shuffle(rng);
}

/// All index subsets of `0..n` with size in `min_size..=max_size`.
///
/// Subsets are ordered by size, then lexicographically; each subset is in
/// increasing index order.
///
/// # Example
/// ```
/// use engine_core::game_utils::index_combinations;
///
/// let combos = index_combinations(3, 1, 2);
/// assert_eq!(
///     combos,
///     vec![vec![0], vec![1], vec![2], vec![0, 1], vec![0, 2], vec![1, 2]]
/// );
/// ```
pub fn index_combinations(n: usize, min_size: usize, max_size: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let max_size = max_size.min(n);
    for k in min_size.max(1)..=max_size {
        let mut current = Vec::with_capacity(k);
        push_combinations(n, k, 0, &mut current, &mut out);
    }
    out
}

fn push_combinations(
    n: usize,
    k: usize,
    start: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if current.len() == k {
        out.push(current.clone());
        return;
    }
    let remaining = k - current.len();
    for i in start..=(n - remaining) {
        current.push(i);
        push_combinations(n, k, i + 1, current, out);
        current.pop();
    }
}

/// Map an optional winner onto an [`Outcome`] (no winner is a draw).
#[inline]
pub fn outcome_from_winner(winner: Option<Player>) -> Outcome {
    match winner {
        Some(p) => Outcome::Winner(p),
        None => Outcome::Draw,
    }
}
