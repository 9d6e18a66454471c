//! Deterministic option shuffling keyed by content.
//!
//! Option order must look randomized to the learner, survive reloads, and come
//! out identical on every render target — without ever persisting "which order
//! did we show". Both properties follow from deriving the seed from the
//! content itself: same answers + distractors, same order, everywhere. Editing
//! a distractor changes the seed, so the order changes exactly when the
//! content does.
//!
//! One canonical construction, used by every caller: wrapping char-code sum
//! over the declared (unshuffled) strings, fed to `StdRng::seed_from_u64`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Numeric seed for a blank's option set: the correct answer(s) first, then
/// the distractors, all in declared order.
pub fn seed_for<S: AsRef<str>>(parts: &[S]) -> u64 {
  let mut acc: u64 = 0;
  for part in parts {
    for ch in part.as_ref().chars() {
      acc = acc.wrapping_add(ch as u64);
    }
  }
  acc
}

/// Deterministic permutation: same seed and same input order always yield the
/// same output order.
pub fn shuffle<T: Clone>(seed: u64, items: &[T]) -> Vec<T> {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut out = items.to_vec();
  out.shuffle(&mut rng);
  out
}

/// Convenience for the common case: pool = answers ++ distractors, seeded by
/// that same declared order.
pub fn shuffled_pool(answers: &[String], distractors: &[String]) -> Vec<String> {
  let mut pool: Vec<String> = Vec::with_capacity(answers.len() + distractors.len());
  pool.extend_from_slice(answers);
  pool.extend_from_slice(distractors);
  let seed = seed_for(&pool);
  shuffle(seed, &pool)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_seed_same_order() {
    let items = vec!["a", "b", "c", "d", "e"];
    assert_eq!(shuffle(42, &items), shuffle(42, &items));
  }

  #[test]
  fn seed_tracks_content() {
    let a = seed_for(&["invent", "discover", "create"]);
    let b = seed_for(&["invent", "discover", "create"]);
    let c = seed_for(&["invent", "discover", "created"]);
    assert_eq!(a, b);
    assert_ne!(a, c);
  }

  #[test]
  fn shuffle_is_a_permutation() {
    let items: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
    let mut out = shuffled_pool(&items[..10], &items[10..]);
    out.sort();
    let mut expect = items.clone();
    expect.sort();
    assert_eq!(out, expect);
  }

  #[test]
  fn pool_order_is_stable_across_calls() {
    let answers = vec!["harvest".to_string(), "settle".to_string()];
    let distractors = vec!["wander".to_string(), "trade".to_string()];
    assert_eq!(
      shuffled_pool(&answers, &distractors),
      shuffled_pool(&answers, &distractors),
    );
  }
}
