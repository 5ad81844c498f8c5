//! Anchored shuffle permutations
//!
//! A shuffle order is a permutation of queue indices. The track that is
//! playing when the order is (re)built stays at position 0 so that turning
//! shuffle on never jumps playback.

use rand::seq::SliceRandom;
use rand::Rng;

/// Build a uniformly random permutation of `0..len` with `anchor` first
///
/// Every index except the anchor is Fisher-Yates shuffled, then the anchor
/// is prepended. A `None` or out-of-range anchor yields a plain uniform
/// permutation.
pub fn generate_shuffled_indices<R: Rng + ?Sized>(
    len: usize,
    anchor: Option<usize>,
    rng: &mut R,
) -> Vec<usize> {
    let anchor = anchor.filter(|&a| a < len);

    let mut rest: Vec<usize> = (0..len).filter(|&i| Some(i) != anchor).collect();
    rest.shuffle(rng);

    match anchor {
        Some(a) => {
            let mut order = Vec::with_capacity(len);
            order.push(a);
            order.extend(rest);
            order
        }
        None => rest,
    }
}
