//! Stochastic universal sampling.
//!
//! One random offset, `count` evenly spaced pointers over the cumulative
//! weights, one pass. Arithmetic is exact: positions are scaled by
//! `count` so the pointer spacing is the integer `total`.

use rand::Rng;

/// Pick `count` indices into `weights`, each with probability proportional
/// to its weight. Returned indices are ascending.
///
/// Returns an empty list when `count` is 0 or every weight is 0.
pub fn stochastic_universal_sampling<R: Rng + ?Sized>(
    weights: &[u64],
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let total: u128 = weights.iter().map(|&w| u128::from(w)).sum();
    if count == 0 || total == 0 {
        return Vec::new();
    }
    let n = count as u128;
    let start = rng.random_range(0..total);

    let mut picked = Vec::with_capacity(count);
    let mut index = 0;
    let mut upper = u128::from(weights[0]) * n;
    for i in 0..n {
        let pointer = start + i * total;
        while pointer >= upper {
            index += 1;
            upper += u128::from(weights[index]) * n;
        }
        picked.push(index);
    }
    picked
}

/// SUS weights for fitness values: `fitness + 1`, so a zero-fitness
/// chromosome can still be picked.
#[must_use]
pub fn fitness_weights(fitness: impl IntoIterator<Item = u32>) -> Vec<u64> {
    fitness.into_iter().map(|f| u64::from(f) + 1).collect()
}
