//! k-point crossover.

use rand::Rng;

use lodestar_kernel::collections::MaxHeap;

use super::EvolutionError;

/// `points` distinct cut positions in `1..length`, ascending.
///
/// Duplicates are rejected with a linear scan of the small max-heap that
/// collects the points; the heap then yields them largest first.
///
/// # Errors
///
/// [`EvolutionError::InvalidConfig`] if `points` distinct cuts do not fit
/// in `1..length`.
pub fn cut_points<R: Rng + ?Sized>(
    length: usize,
    points: usize,
    rng: &mut R,
) -> Result<Vec<usize>, EvolutionError> {
    if points >= length.max(1) {
        return Err(EvolutionError::InvalidConfig {
            detail: format!("{points} cut points do not fit a chromosome of length {length}"),
        });
    }
    let mut heap = MaxHeap::new(points);
    while heap.len() < points {
        let cut = rng.random_range(1..length);
        if !heap.contains(&cut) {
            heap.insert(cut)?;
        }
    }
    let mut cuts = heap.into_sorted_vec();
    cuts.reverse();
    Ok(cuts)
}

/// Breed two children. Segments between consecutive cuts alternate
/// between the parents; the first child starts from `a`, the second from
/// `b`.
///
/// # Errors
///
/// See [`cut_points`].
pub fn k_point<G: Clone, R: Rng + ?Sized>(
    a: &[G],
    b: &[G],
    points: usize,
    rng: &mut R,
) -> Result<(Vec<G>, Vec<G>), EvolutionError> {
    let length = a.len().min(b.len());
    if length < 2 {
        return Ok((a.to_vec(), b.to_vec()));
    }
    let cuts = cut_points(length, points, rng)?;
    Ok(splice_segments(a, b, &cuts))
}

fn splice_segments<G: Clone>(a: &[G], b: &[G], cuts: &[usize]) -> (Vec<G>, Vec<G>) {
    let length = a.len().min(b.len());
    let mut first = Vec::with_capacity(length);
    let mut second = Vec::with_capacity(length);
    let mut lead_is_a = true;
    let mut from = 0;
    for &to in cuts.iter().chain(std::iter::once(&length)) {
        let (x, y) = if lead_is_a { (a, b) } else { (b, a) };
        first.extend_from_slice(&x[from..to]);
        second.extend_from_slice(&y[from..to]);
        lead_is_a = !lead_is_a;
        from = to;
    }
    (first, second)
}
