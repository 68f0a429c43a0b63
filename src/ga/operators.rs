//! Permutation-preserving genetic operators.
//!
//! All operators are total over permutations: given permutation parents
//! they always return a permutation of the same genes, for any random
//! draw, and never panic.
//!
//! # Reference
//! Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (OX)

use std::collections::HashSet;
use std::hash::Hash;

use rand::Rng;

use super::Individual;

/// Order crossover (OX) for a fixed, inclusive interval.
///
/// `p1[start..=end]` is copied into the child at the same positions; the
/// remaining positions are filled left to right with `p2`'s genes in
/// `p2`'s order, skipping genes already taken from `p1`. The interval is
/// normalised so that `start <= end` and clamped to the chromosome.
///
/// # Example
/// ```
/// use u_timetable::ga::operators::order_crossover_segment;
///
/// let p1 = [0, 1, 2, 3, 4];
/// let p2 = [4, 3, 2, 1, 0];
/// assert_eq!(order_crossover_segment(&p1, &p2, 1, 2), vec![4, 1, 2, 3, 0]);
/// ```
pub fn order_crossover_segment<T>(p1: &[T], p2: &[T], start: usize, end: usize) -> Vec<T>
where
    T: Copy + Eq + Hash,
{
    let len = p1.len();
    if len == 0 {
        return Vec::new();
    }
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let end = end.min(len - 1);
    let start = start.min(end);

    let kept: HashSet<T> = p1[start..=end].iter().copied().collect();
    let mut donor = p2.iter().copied().filter(|g| !kept.contains(g));

    let mut child = Vec::with_capacity(len);
    for (i, &gene) in p1.iter().enumerate() {
        if (start..=end).contains(&i) {
            child.push(gene);
        } else {
            // Parents that are not permutations of each other can run the
            // donor dry; fall back to parent 1's gene.
            child.push(donor.next().unwrap_or(gene));
        }
    }
    child
}

/// Order crossover applied with probability `rate`.
///
/// Picks a uniform random interval of `p1`; with probability `1 - rate`
/// the child is a copy of `p1`.
pub fn order_crossover<T, R>(p1: &[T], p2: &[T], rate: f64, rng: &mut R) -> Vec<T>
where
    T: Copy + Eq + Hash,
    R: Rng,
{
    if p1.is_empty() || rng.random::<f64>() >= rate {
        return p1.to_vec();
    }
    let start = rng.random_range(0..p1.len());
    let end = rng.random_range(0..p1.len());
    order_crossover_segment(p1, p2, start, end)
}

/// Swap mutation: each position, with probability `rate`, trades its gene
/// with a uniformly random position (possibly itself).
pub fn swap_mutation<T, R: Rng>(genes: &mut [T], rate: f64, rng: &mut R) {
    let len = genes.len();
    for i in 0..len {
        if rng.random::<f64>() < rate {
            let j = rng.random_range(0..len);
            genes.swap(i, j);
        }
    }
}

/// Tournament selection: `k` uniform draws with replacement, lowest
/// fitness wins (first drawn wins ties).
///
/// Returns `None` only for an empty population.
pub fn tournament_select<'a, I, R>(population: &'a [I], k: usize, rng: &mut R) -> Option<&'a I>
where
    I: Individual,
    R: Rng,
{
    if population.is_empty() {
        return None;
    }
    let mut best = &population[rng.random_range(0..population.len())];
    for _ in 1..k.max(1) {
        let candidate = &population[rng.random_range(0..population.len())];
        if candidate.fitness() < best.fitness() {
            best = candidate;
        }
    }
    Some(best)
}

/// Whether `genes` is exactly a permutation of `0..genes.len()` under `index`.
pub fn is_permutation<T>(genes: &[T], index: impl Fn(&T) -> usize) -> bool {
    let mut seen = vec![false; genes.len()];
    genes.iter().all(|g| {
        let i = index(g);
        i < seen.len() && !std::mem::replace(&mut seen[i], true)
    })
}
