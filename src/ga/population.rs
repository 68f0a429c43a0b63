//! Fitness-ordered population.

use std::cmp::Ordering;

use super::Individual;

/// A population kept sorted ascending by fitness (best first).
#[derive(Debug, Clone)]
pub struct Population<I: Individual> {
    members: Vec<I>,
}

impl<I: Individual> Population<I> {
    /// Wraps and sorts a set of evaluated individuals.
    pub fn new(members: Vec<I>) -> Self {
        let mut population = Self { members };
        population.sort();
        population
    }

    /// Re-sorts ascending by fitness. Stable, so equal fitness keeps
    /// insertion order.
    pub fn sort(&mut self) {
        self.members.sort_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(Ordering::Equal)
        });
    }

    /// The best individual, if any.
    pub fn best(&self) -> Option<&I> {
        self.members.first()
    }

    /// The `n` best individuals (fewer if the population is smaller).
    pub fn elites(&self, n: usize) -> &[I] {
        &self.members[..n.min(self.members.len())]
    }

    /// Members, best first.
    pub fn members(&self) -> &[I] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Consumes the population, returning members best first.
    pub fn into_members(self) -> Vec<I> {
        self.members
    }
}
