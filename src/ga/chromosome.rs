//! Permutation chromosome for timetabling.
//!
//! # Encoding
//!
//! The chromosome is a permutation of all event ids `0..total_events`.
//! Gene order is the priority order in which the decoder places lectures;
//! the event id itself says which lecture (see
//! [`EventIndex`](crate::models::EventIndex)).

use rand::Rng;
use rand::seq::SliceRandom;

use super::operators::{is_permutation, order_crossover, swap_mutation};
use super::{Fitness, Individual};
use crate::models::{EventId, EventIndex};

/// Fitness of a timetable: total weighted soft-constraint penalty.
pub type Penalty = u64;

/// Event-order chromosome for the timetabling GA.
///
/// Lower fitness = better timetable (minimization convention).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableChromosome {
    /// Event ids in placement order.
    pub genes: Vec<EventId>,
    /// Fitness value (lower = better); `Penalty::MAX` until evaluated.
    pub fitness: Penalty,
}

impl Individual for TimetableChromosome {
    type Fitness = Penalty;

    fn fitness(&self) -> Penalty {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: Penalty) {
        self.fitness = fitness;
    }
}

impl TimetableChromosome {
    /// Wraps genes as an unevaluated chromosome.
    pub fn from_genes(genes: Vec<EventId>) -> Self {
        Self {
            genes,
            fitness: Penalty::worst(),
        }
    }

    /// Events in increasing id order (course by course).
    pub fn identity(events: &EventIndex) -> Self {
        Self::from_genes(events.event_ids().collect())
    }

    /// A uniformly random permutation of all events.
    pub fn random<R: Rng>(events: &EventIndex, rng: &mut R) -> Self {
        let mut genes: Vec<EventId> = events.event_ids().collect();
        genes.shuffle(rng);
        Self::from_genes(genes)
    }

    /// Whether the genes are exactly a permutation of the instance's events.
    pub fn is_valid(&self, events: &EventIndex) -> bool {
        self.genes.len() == events.len() && is_permutation(&self.genes, |e| e.index())
    }
}

/// Order crossover producing one child, applied with probability `rate`.
///
/// Without crossover the child is a copy of `p1`. The child always starts
/// unevaluated.
pub fn ox_crossover<R: Rng>(
    p1: &TimetableChromosome,
    p2: &TimetableChromosome,
    rate: f64,
    rng: &mut R,
) -> TimetableChromosome {
    TimetableChromosome::from_genes(order_crossover(&p1.genes, &p2.genes, rate, rng))
}

/// Per-gene swap mutation with probability `rate`.
pub fn swap_genes<R: Rng>(chromosome: &mut TimetableChromosome, rate: f64, rng: &mut R) {
    swap_mutation(&mut chromosome.genes, rate, rng);
}
