//! Timetabling GA problem definition.
//!
//! Implements [`GaProblem`] for CB-CTT: an individual is decoded into a
//! timetable by the greedy decoder and scored by the soft-constraint cost
//! evaluator.

use rand::Rng;
use tracing::info;

use super::chromosome::{Penalty, TimetableChromosome, ox_crossover, swap_genes};
use super::GaProblem;
use crate::cost::{CostBreakdown, CostWeights, count_violations};
use crate::decoder::decode;
use crate::models::{EventIndex, Instance, Timetable};

/// GA problem definition for timetabling.
///
/// Borrows the instance read-only; the event table is built once here and
/// reused by every decode.
///
/// # Example
/// ```
/// use u_timetable::ga::{GaConfig, GaRunner, TimetableProblem};
/// use u_timetable::models::{Course, Instance, Room};
///
/// let instance = Instance::builder("toy", 2, 2)
///     .with_course(Course::new("A", "T").with_lectures(2).with_min_working_days(2))
///     .with_room(Room::new("R", 10))
///     .build()
///     .unwrap();
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_seed(1);
/// let problem = TimetableProblem::new(&instance);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert_eq!(problem.decode(&result.best).assignments.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem<'a> {
    instance: &'a Instance,
    events: EventIndex,
    weights: CostWeights,
}

impl<'a> TimetableProblem<'a> {
    /// Creates a problem with default weights.
    ///
    /// Operator rates are not part of the problem: the runner passes
    /// `GaConfig::crossover_rate` and `GaConfig::mutation_rate` to every
    /// crossover and mutation.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            events: EventIndex::new(instance),
            weights: CostWeights::default(),
        }
    }

    /// Sets the cost weights.
    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The instance being solved.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// The precomputed event table.
    pub fn events(&self) -> &EventIndex {
        &self.events
    }

    /// Decodes a chromosome into a timetable.
    pub fn decode(&self, chromosome: &TimetableChromosome) -> Timetable {
        decode(&chromosome.genes, self.instance, &self.events)
    }

    /// Weighted cost of a decoded timetable, per term.
    pub fn breakdown(&self, timetable: &Timetable) -> CostBreakdown {
        let mut violations = count_violations(&timetable.assignments, self.instance);
        violations.unscheduled = timetable.unplaced_count() as u64;
        violations.weighted(&self.weights)
    }
}

impl GaProblem for TimetableProblem<'_> {
    type Individual = TimetableChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> TimetableChromosome {
        TimetableChromosome::random(&self.events, rng)
    }

    fn evaluate(&self, individual: &TimetableChromosome) -> Penalty {
        self.breakdown(&self.decode(individual)).total()
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &TimetableChromosome,
        parent2: &TimetableChromosome,
        rate: f64,
        rng: &mut R,
    ) -> TimetableChromosome {
        ox_crossover(parent1, parent2, rate, rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut TimetableChromosome, rate: f64, rng: &mut R) {
        swap_genes(individual, rate, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: Penalty) {
        info!("Generation {generation}: best fitness = {best_fitness}");
    }
}
