//! Generational GA runner.
//!
//! # Algorithm
//!
//! 1. Create `population_size` random individuals and evaluate them.
//! 2. For each of `max_generations` generations:
//!    - copy the `elite_count` best individuals unchanged,
//!    - fill the rest with children: two tournament winners, crossover,
//!      mutation, evaluation,
//!    - sort ascending by fitness and report the best.
//!
//! There is no convergence test; the run always lasts `max_generations`.
//! Because elites survive unchanged, the best fitness never gets worse and
//! the best of the final generation is the best ever seen.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::operators::tournament_select;
use super::{ConfigError, Fitness, GaConfig, GaProblem, Individual, Population};

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// Best individual of the final generation.
    pub best: I,
    /// Fitness of `best`.
    pub best_fitness: I::Fitness,
    /// Generations run after initialisation.
    pub generations: usize,
    /// Best fitness after each generation, oldest first.
    pub history: Vec<I::Fitness>,
    /// Final population, best first.
    pub population: Vec<I>,
}

/// Runs a [`GaProblem`] under a [`GaConfig`].
pub struct GaRunner;

impl GaRunner {
    /// Runs with a generator seeded from `config.seed` (or OS entropy).
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs with a caller-supplied generator; `config.seed` is ignored.
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        config.validate()?;
        debug!(
            population = config.population_size,
            generations = config.max_generations,
            elites = config.elite_count,
            "starting GA run"
        );

        let initial = (0..config.population_size)
            .map(|_| {
                let individual = problem.create_individual(rng);
                evaluated(problem, individual)
            })
            .collect();
        let mut population = Population::new(initial);
        let mut history = Vec::with_capacity(config.max_generations);

        for generation in 1..=config.max_generations {
            let mut next: Vec<P::Individual> = population.elites(config.elite_count).to_vec();

            while next.len() < config.population_size {
                let members = population.members();
                let (Some(p1), Some(p2)) = (
                    tournament_select(members, config.tournament_size, rng),
                    tournament_select(members, config.tournament_size, rng),
                ) else {
                    break;
                };
                let mut child = problem.crossover(p1, p2, config.crossover_rate, rng);
                problem.mutate(&mut child, config.mutation_rate, rng);
                next.push(evaluated(problem, child));
            }

            population = Population::new(next);
            let best = population
                .best()
                .map(Individual::fitness)
                .ok_or(ConfigError::EmptyPopulation)?;
            history.push(best);
            problem.on_generation(generation, best);
        }

        let best = population.best().cloned().ok_or(ConfigError::EmptyPopulation)?;
        debug!(best_fitness = best.fitness().to_f64(), "GA run finished");
        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            history,
            population: population.into_members(),
        })
    }
}

fn evaluated<P: GaProblem>(problem: &P, mut individual: P::Individual) -> P::Individual {
    let fitness = problem.evaluate(&individual);
    individual.set_fitness(fitness);
    individual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::operators::{order_crossover, swap_mutation};
    use rand::seq::SliceRandom;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Sort a permutation: fitness = number of misplaced genes.
    struct SortProblem {
        n: usize,
        evaluations: AtomicUsize,
        reported: AtomicUsize,
    }

    impl SortProblem {
        fn new(n: usize) -> Self {
            Self {
                n,
                evaluations: AtomicUsize::new(0),
                reported: AtomicUsize::new(0),
            }
        }
    }

    #[derive(Debug, Clone)]
    struct Perm {
        genes: Vec<usize>,
        fitness: u64,
    }

    impl Individual for Perm {
        type Fitness = u64;
        fn fitness(&self) -> u64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: u64) {
            self.fitness = f;
        }
    }

    impl GaProblem for SortProblem {
        type Individual = Perm;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Perm {
            let mut genes: Vec<usize> = (0..self.n).collect();
            genes.shuffle(rng);
            Perm {
                genes,
                fitness: u64::MAX,
            }
        }

        fn evaluate(&self, p: &Perm) -> u64 {
            self.evaluations.fetch_add(1, Ordering::Relaxed);
            p.genes.iter().enumerate().filter(|&(i, &g)| i != g).count() as u64
        }

        fn crossover<R: Rng>(&self, a: &Perm, b: &Perm, rate: f64, rng: &mut R) -> Perm {
            Perm {
                genes: order_crossover(&a.genes, &b.genes, rate, rng),
                fitness: u64::MAX,
            }
        }

        fn mutate<R: Rng>(&self, p: &mut Perm, rate: f64, rng: &mut R) {
            swap_mutation(&mut p.genes, rate, rng);
        }

        fn on_generation(&self, _generation: usize, _best: u64) {
            self.reported.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(20)
            .with_max_generations(40)
            .with_elite_count(2)
            .with_mutation_rate(0.05)
            .with_seed(42)
    }

    #[test]
    fn test_run_reports_every_generation() {
        let problem = SortProblem::new(12);
        let result = GaRunner::run(&problem, &config()).unwrap();

        assert_eq!(result.generations, 40);
        assert_eq!(result.history.len(), 40);
        assert_eq!(problem.reported.load(Ordering::Relaxed), 40);
        assert_eq!(result.population.len(), 20);
        // 20 initial + 18 children per generation.
        assert_eq!(problem.evaluations.load(Ordering::Relaxed), 20 + 40 * 18);
    }

    #[test]
    fn test_elitism_never_loses_best() {
        let problem = SortProblem::new(15);
        let result = GaRunner::run(&problem, &config()).unwrap();
        for pair in result.history.windows(2) {
            assert!(pair[1] <= pair[0], "best fitness regressed: {pair:?}");
        }
        assert_eq!(Some(&result.best_fitness), result.history.last());
        assert_eq!(result.best_fitness, problem.evaluate(&result.best));
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = GaRunner::run(&SortProblem::new(10), &config()).unwrap();
        let b = GaRunner::run(&SortProblem::new(10), &config()).unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best.genes, b.best.genes);
    }

    #[test]
    fn test_population_sorted_and_permutations() {
        let result = GaRunner::run(&SortProblem::new(10), &config()).unwrap();
        for pair in result.population.windows(2) {
            assert!(pair[0].fitness <= pair[1].fitness);
        }
        for p in &result.population {
            let mut sorted = p.genes.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let cfg = config().with_max_generations(0);
        let result = GaRunner::run(&SortProblem::new(6), &cfg).unwrap();
        assert!(result.history.is_empty());
        assert_eq!(result.generations, 0);
        assert_eq!(result.best_fitness, result.population[0].fitness);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = config().with_population_size(0);
        assert!(matches!(
            GaRunner::run(&SortProblem::new(6), &cfg),
            Err(ConfigError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_zero_rates_breed_only_parent_copies() {
        let cfg = config()
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0)
            .with_max_generations(10);
        let problem = SortProblem::new(12);
        let mut rng = SmallRng::seed_from_u64(7);
        let initial: Vec<Vec<usize>> = (0..20)
            .map(|_| problem.create_individual(&mut rng).genes)
            .collect();
        let mut rng = SmallRng::seed_from_u64(7);
        let result = GaRunner::run_with_rng(&problem, &cfg, &mut rng).unwrap();

        // Without recombination or mutation every member is a tournament
        // copy of some initial individual.
        for member in &result.population {
            assert!(initial.contains(&member.genes));
        }
    }

    #[test]
    fn test_all_elites_population_is_carried_over() {
        let cfg = config().with_elite_count(20).with_max_generations(5);
        let problem = SortProblem::new(8);
        let result = GaRunner::run(&problem, &cfg).unwrap();
        // No children are ever bred.
        assert_eq!(problem.evaluations.load(Ordering::Relaxed), 20);
        assert!(result.history.iter().all(|&f| f == result.history[0]));
    }
}
