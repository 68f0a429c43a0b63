//! GA-based timetable optimization.
//!
//! A small generic generational GA ([`GaRunner`] over any [`GaProblem`])
//! plus the timetabling encoding that plugs into it.
//!
//! # Encoding
//!
//! An individual is a permutation of event ids. The decoder places events
//! greedily in gene order, so the permutation is a priority list and every
//! permutation decodes to a hard-feasible (possibly incomplete) timetable.
//!
//! # Operators
//!
//! - Tournament selection (k = 3 by default, with replacement)
//! - Order crossover (OX), one child per pair
//! - Per-gene swap mutation
//! - Elitism (best `elite_count` copied unchanged)
//!
//! # Submodules
//!
//! - [`operators`]: permutation-preserving crossover, mutation, selection

mod chromosome;
mod config;
pub mod operators;
mod population;
mod problem;
mod runner;
mod types;

pub use chromosome::{Penalty, TimetableChromosome, ox_crossover, swap_genes};
pub use config::{ConfigError, GaConfig};
pub use population::Population;
pub use problem::TimetableProblem;
pub use runner::{GaResult, GaRunner};
pub use types::{Fitness, GaProblem, Individual};
