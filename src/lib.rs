//! Curriculum-based course timetabling for the U-Engine ecosystem.
//!
//! Evolves lecture placements for CB-CTT instances (ITC-2007 track 3) with
//! a permutation GA and a greedy decoder. Every decoded timetable satisfies
//! the hard constraints it checks; the GA minimizes the soft-constraint
//! penalty.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Instance`, `Course`, `Room`, `Curriculum`,
//!   `Assignment`, `Timetable`, typed ids and grids
//! - **`validation`**: Input integrity checks (duplicate names, unknown references, horizon)
//! - **`decoder`**: Chromosome → timetable placement
//! - **`cost`**: Soft-constraint evaluation and weights
//! - **`ga`**: Generic GA engine plus the timetabling problem
//! - **`io`**: Instance and solution file formats
//! - **`audit`**: Re-scoring of persisted solutions
//! - **`config`**: TOML solver configuration
//!
//! # References
//!
//! - Di Gaspero, McCollum, Schaerf (2007), "The Second International
//!   Timetabling Competition (ITC-2007): Curriculum-based Course
//!   Timetabling (Track 3)"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization, and
//!   Machine Learning"

pub mod audit;
pub mod config;
pub mod cost;
pub mod decoder;
pub mod error;
pub mod ga;
pub mod io;
pub mod models;
pub mod validation;

pub use error::TimetableError;
