//! File formats: instance input and solution output.

mod instance;
mod solution;

pub use instance::{ParseError, ParseErrorKind, load_instance, parse_instance};
pub use solution::{
    ParsedSolution, SolutionWarning, SolutionWarningKind, load_solution, parse_solution,
    save_solution, write_solution,
};
