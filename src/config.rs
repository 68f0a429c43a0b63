//! Solver configuration (TOML).
//!
//! ```toml
//! [ga]
//! population_size = 50
//! max_generations = 500
//! seed = 7
//!
//! [weights]
//! unscheduled = 100
//!
//! [output]
//! solution_path = "out/best.sol"
//! ```
//!
//! Every table and field is optional and falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::CostWeights;
use crate::error::TimetableError;
use crate::ga::GaConfig;

/// Default location of the written solution.
pub const DEFAULT_SOLUTION_PATH: &str = "output/solution.out";

fn default_solution_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOLUTION_PATH)
}

/// Where results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_solution_path")]
    pub solution_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            solution_path: default_solution_path(),
        }
    }
}

/// Complete solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    #[serde(default)]
    pub ga: GaConfig,
    #[serde(default)]
    pub weights: CostWeights,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SolverConfig {
    /// Loads a configuration file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, TimetableError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|e| TimetableError::io(path, e))?;
        let config = Self::from_toml(&text).map_err(|source| TimetableError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parses configuration text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Checks the GA parameters.
    pub fn validate(&self) -> Result<(), TimetableError> {
        self.ga.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = SolverConfig::load(None).unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.ga.population_size, 30);
        assert_eq!(config.weights, CostWeights::default());
        assert_eq!(config.output.solution_path, PathBuf::from("output/solution.out"));
    }

    #[test]
    fn test_partial_tables() {
        let config = SolverConfig::from_toml(
            r#"
            [ga]
            max_generations = 7
            seed = 11

            [weights]
            unscheduled = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.ga.max_generations, 7);
        assert_eq!(config.ga.seed, Some(11));
        assert_eq!(config.ga.population_size, 30);
        assert_eq!(config.weights.unscheduled, 100);
        assert_eq!(config.weights.min_working_days, 5);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nsolution_path = \"elsewhere/best.sol\"").unwrap();

        let config = SolverConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.output.solution_path, PathBuf::from("elsewhere/best.sol"));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ga]\npopulation_size = \"many\"").unwrap();

        let err = SolverConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, TimetableError::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SolverConfig::load(Some(Path::new("/no/such/solver.toml"))).unwrap_err();
        assert!(matches!(err, TimetableError::Io { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_ga() {
        let config = SolverConfig::from_toml("[ga]\nelite_count = 50").unwrap();
        assert!(matches!(
            config.validate(),
            Err(TimetableError::InvalidConfig(_))
        ));
    }
}
