//! Crate-level error types.

use std::path::PathBuf;

use crate::ga::ConfigError;
use crate::io::ParseError;

/// Errors surfaced by the loaders, writers and binaries.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// A file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An instance file is malformed.
    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    /// A configuration file is not valid TOML for [`SolverConfig`](crate::config::SolverConfig).
    #[error("{}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// GA parameters are out of range.
    #[error("invalid GA configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl TimetableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::GaConfig;

    #[test]
    fn test_io_error_mentions_path() {
        let err = TimetableError::io(
            "missing.ctt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing.ctt"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_config_error_converts() {
        let bad = GaConfig::default().with_population_size(0);
        let err = TimetableError::from(bad.validate().unwrap_err());
        assert!(matches!(err, TimetableError::InvalidConfig(_)));
        assert!(err.to_string().starts_with("invalid GA configuration"));
    }
}
