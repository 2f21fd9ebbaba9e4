use std::io;
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// An enumeration of the different errors that can occur while handling the
/// [PrototypeRegistry](crate::PrototypeRegistry).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RegistryError {

    /// This error is raised if a clone is requested for a key under which no
    /// prototype was registered. It indicates a misconfigured experiment and
    /// is never retried.
    #[error("no prototype registered for key: {key}")]
    NotFound {

        /// The key which was requested.
        key: String
    }
}

/// Syntactic sugar for `Result<T, RegistryError>`.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// An enumeration of the reasons why an
/// [ExperimentConfig](crate::ExperimentConfig) is rejected.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {

    /// The experiment has no object counts to measure.
    #[error("at least one object count is required")]
    NoSizes,

    /// An object count of zero was given.
    #[error("object counts must be positive")]
    ZeroSize,

    /// The object counts are not strictly ascending.
    #[error("object counts must be ascending, but {next} follows {previous}")]
    NotAscending {
        previous: usize,
        next: usize
    }
}

/// The errors which abort an experiment run. There is no partial result if
/// any of these occurs.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BenchError {

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid experiment configuration: {0}")]
    Config(#[from] ConfigError)
}

/// Errors raised while writing or reading result tables and generated
/// samples.
#[derive(Debug, Error)]
pub enum ReportError {

    /// Reading or writing the file at `path` failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,

        #[source]
        source: io::Error
    },

    /// Drawing the chart at `path` failed.
    #[error("could not draw chart {path}: {source}")]
    Chart {
        path: PathBuf,

        #[source]
        source: DrawingAreaErrorKind<io::Error>
    },

    /// A row of a result table could not be parsed.
    #[error("malformed row {line} in {path}: {content}")]
    Parse {
        path: PathBuf,

        /// The 1-based line number of the row.
        line: usize,
        content: String
    }
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error)
            -> ReportError {
        ReportError::Io {
            path: path.into(),
            source
        }
    }

    pub(crate) fn chart(path: impl Into<PathBuf>,
            source: DrawingAreaErrorKind<io::Error>) -> ReportError {
        ReportError::Chart {
            path: path.into(),
            source
        }
    }
}

/// Syntactic sugar for `Result<T, ReportError>`.
pub type ReportResult<T> = Result<T, ReportError>;
