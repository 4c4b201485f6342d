//! Placement error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Errors returned while setting up a placement run.
///
/// A run itself never fails: overcommitment, unplaceable tasks and singular
/// normalization systems are all absorbed by the algorithm.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("invalid input: {}", join(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type PlacementResult<T> = Result<T, PlacementError>;

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
