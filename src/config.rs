//! Run configuration.
//!
//! [`Nsga3Config`] deserializes from any serde format with every field
//! optional, and offers `with_*` builders for programmatic use.
//!
//! ```
//! use u_placement::config::{Nsga3Config, ParentSelection};
//!
//! let config = Nsga3Config::default()
//!     .with_population_size(40)
//!     .with_generations(25)
//!     .with_segments(3)
//!     .with_seed(7)
//!     .with_parent_selection(ParentSelection::Crowded);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the initial population is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingStrategy {
    /// Shuffled node order, first node that still fits each task.
    #[default]
    GreedyFit,
    /// Every task on a uniformly random node, no fit check.
    Uniform,
}

/// How parents are drawn for crossover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentSelection {
    /// Feasibility-first binary tournament across the two population halves.
    #[default]
    ConstrainedTournament,
    /// Rank, then crowding distance, binary tournament.
    Crowded,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("population size must be even, got {0}")]
    OddPopulation(usize),

    #[error("reference point segments must be at least 1")]
    ZeroSegments,

    #[error("mutation probability must lie in [0, 1], got {0}")]
    MutationProbability(f64),
}

/// NSGA-III run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nsga3Config {
    /// Individuals per generation (N). Even, so tournament halves match.
    pub population_size: usize,
    /// Fixed number of generations; there is no other stopping rule.
    pub generations: usize,
    /// Divisions per axis of the reference-point simplex lattice.
    pub segments: usize,
    /// Probability that an offspring is mutated.
    pub mutation_probability: f64,
    /// Seed for [`Nsga3::run_seeded`](crate::nsga3::Nsga3::run_seeded).
    pub seed: u64,
    pub seeding: SeedingStrategy,
    pub parent_selection: ParentSelection,
}

impl Default for Nsga3Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            segments: 4,
            mutation_probability: 0.5,
            seed: 42,
            seeding: SeedingStrategy::GreedyFit,
            parent_selection: ParentSelection::ConstrainedTournament,
        }
    }
}

impl Nsga3Config {
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_seeding(mut self, seeding: SeedingStrategy) -> Self {
        self.seeding = seeding;
        self
    }

    pub fn with_parent_selection(mut self, selection: ParentSelection) -> Self {
        self.parent_selection = selection;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.population_size % 2 != 0 {
            return Err(ConfigError::OddPopulation(self.population_size));
        }
        if self.segments == 0 {
            return Err(ConfigError::ZeroSegments);
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ConfigError::MutationProbability(self.mutation_probability));
        }
        Ok(())
    }
}
