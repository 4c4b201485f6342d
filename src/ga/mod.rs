//! Genetic operators for task placement.
//!
//! # Encoding
//!
//! One gene per task (canonical order) holding a node index or `None`.
//! Every operator re-evaluates the individual it produces or edits.
//!
//! # Submodules
//!
//! - [`operators`]: Seeding/mutation configuration and the banded mutation scheme
//! - [`selection`]: Constrained and crowded binary tournaments
//!
//! # Reference
//! Deb & Jain (2014), "An Evolutionary Many-Objective Optimization Algorithm
//! Using Reference-Point-Based Nondominated Sorting Approach, Part I/II"

mod chromosome;
pub mod operators;
pub mod selection;

pub use chromosome::{
    assign_unassigned_mutation, greedy_fit_individual, one_point_crossover, reassign_mutation,
    swap_mutation, unassign_mutation, uniform_individual,
};
pub use operators::{GeneticOperators, MutationMove};
pub use selection::{crowded_tournament, TournamentPools};
