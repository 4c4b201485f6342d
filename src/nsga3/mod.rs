//! NSGA-III: reference-point based many-objective selection.
//!
//! - [`generate_reference_points`]: simplex lattice of directions
//! - [`normalize`]: ideal point, extreme points and intercepts
//! - [`associate`] / [`niching`]: reference-point niche preservation
//! - [`Nsga3`]: the generational loop
//!
//! # Reference
//! Deb & Jain (2014), "An Evolutionary Many-Objective Optimization Algorithm
//! Using Reference-Point-Based Nondominated Sorting Approach, Part I",
//! IEEE Transactions on Evolutionary Computation, 18(4), 577-601

mod engine;
pub mod niching;
pub mod normalize;
pub mod reference;

pub use engine::Nsga3;
pub use niching::{associate, count_niches, niching, perpendicular_distance};
pub use normalize::{normalize, Normalization, SingularMatrix};
pub use reference::{generate_reference_points, ReferencePoint};
