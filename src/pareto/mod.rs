//! Pareto ranking.
//!
//! - [`fast_non_dominated_sort`]: constrained-dominance fronts (Deb et al., 2002)
//! - [`assign_crowding_distance`]: diversity measure within one front
//!
//! # Reference
//! Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II",
//! IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod crowding;
mod sort;

pub use crowding::assign_crowding_distance;
pub use sort::fast_non_dominated_sort;
