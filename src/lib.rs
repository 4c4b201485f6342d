//! Multi-objective task placement with NSGA-III.
//!
//! Assigns tasks to compute nodes while minimizing four objectives at once:
//! co-location spread, per-type replica concentration, power draw and
//! CPU/memory imbalance. Capacity overcommitment is allowed during search
//! and handled by constraint dominance (feasible beats infeasible, then
//! lower violation wins).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Node`, `Task`, `Resources`, `Problem`, `Individual`
//! - **`validation`**: Input integrity checks (duplicate IDs, capacities, references)
//! - **`ga`**: Seeding, crossover, mutation and parent selection
//! - **`pareto`**: Constrained non-dominated sorting and crowding distance
//! - **`nsga3`**: Reference points, normalization, niching and the generational loop
//! - **`kpi`**: Population summaries for reporting
//!
//! # Example
//!
//! ```
//! use u_placement::{Node, Nsga3, Nsga3Config, Problem, Task};
//!
//! let problem = Problem::new(
//!     vec![
//!         Node::new("N1", 4.0, 8.0).with_power(50.0, 200.0),
//!         Node::new("N2", 8.0, 16.0).with_power(80.0, 400.0),
//!     ],
//!     vec![
//!         Task::new("web-1").with_required(1.0, 2.0).with_type("web"),
//!         Task::new("web-2").with_required(1.0, 2.0).with_type("web"),
//!         Task::new("db-1").with_required(2.0, 4.0).with_type("db"),
//!     ],
//! )
//! .unwrap();
//!
//! let config = Nsga3Config::default()
//!     .with_population_size(10)
//!     .with_generations(10);
//! let population = Nsga3::new(&problem, config).unwrap().run_seeded();
//!
//! for individual in population.iter().filter(|i| i.feasible) {
//!     let placement = individual.assignment_map(&problem);
//!     assert_eq!(placement.len(), 3);
//! }
//! ```
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Deb & Jain (2014), "An Evolutionary Many-Objective Optimization Algorithm
//!   Using Reference-Point-Based Nondominated Sorting Approach"
//! - Das & Dennis (1998), "Normal-Boundary Intersection"

pub mod config;
pub mod error;
pub mod ga;
pub mod id;
pub mod kpi;
pub mod models;
pub mod nsga3;
pub mod pareto;
pub mod validation;

pub use config::{Nsga3Config, ParentSelection, SeedingStrategy};
pub use error::{PlacementError, PlacementResult};
pub use id::{IdGenerator, SequentialIds, UlidGenerator};
pub use kpi::PopulationKpi;
pub use models::{Individual, Node, Objectives, Problem, Resources, Task, OBJECTIVE_COUNT};
pub use nsga3::{Nsga3, ReferencePoint};
