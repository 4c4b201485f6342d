//! Placement domain models.
//!
//! Value types for the placement problem and the [`Individual`] aggregate
//! that evaluates one candidate assignment.
//!
//! # Domain Mappings
//!
//! | u-placement | Cluster | Cloud | Edge |
//! |-------------|---------|-------|------|
//! | Task | Pod/Container | VM request | Workload |
//! | Node | Worker node | Host | Gateway device |
//! | Individual | Placement plan | Packing plan | Deployment layout |

mod individual;
mod node;
mod problem;
mod resources;
mod task;

pub use individual::{Individual, NodeLoad, Objectives, OBJECTIVE_COUNT};
pub use node::Node;
pub use problem::Problem;
pub use resources::{Power, Resources};
pub use task::Task;
