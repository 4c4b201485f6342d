//! Population quality metrics (KPIs).
//!
//! Summarizes a population for reporting and per-generation logging.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Average objectives | Per-objective mean over the population |
//! | Best objectives | Per-objective minimum over the population |
//! | Feasible count | Individuals with zero constraint violation |
//! | Mean unassigned | Mean number of unassigned tasks |
//! | Mean useless nodes | Mean number of nodes hosting no task |

use serde::Serialize;

use crate::models::{Individual, Objectives, OBJECTIVE_COUNT};

/// Population performance indicators.
///
/// Objective order is spread, uniqueness, power, imbalance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationKpi {
    pub size: usize,
    pub average_objectives: Objectives,
    pub best_objectives: Objectives,
    pub feasible_count: usize,
    pub mean_unassigned: f64,
    pub mean_useless_nodes: f64,
}

impl PopulationKpi {
    /// Computes KPIs over a population. An empty population yields zeros.
    pub fn calculate(population: &[Individual]) -> Self {
        let size = population.len();
        if size == 0 {
            return Self {
                size,
                average_objectives: [0.0; OBJECTIVE_COUNT],
                best_objectives: [0.0; OBJECTIVE_COUNT],
                feasible_count: 0,
                mean_unassigned: 0.0,
                mean_useless_nodes: 0.0,
            };
        }

        let mut sum = [0.0; OBJECTIVE_COUNT];
        let mut best = [f64::INFINITY; OBJECTIVE_COUNT];
        let mut feasible_count = 0;
        let mut unassigned = 0usize;
        let mut useless = 0usize;

        for ind in population {
            for m in 0..OBJECTIVE_COUNT {
                sum[m] += ind.objectives[m];
                best[m] = best[m].min(ind.objectives[m]);
            }
            if ind.feasible {
                feasible_count += 1;
            }
            unassigned += ind.unassigned_count;
            useless += ind.useless_node_count;
        }

        let n = size as f64;
        Self {
            size,
            average_objectives: sum.map(|s| s / n),
            best_objectives: best,
            feasible_count,
            mean_unassigned: unassigned as f64 / n,
            mean_useless_nodes: useless as f64 / n,
        }
    }

    /// Fraction of feasible individuals (0.0..1.0).
    pub fn feasible_rate(&self) -> f64 {
        if self.size == 0 {
            0.0
        } else {
            self.feasible_count as f64 / self.size as f64
        }
    }
}
