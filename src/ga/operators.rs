//! Configurable genetic operators for placement.
//!
//! [`GeneticOperators`] bundles seeding, crossover and the banded mutation
//! scheme behind one value built from [`Nsga3Config`].
//!
//! # Usage
//!
//! ```
//! use u_placement::ga::operators::GeneticOperators;
//! use u_placement::config::SeedingStrategy;
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.seeding, SeedingStrategy::GreedyFit);
//! assert!((ops.mutation_probability - 0.5).abs() < 1e-12);
//! ```

use rand::Rng;

use super::chromosome::{
    assign_unassigned_mutation, greedy_fit_individual, one_point_crossover, reassign_mutation,
    swap_mutation, uniform_individual, unassign_mutation,
};
use crate::config::{Nsga3Config, SeedingStrategy};
use crate::models::{Individual, Problem};

/// A single mutation move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMove {
    /// Move one random task to one random node.
    Reassign,
    /// Exchange the nodes of two random tasks.
    Swap,
    /// Unassign one assigned task (only applied to infeasible individuals).
    Unassign,
    /// Assign one unassigned task (only applied when some exist).
    AssignUnassigned,
}

impl MutationMove {
    /// Maps a uniform draw in `[0, 1)` to a move.
    ///
    /// | Draw | Move |
    /// |------|------|
    /// | [0, .25) | Reassign |
    /// | [.25, .5) | Swap |
    /// | [.5, .51) | Unassign, if infeasible |
    /// | [.51, 1) | AssignUnassigned, if any task is unassigned |
    ///
    /// Returns `None` when the band's precondition fails.
    pub fn from_draw(draw: f64, individual: &Individual) -> Option<Self> {
        if draw < 0.25 {
            Some(Self::Reassign)
        } else if draw < 0.5 {
            Some(Self::Swap)
        } else if draw < 0.51 {
            (!individual.feasible).then_some(Self::Unassign)
        } else {
            (individual.unassigned_count > 0).then_some(Self::AssignUnassigned)
        }
    }
}

/// Seeding, crossover and mutation for one run.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    pub seeding: SeedingStrategy,
    /// Probability that an offspring goes through [`mutate`](Self::mutate).
    pub mutation_probability: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            seeding: SeedingStrategy::GreedyFit,
            mutation_probability: 0.5,
        }
    }
}

impl From<&Nsga3Config> for GeneticOperators {
    fn from(config: &Nsga3Config) -> Self {
        Self {
            seeding: config.seeding,
            mutation_probability: config.mutation_probability,
        }
    }
}

impl GeneticOperators {
    /// Creates one individual with the configured seeding strategy.
    pub fn create_individual<R: Rng>(&self, problem: &Problem, rng: &mut R) -> Individual {
        match self.seeding {
            SeedingStrategy::GreedyFit => greedy_fit_individual(problem, rng),
            SeedingStrategy::Uniform => uniform_individual(problem, rng),
        }
    }

    /// Creates `size` individuals.
    pub fn create_population<R: Rng>(
        &self,
        problem: &Problem,
        size: usize,
        rng: &mut R,
    ) -> Vec<Individual> {
        (0..size).map(|_| self.create_individual(problem, rng)).collect()
    }

    /// One-point crossover of two parents into a single evaluated child.
    pub fn reproduce<R: Rng>(
        &self,
        problem: &Problem,
        first: &Individual,
        second: &Individual,
        rng: &mut R,
    ) -> Individual {
        one_point_crossover(problem, first, second, rng)
    }

    /// Applies at most one move, chosen by [`MutationMove::from_draw`].
    ///
    /// Returns the move applied, if any.
    pub fn mutate<R: Rng>(
        &self,
        individual: &mut Individual,
        problem: &Problem,
        rng: &mut R,
    ) -> Option<MutationMove> {
        let draw: f64 = rng.random();
        let mv = MutationMove::from_draw(draw, individual)?;
        match mv {
            MutationMove::Reassign => reassign_mutation(individual, problem, rng),
            MutationMove::Swap => swap_mutation(individual, problem, rng),
            MutationMove::Unassign => unassign_mutation(individual, problem, rng),
            MutationMove::AssignUnassigned => assign_unassigned_mutation(individual, problem, rng),
        }
        Some(mv)
    }

    /// Mutates with probability [`mutation_probability`](Self::mutation_probability).
    pub fn maybe_mutate<R: Rng>(
        &self,
        individual: &mut Individual,
        problem: &Problem,
        rng: &mut R,
    ) -> Option<MutationMove> {
        if rng.random_bool(self.mutation_probability) {
            self.mutate(individual, problem, rng)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Task};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_problem() -> Problem {
        Problem::new(
            vec![Node::new("N1", 2.0, 2.0), Node::new("N2", 2.0, 2.0)],
            vec![
                Task::new("T1").with_required(1.0, 1.0),
                Task::new("T2").with_required(1.0, 1.0),
                Task::new("T3").with_required(3.0, 3.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_move_bands() {
        let p = sample_problem();
        let feasible_partial = Individual::from_assignment(&p, vec![Some(0), Some(1), None]);
        let infeasible_full = Individual::from_assignment(&p, vec![Some(0), Some(0), Some(0)]);
        assert!(feasible_partial.feasible);
        assert!(!infeasible_full.feasible);

        assert_eq!(
            MutationMove::from_draw(0.1, &feasible_partial),
            Some(MutationMove::Reassign)
        );
        assert_eq!(
            MutationMove::from_draw(0.3, &feasible_partial),
            Some(MutationMove::Swap)
        );
        assert_eq!(MutationMove::from_draw(0.505, &feasible_partial), None);
        assert_eq!(
            MutationMove::from_draw(0.505, &infeasible_full),
            Some(MutationMove::Unassign)
        );
        assert_eq!(
            MutationMove::from_draw(0.9, &feasible_partial),
            Some(MutationMove::AssignUnassigned)
        );
        assert_eq!(MutationMove::from_draw(0.9, &infeasible_full), None);
    }

    #[test]
    fn test_band_edges() {
        let p = sample_problem();
        let ind = Individual::from_assignment(&p, vec![Some(0), Some(1), None]);
        assert_eq!(MutationMove::from_draw(0.0, &ind), Some(MutationMove::Reassign));
        assert_eq!(MutationMove::from_draw(0.25, &ind), Some(MutationMove::Swap));
        assert_eq!(
            MutationMove::from_draw(0.51, &ind),
            Some(MutationMove::AssignUnassigned)
        );
    }

    #[test]
    fn test_create_population() {
        let p = sample_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let ops = GeneticOperators::default();
        let pop = ops.create_population(&p, 10, &mut rng);
        assert_eq!(pop.len(), 10);
        // T3 never fits under greedy seeding.
        assert!(pop.iter().all(|ind| ind.assignment[2].is_none() && ind.feasible));

        let uniform = GeneticOperators {
            seeding: SeedingStrategy::Uniform,
            ..GeneticOperators::default()
        };
        let pop = uniform.create_population(&p, 10, &mut rng);
        assert!(pop.iter().all(|ind| ind.unassigned_count == 0));
    }

    #[test]
    fn test_mutate_recomputes() {
        let p = sample_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let ops = GeneticOperators::default();
        let base = Individual::from_assignment(&p, vec![Some(0), Some(1), None]);

        let mut applied = 0;
        for _ in 0..100 {
            let mut ind = base.clone();
            if ops.mutate(&mut ind, &p, &mut rng).is_some() {
                applied += 1;
            }
            let fresh = Individual::from_assignment(&p, ind.assignment.clone());
            assert_eq!(ind.objectives, fresh.objectives);
            assert_eq!(ind.feasible, fresh.feasible);
        }
        assert!(applied > 0);
    }

    #[test]
    fn test_mutation_probability_zero_never_mutates() {
        let p = sample_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let ops = GeneticOperators {
            mutation_probability: 0.0,
            ..GeneticOperators::default()
        };
        let mut ind = Individual::from_assignment(&p, vec![Some(0), Some(1), None]);
        for _ in 0..50 {
            assert_eq!(ops.maybe_mutate(&mut ind, &p, &mut rng), None);
        }
        assert_eq!(ind.assignment, vec![Some(0), Some(1), None]);
    }

    #[test]
    fn test_from_config() {
        let config = Nsga3Config::default()
            .with_seeding(SeedingStrategy::Uniform)
            .with_mutation_probability(0.2);
        let ops = GeneticOperators::from(&config);
        assert_eq!(ops.seeding, SeedingStrategy::Uniform);
        assert!((ops.mutation_probability - 0.2).abs() < 1e-12);
    }
}
