//! Parent selection.
//!
//! [`TournamentPools`] makes the two-pool layout of constrained tournament
//! selection explicit: one contender is drawn from each pool.

use rand::Rng;

use crate::models::Individual;

/// Two disjoint candidate pools for constrained tournament selection.
#[derive(Debug, Clone, Copy)]
pub struct TournamentPools<'a> {
    first: &'a [Individual],
    second: &'a [Individual],
}

impl<'a> TournamentPools<'a> {
    /// Builds pools from two slices.
    ///
    /// # Panics
    /// If either pool is empty.
    pub fn new(first: &'a [Individual], second: &'a [Individual]) -> Self {
        assert!(
            !first.is_empty() && !second.is_empty(),
            "tournament pools must be non-empty"
        );
        Self { first, second }
    }

    /// Splits a population into its first and second half.
    ///
    /// With an odd size the second half holds the extra individual.
    ///
    /// # Panics
    /// If the population has fewer than 2 individuals.
    pub fn halves(population: &'a [Individual]) -> Self {
        let (first, second) = population.split_at(population.len() / 2);
        Self::new(first, second)
    }

    /// Constrained binary tournament.
    ///
    /// Draws one contender per pool. Feasible beats infeasible; between two
    /// infeasible contenders the lower violation wins; otherwise (both
    /// feasible, or equal violation) a fair coin decides.
    pub fn select<R: Rng>(&self, rng: &mut R) -> &'a Individual {
        let (first, second) = (self.first, self.second);
        let a = &first[rng.random_range(0..first.len())];
        let b = &second[rng.random_range(0..second.len())];

        match (a.feasible, b.feasible) {
            (true, false) => a,
            (false, true) => b,
            (false, false) if a.constraint_violation < b.constraint_violation => a,
            (false, false) if b.constraint_violation < a.constraint_violation => b,
            _ => {
                if rng.random_bool(0.5) {
                    a
                } else {
                    b
                }
            }
        }
    }
}

/// Crowded binary tournament.
///
/// Two uniformly random contenders; the winner is the one that is
/// [`crowded_less`](Individual::crowded_less), the second on ties. Ranks and
/// crowding distances must be current.
///
/// # Panics
/// If `population` is empty.
pub fn crowded_tournament<'a, R: Rng>(population: &'a [Individual], rng: &mut R) -> &'a Individual {
    let a = &population[rng.random_range(0..population.len())];
    let b = &population[rng.random_range(0..population.len())];
    if a.crowded_less(b) {
        a
    } else {
        b
    }
}
