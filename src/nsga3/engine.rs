//! NSGA-III generational loop.
//!
//! # Generation
//!
//! 1. Build N offspring by parent selection, one-point crossover and
//!    optional mutation.
//! 2. Pool parents and offspring (2N) and sort into fronts.
//! 3. Accept whole fronts while they fit. If the accepted count hits N
//!    exactly, that is the next generation.
//! 4. Otherwise normalize the accepted fronts plus the crossing front,
//!    associate them with reference points, seed niche counts from the
//!    accepted members and fill the remaining slots by niching the
//!    crossing front.
//! 5. Clear selection state on the survivors.
//!
//! # Reference
//! Deb & Jain (2014), "An Evolutionary Many-Objective Optimization Algorithm
//! Using Reference-Point-Based Nondominated Sorting Approach, Part I",
//! IEEE Transactions on Evolutionary Computation, 18(4), 577-601

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::niching::{associate, count_niches, niching};
use super::normalize::normalize;
use super::reference::{generate_reference_points, ReferencePoint};
use crate::config::{Nsga3Config, ParentSelection};
use crate::error::PlacementResult;
use crate::ga::{crowded_tournament, GeneticOperators, TournamentPools};
use crate::id::{IdGenerator, UlidGenerator};
use crate::kpi::PopulationKpi;
use crate::models::{Individual, Problem, OBJECTIVE_COUNT};
use crate::pareto::{assign_crowding_distance, fast_non_dominated_sort};

/// NSGA-III placement optimizer over one problem.
///
/// # Example
///
/// ```
/// use u_placement::models::{Node, Problem, Task};
/// use u_placement::config::Nsga3Config;
/// use u_placement::nsga3::Nsga3;
///
/// let problem = Problem::new(
///     vec![Node::new("N1", 4.0, 8.0), Node::new("N2", 4.0, 8.0)],
///     vec![
///         Task::new("web-1").with_required(1.0, 2.0).with_type("web"),
///         Task::new("db-1").with_required(2.0, 4.0).with_type("db"),
///     ],
/// )
/// .unwrap();
/// let config = Nsga3Config::default()
///     .with_population_size(8)
///     .with_generations(5);
///
/// let population = Nsga3::new(&problem, config).unwrap().run_seeded();
/// assert_eq!(population.len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Nsga3<'p> {
    problem: &'p Problem,
    config: Nsga3Config,
    operators: GeneticOperators,
}

impl<'p> Nsga3<'p> {
    /// Creates an optimizer after validating `config`.
    pub fn new(problem: &'p Problem, config: Nsga3Config) -> PlacementResult<Self> {
        config.validate()?;
        let operators = GeneticOperators::from(&config);
        Ok(Self {
            problem,
            config,
            operators,
        })
    }

    pub fn problem(&self) -> &Problem {
        self.problem
    }

    pub fn config(&self) -> &Nsga3Config {
        &self.config
    }

    /// Initial population of `population_size` seeded individuals.
    pub fn initial_population<R: Rng>(&self, rng: &mut R) -> Vec<Individual> {
        self.operators
            .create_population(self.problem, self.config.population_size, rng)
    }

    /// Runs the fixed number of generations and returns the last population.
    pub fn run<R, G>(&self, rng: &mut R, ids: &mut G) -> Vec<Individual>
    where
        R: Rng,
        G: IdGenerator + ?Sized,
    {
        info!(
            nodes = self.problem.node_count(),
            tasks = self.problem.task_count(),
            population = self.config.population_size,
            generations = self.config.generations,
            segments = self.config.segments,
            "nsga3 run started"
        );

        let mut population = self.initial_population(rng);
        for generation in 0..self.config.generations {
            let mut refs = generate_reference_points(OBJECTIVE_COUNT, self.config.segments, ids);
            population = self.next_generation(population, &mut refs, rng);

            let kpi = PopulationKpi::calculate(&population);
            debug!(
                generation,
                feasible = kpi.feasible_count,
                best_spread = kpi.best_objectives[0],
                best_uniqueness = kpi.best_objectives[1],
                best_power = kpi.best_objectives[2],
                best_imbalance = kpi.best_objectives[3],
                mean_unassigned = kpi.mean_unassigned,
                "generation complete"
            );
        }

        let kpi = PopulationKpi::calculate(&population);
        info!(
            feasible = kpi.feasible_count,
            population = population.len(),
            mean_unassigned = kpi.mean_unassigned,
            "nsga3 run finished"
        );
        population
    }

    /// [`run`](Self::run) with a `SmallRng` seeded from the config and ULID
    /// reference-point ids.
    pub fn run_seeded(&self) -> Vec<Individual> {
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        self.run(&mut rng, &mut UlidGenerator)
    }

    /// Builds `population_size` offspring from `parents`.
    ///
    /// With [`ParentSelection::Crowded`] the parents' ranks and crowding
    /// distances are recomputed first.
    pub fn offspring<R: Rng>(&self, parents: &mut [Individual], rng: &mut R) -> Vec<Individual> {
        let n = self.config.population_size;
        let mut children = Vec::with_capacity(n);

        match self.config.parent_selection {
            ParentSelection::ConstrainedTournament => {
                let pools = TournamentPools::halves(parents);
                for _ in 0..n {
                    let first = pools.select(rng);
                    let second = pools.select(rng);
                    children.push(self.operators.reproduce(self.problem, first, second, rng));
                }
            }
            ParentSelection::Crowded => {
                for front in fast_non_dominated_sort(parents) {
                    assign_crowding_distance(parents, &front);
                }
                let parents: &[Individual] = parents;
                for _ in 0..n {
                    let first = crowded_tournament(parents, rng);
                    let second = crowded_tournament(parents, rng);
                    children.push(self.operators.reproduce(self.problem, first, second, rng));
                }
            }
        }

        for child in &mut children {
            self.operators.maybe_mutate(child, self.problem, rng);
        }
        children
    }

    /// One generation: offspring, then [`environmental_selection`](Self::environmental_selection)
    /// over parents and offspring.
    ///
    /// Returns `population_size` individuals with cleared selection state.
    /// Niche counts on `refs` are overwritten.
    pub fn next_generation<R: Rng>(
        &self,
        mut parents: Vec<Individual>,
        refs: &mut [ReferencePoint],
        rng: &mut R,
    ) -> Vec<Individual> {
        let offspring = self.offspring(&mut parents, rng);
        let mut pool = parents;
        pool.extend(offspring);
        self.environmental_selection(pool, refs, rng)
    }

    /// Keeps `population_size` members of `pool`.
    ///
    /// Whole fronts are accepted while they fit. Landing exactly on
    /// `population_size` ends selection without normalization. Otherwise
    /// the first front that does not fit is niched against `refs`; if
    /// niching comes up short, the remaining slots take the crossing front's
    /// leftover members in front order.
    ///
    /// Survivors come back with cleared selection state.
    pub fn environmental_selection<R: Rng>(
        &self,
        mut pool: Vec<Individual>,
        refs: &mut [ReferencePoint],
        rng: &mut R,
    ) -> Vec<Individual> {
        let n = self.config.population_size;
        let fronts = fast_non_dominated_sort(&mut pool);

        let mut survivors: Vec<usize> = Vec::with_capacity(n);
        let mut crossing = None;
        for front in &fronts {
            if survivors.len() + front.len() <= n {
                survivors.extend_from_slice(front);
                if survivors.len() == n {
                    break;
                }
            } else {
                crossing = Some(front);
                break;
            }
        }

        if let Some(last_front) = crossing {
            let mut overflow = survivors.clone();
            overflow.extend_from_slice(last_front);

            let normalization = normalize(&mut pool, &overflow);
            if normalization.fell_back {
                debug!(intercepts = ?normalization.intercepts, "diagonal intercepts in use");
            }
            associate(&mut pool, &overflow, refs);
            count_niches(&pool, &survivors, refs);

            let k = n - survivors.len();
            let picked = niching(k, &pool, last_front, refs, rng);
            let shortfall = k - picked.len();
            if shortfall > 0 {
                let leftovers: Vec<usize> = last_front
                    .iter()
                    .copied()
                    .filter(|i| !picked.contains(i))
                    .take(shortfall)
                    .collect();
                debug!(shortfall, "filling from crossing front");
                survivors.extend(picked);
                survivors.extend(leftovers);
            } else {
                survivors.extend(picked);
            }
        }

        let mut slots: Vec<Option<Individual>> = pool.into_iter().map(Some).collect();
        let mut next: Vec<Individual> = survivors
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect();
        for individual in &mut next {
            individual.reset_selection_state();
        }
        next
    }
}
