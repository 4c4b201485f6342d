//! Assignment-vector encoding: construction, crossover and mutation moves.
//!
//! # Encoding
//!
//! The chromosome is [`Individual::assignment`]: one gene per task in
//! canonical order, holding a node index or `None` (unassigned). Every
//! operator here re-evaluates the individual before returning.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Individual, Problem, Resources};

/// Greedy-fit seeding.
///
/// Shuffles the node order, then places each task (canonical order) on the
/// first node in that order whose working capacity still covers it. Tasks
/// that fit nowhere stay unassigned.
pub fn greedy_fit_individual<R: Rng>(problem: &Problem, rng: &mut R) -> Individual {
    let mut order: Vec<usize> = (0..problem.node_count()).collect();
    order.shuffle(rng);

    let mut remaining: Vec<Resources> = problem.nodes().iter().map(|n| n.capacity).collect();
    let assignment = problem
        .tasks()
        .iter()
        .map(|task| {
            let n = order
                .iter()
                .copied()
                .find(|&n| remaining[n].covers(&task.required))?;
            remaining[n] = remaining[n] - task.required;
            Some(n)
        })
        .collect();

    Individual::from_assignment(problem, assignment)
}

/// Uniform seeding: every task on a uniformly random node, fit ignored.
pub fn uniform_individual<R: Rng>(problem: &Problem, rng: &mut R) -> Individual {
    let node_count = problem.node_count();
    let assignment = (0..problem.task_count())
        .map(|_| Some(rng.random_range(0..node_count)))
        .collect();
    Individual::from_assignment(problem, assignment)
}

/// One-point crossover.
///
/// Draws a cut in `[0, task_count)`. Genes before the cut come from
/// `first`, genes at and after it from `second`.
pub fn one_point_crossover<R: Rng>(
    problem: &Problem,
    first: &Individual,
    second: &Individual,
    rng: &mut R,
) -> Individual {
    let cut = rng.random_range(0..problem.task_count());
    let assignment = first.assignment[..cut]
        .iter()
        .chain(&second.assignment[cut..])
        .copied()
        .collect();
    Individual::from_assignment(problem, assignment)
}

/// Moves one random task to one random node.
pub fn reassign_mutation<R: Rng>(individual: &mut Individual, problem: &Problem, rng: &mut R) {
    let t = rng.random_range(0..problem.task_count());
    let n = rng.random_range(0..problem.node_count());
    individual.assignment[t] = Some(n);
    individual.recompute(problem);
}

/// Exchanges the nodes of two random tasks.
pub fn swap_mutation<R: Rng>(individual: &mut Individual, problem: &Problem, rng: &mut R) {
    let i = rng.random_range(0..problem.task_count());
    let j = rng.random_range(0..problem.task_count());
    individual.assignment.swap(i, j);
    individual.recompute(problem);
}

/// Unassigns one random assigned task. No-op if nothing is assigned.
pub fn unassign_mutation<R: Rng>(individual: &mut Individual, problem: &Problem, rng: &mut R) {
    let assigned: Vec<usize> = (0..individual.assignment.len())
        .filter(|&t| individual.assignment[t].is_some())
        .collect();
    if assigned.is_empty() {
        return;
    }
    let t = assigned[rng.random_range(0..assigned.len())];
    individual.assignment[t] = None;
    individual.recompute(problem);
}

/// Places one random unassigned task on a random node. No-op if every task
/// is assigned.
pub fn assign_unassigned_mutation<R: Rng>(
    individual: &mut Individual,
    problem: &Problem,
    rng: &mut R,
) {
    let unassigned: Vec<usize> = (0..individual.assignment.len())
        .filter(|&t| individual.assignment[t].is_none())
        .collect();
    if unassigned.is_empty() {
        return;
    }
    let t = unassigned[rng.random_range(0..unassigned.len())];
    individual.assignment[t] = Some(rng.random_range(0..problem.node_count()));
    individual.recompute(problem);
}
