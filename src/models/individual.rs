//! Candidate placement and its evaluation.
//!
//! An [`Individual`] is one task → node assignment plus everything derived
//! from it: per-node loads, the four objective values, constraint violation,
//! and the bookkeeping fields that sorting and niching write into.
//!
//! # Objectives (all minimized)
//!
//! | # | Objective | Per-node term |
//! |---|-----------|---------------|
//! | 0 | Spread | T(k), k = tasks on the node |
//! | 1 | Uniqueness | Σ over types of T(replicas of that type) |
//! | 2 | Power | idle + (max − idle) × memory utilization |
//! | 3 | Imbalance | mean of \|cpu left fraction − memory left fraction\| |
//!
//! T(k) = k(k+1)/2 is the triangular number.
//!
//! # Constraint handling
//!
//! Overcommitting a node is allowed. The overcommitted amount is summed into
//! `constraint_violation` and [`Individual::constraint_dominates`] ranks
//! infeasible candidates behind feasible ones.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::{Problem, Resources};

/// Number of objectives evaluated for every individual.
pub const OBJECTIVE_COUNT: usize = 4;

/// Fixed-size objective vector.
pub type Objectives = [f64; OBJECTIVE_COUNT];

/// Working view of one node inside an individual.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeLoad {
    /// Indices of the tasks placed on the node.
    pub tasks: Vec<usize>,
    /// Capacity minus the requirements of `tasks`. May be negative.
    pub remaining: Resources,
}

/// One candidate placement.
///
/// `assignment[t]` is the node index of task `t`, or `None` if the task is
/// unassigned. Every field below `assignment` is derived; call
/// [`recompute`](Self::recompute) after editing the assignment.
#[derive(Debug, Clone, Serialize)]
pub struct Individual {
    /// Task index → node index.
    pub assignment: Vec<Option<usize>>,
    /// Per-node loads, parallel to [`Problem::nodes`].
    pub loads: Vec<NodeLoad>,
    pub objectives: Objectives,
    /// Objectives minus the ideal point of the last normalization.
    pub translated: Objectives,
    pub normalized: Objectives,
    pub feasible: bool,
    pub constraint_violation: f64,
    pub unassigned_count: usize,
    /// Nodes hosting no task.
    pub useless_node_count: usize,

    /// Pareto rank (0 = first front).
    pub rank: usize,
    pub crowding_distance: f64,
    /// Pool indices of the individuals this one constraint-dominates.
    pub dominated: Vec<usize>,
    /// How many individuals in the pool constraint-dominate this one.
    pub domination_count: usize,

    /// Index of the associated reference point.
    pub reference_point: Option<usize>,
    pub perpendicular_distance: f64,
}

impl Individual {
    /// Builds an individual from an assignment and evaluates it.
    ///
    /// # Panics
    /// If `assignment.len()` differs from the problem's task count.
    pub fn from_assignment(problem: &Problem, assignment: Vec<Option<usize>>) -> Self {
        assert_eq!(
            assignment.len(),
            problem.task_count(),
            "assignment must hold one entry per task"
        );

        let mut individual = Self {
            assignment,
            loads: vec![NodeLoad::default(); problem.node_count()],
            objectives: [0.0; OBJECTIVE_COUNT],
            translated: [0.0; OBJECTIVE_COUNT],
            normalized: [0.0; OBJECTIVE_COUNT],
            feasible: true,
            constraint_violation: 0.0,
            unassigned_count: 0,
            useless_node_count: 0,
            rank: 0,
            crowding_distance: 0.0,
            dominated: Vec::new(),
            domination_count: 0,
            reference_point: None,
            perpendicular_distance: 0.0,
        };
        individual.recompute(problem);
        individual
    }

    /// Re-derives loads, objectives, violation and feasibility from the
    /// assignment.
    pub fn recompute(&mut self, problem: &Problem) {
        self.compute_loads(problem);

        self.unassigned_count = self.assignment.iter().filter(|a| a.is_none()).count();
        self.useless_node_count = self.loads.iter().filter(|l| l.tasks.is_empty()).count();

        self.objectives = [
            self.spread_cost(),
            self.uniqueness_cost(problem),
            self.power(problem),
            self.resource_imbalance(problem),
        ];

        self.constraint_violation = self.loads.iter().map(|l| l.remaining.overcommit()).sum();
        self.feasible = self.constraint_violation == 0.0;
    }

    fn compute_loads(&mut self, problem: &Problem) {
        self.loads.resize_with(problem.node_count(), NodeLoad::default);
        for (load, node) in self.loads.iter_mut().zip(problem.nodes()) {
            load.tasks.clear();
            load.remaining = node.capacity;
        }

        let tasks = problem.tasks();
        for (t, node) in self.assignment.iter().enumerate() {
            if let Some(n) = *node {
                let load = &mut self.loads[n];
                load.tasks.push(t);
                load.remaining = load.remaining - tasks[t].required;
            }
        }
    }

    fn spread_cost(&self) -> f64 {
        self.loads.iter().map(|l| triangular(l.tasks.len())).sum()
    }

    fn uniqueness_cost(&self, problem: &Problem) -> f64 {
        let tasks = problem.tasks();
        self.loads
            .iter()
            .map(|load| {
                let mut replicas: HashMap<&str, usize> = HashMap::new();
                for &t in &load.tasks {
                    *replicas.entry(tasks[t].task_type.as_str()).or_insert(0) += 1;
                }
                replicas.values().map(|&r| triangular(r)).sum::<f64>()
            })
            .sum()
    }

    fn power(&self, problem: &Problem) -> f64 {
        self.loads
            .iter()
            .zip(problem.nodes())
            .map(|(load, node)| node.power.draw_at(node.memory_utilization(&load.remaining)))
            .sum()
    }

    fn resource_imbalance(&self, problem: &Problem) -> f64 {
        if self.loads.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .loads
            .iter()
            .zip(problem.nodes())
            .map(|(load, node)| node.imbalance(&load.remaining))
            .sum();
        total / self.loads.len() as f64
    }

    /// Number of tasks whose node differs from the problem's prior placement.
    ///
    /// Reserved: this is not part of the objective vector.
    pub fn reassignment_difference(&self, problem: &Problem) -> usize {
        problem
            .original_assignment()
            .iter()
            .filter(|&&(t, node)| self.assignment[t] != node)
            .count()
    }

    /// Pareto dominance under minimization.
    ///
    /// `self` dominates `other` iff it is no worse in every objective and
    /// strictly better in at least one.
    pub fn dominates(&self, other: &Individual) -> bool {
        let mut strictly_better = false;
        for (a, b) in self.objectives.iter().zip(&other.objectives) {
            if a > b {
                return false;
            }
            if a < b {
                strictly_better = true;
            }
        }
        strictly_better
    }

    /// Constrained dominance.
    ///
    /// Feasible beats infeasible; between two infeasible candidates the lower
    /// violation wins; between two feasible ones Pareto dominance decides.
    pub fn constraint_dominates(&self, other: &Individual) -> bool {
        match (self.feasible, other.feasible) {
            (true, false) => true,
            (false, true) => false,
            (false, false) => self.constraint_violation < other.constraint_violation,
            (true, true) => self.dominates(other),
        }
    }

    /// Crowded-comparison operator: lower rank wins, then larger crowding
    /// distance.
    pub fn crowded_less(&self, other: &Individual) -> bool {
        self.rank < other.rank
            || (self.rank == other.rank && self.crowding_distance > other.crowding_distance)
    }

    /// Clears rank, dominance and niching state ahead of the next sort.
    pub fn reset_selection_state(&mut self) {
        self.rank = 0;
        self.crowding_distance = 0.0;
        self.dominated.clear();
        self.domination_count = 0;
        self.reference_point = None;
        self.perpendicular_distance = 0.0;
    }

    /// Per-node working view, parallel to [`Problem::nodes`].
    pub fn node_loads(&self) -> &[NodeLoad] {
        &self.loads
    }

    /// Node index of a task.
    #[inline]
    pub fn node_of(&self, task: usize) -> Option<usize> {
        self.assignment.get(task).copied().flatten()
    }

    /// Task id → node id view of the assignment.
    pub fn assignment_map<'p>(&self, problem: &'p Problem) -> BTreeMap<&'p str, Option<&'p str>> {
        problem
            .tasks()
            .iter()
            .zip(&self.assignment)
            .map(|(task, node)| {
                (
                    task.id.as_str(),
                    node.map(|n| problem.nodes()[n].id.as_str()),
                )
            })
            .collect()
    }
}

#[inline]
fn triangular(k: usize) -> f64 {
    (k * (k + 1) / 2) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Task};
    use proptest::prelude::*;

    fn single_node_problem() -> Problem {
        Problem::new(
            vec![Node::new("N1", 4.0, 8.0).with_power(100.0, 200.0)],
            vec![
                Task::new("T1").with_required(1.0, 1.0).with_type("web"),
                Task::new("T2").with_required(2.0, 2.0).with_type("web"),
                Task::new("T3").with_required(1.0, 1.0).with_type("web"),
            ],
        )
        .unwrap()
    }

    fn with_objectives(objectives: Objectives) -> Individual {
        let problem = single_node_problem();
        let mut ind = Individual::from_assignment(&problem, vec![None; 3]);
        ind.objectives = objectives;
        ind
    }

    #[test]
    fn test_single_node_evaluation() {
        let problem = single_node_problem();
        let ind = Individual::from_assignment(&problem, vec![Some(0); 3]);

        assert_eq!(ind.loads[0].remaining, Resources::new(0.0, 4.0));
        assert!(ind.feasible);
        assert!((ind.constraint_violation - 0.0).abs() < 1e-10);
        assert!((ind.objectives[0] - 6.0).abs() < 1e-10); // 1 + 2 + 3
        assert!((ind.objectives[1] - 6.0).abs() < 1e-10); // one type, 3 replicas
        // 100 + 100 * (8 - 4) / 8
        assert!((ind.objectives[2] - 150.0).abs() < 1e-10);
        // |0/4 - 4/8|
        assert!((ind.objectives[3] - 0.5).abs() < 1e-10);
        assert_eq!(ind.unassigned_count, 0);
        assert_eq!(ind.useless_node_count, 0);
    }

    #[test]
    fn test_overcommit_is_infeasible() {
        let problem = Problem::new(
            vec![Node::new("N1", 1.0, 1.0)],
            vec![Task::new("T1").with_required(2.0, 2.0)],
        )
        .unwrap();
        let ind = Individual::from_assignment(&problem, vec![Some(0)]);

        assert_eq!(ind.loads[0].remaining, Resources::new(-1.0, -1.0));
        assert!(!ind.feasible);
        assert!((ind.constraint_violation - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_uniqueness_counts_per_type() {
        let problem = Problem::new(
            vec![Node::new("N1", 8.0, 8.0), Node::new("N2", 8.0, 8.0)],
            vec![
                Task::new("A1").with_type("a"),
                Task::new("A2").with_type("a"),
                Task::new("B1").with_type("b"),
                Task::new("A3").with_type("a"),
            ],
        )
        .unwrap();
        // N1: a, a, b   N2: a
        let ind = Individual::from_assignment(&problem, vec![Some(0), Some(0), Some(0), Some(1)]);
        // spread: T(3) + T(1) = 7
        assert!((ind.objectives[0] - 7.0).abs() < 1e-10);
        // uniqueness: N1 T(2)+T(1) = 4, N2 T(1) = 1
        assert!((ind.objectives[1] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_unassigned_and_useless_counts() {
        let problem = Problem::new(
            vec![Node::new("N1", 4.0, 4.0), Node::new("N2", 4.0, 4.0)],
            vec![Task::new("T1"), Task::new("T2")],
        )
        .unwrap();
        let ind = Individual::from_assignment(&problem, vec![Some(1), None]);
        assert_eq!(ind.unassigned_count, 1);
        assert_eq!(ind.useless_node_count, 1);
        assert_eq!(ind.node_of(0), Some(1));
        assert_eq!(ind.node_of(1), None);
    }

    #[test]
    fn test_recompute_after_edit() {
        let problem = single_node_problem();
        let mut ind = Individual::from_assignment(&problem, vec![Some(0); 3]);
        ind.assignment[1] = None;
        ind.recompute(&problem);

        assert_eq!(ind.loads[0].tasks, vec![0, 2]);
        assert_eq!(ind.loads[0].remaining, Resources::new(2.0, 6.0));
        assert!((ind.objectives[0] - 3.0).abs() < 1e-10);
        assert_eq!(ind.unassigned_count, 1);
    }

    #[test]
    fn test_dominates() {
        let a = with_objectives([1.0, 1.0, 1.0, 1.0]);
        let b = with_objectives([1.0, 2.0, 1.0, 1.0]);
        let c = with_objectives([0.0, 3.0, 1.0, 1.0]);

        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
    }

    #[test]
    fn test_constraint_dominates() {
        let mut feasible = with_objectives([5.0, 5.0, 5.0, 5.0]);
        feasible.feasible = true;
        let mut light = with_objectives([1.0, 1.0, 1.0, 1.0]);
        light.feasible = false;
        light.constraint_violation = 1.0;
        let mut heavy = with_objectives([0.0, 0.0, 0.0, 0.0]);
        heavy.feasible = false;
        heavy.constraint_violation = 3.0;

        assert!(feasible.constraint_dominates(&light));
        assert!(!light.constraint_dominates(&feasible));
        assert!(light.constraint_dominates(&heavy));
        assert!(!heavy.constraint_dominates(&light));
        assert!(!heavy.constraint_dominates(&heavy));
    }

    #[test]
    fn test_crowded_less() {
        let mut a = with_objectives([0.0; OBJECTIVE_COUNT]);
        let mut b = a.clone();
        a.rank = 0;
        b.rank = 1;
        assert!(a.crowded_less(&b));
        b.rank = 0;
        a.crowding_distance = 1.0;
        b.crowding_distance = 2.0;
        assert!(b.crowded_less(&a));
        assert!(!a.crowded_less(&b));
    }

    #[test]
    fn test_reassignment_difference() {
        let original: HashMap<String, Option<String>> = [
            ("T1".to_string(), Some("N1".to_string())),
            ("T2".to_string(), None),
        ]
        .into_iter()
        .collect();
        let problem = single_node_problem()
            .with_original_assignment(&original)
            .unwrap();
        let ind = Individual::from_assignment(&problem, vec![Some(0); 3]);
        // T1 unchanged, T2 moved from unassigned to N1
        assert_eq!(ind.reassignment_difference(&problem), 1);

        let no_prior = single_node_problem();
        assert_eq!(ind.reassignment_difference(&no_prior), 0);
    }

    #[test]
    fn test_reset_selection_state() {
        let mut ind = with_objectives([0.0; OBJECTIVE_COUNT]);
        ind.rank = 3;
        ind.dominated = vec![1, 2];
        ind.domination_count = 2;
        ind.reference_point = Some(4);
        ind.perpendicular_distance = 0.7;
        ind.reset_selection_state();

        assert_eq!(ind.rank, 0);
        assert!(ind.dominated.is_empty());
        assert_eq!(ind.domination_count, 0);
        assert_eq!(ind.reference_point, None);
        assert!((ind.perpendicular_distance - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_assignment_map() {
        let problem = single_node_problem();
        let ind = Individual::from_assignment(&problem, vec![Some(0), None, Some(0)]);
        let map = ind.assignment_map(&problem);
        assert_eq!(map.len(), 3);
        assert_eq!(map["T1"], Some("N1"));
        assert_eq!(map["T2"], None);
    }

    proptest! {
        #[test]
        fn prop_dominance_is_asymmetric(
            a in proptest::array::uniform4(0u8..4),
            b in proptest::array::uniform4(0u8..4),
        ) {
            let x = with_objectives(a.map(f64::from));
            let y = with_objectives(b.map(f64::from));
            prop_assert!(!x.dominates(&x));
            prop_assert!(!(x.dominates(&y) && y.dominates(&x)));
            prop_assert!(!(x.constraint_dominates(&y) && y.constraint_dominates(&x)));
        }
    }
}
