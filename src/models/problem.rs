//! Problem instance: the immutable nodes and tasks of one run.
//!
//! Tasks and nodes keep their input order; that order is the canonical
//! order used by crossover cut points and greedy seeding. Individuals
//! refer to tasks and nodes by index into these vectors.

use std::collections::HashMap;

use super::{Node, Task};
use crate::error::{PlacementError, PlacementResult};
use crate::validation::{validate_input, validate_original_assignment};

/// Nodes, tasks and lookup tables for one optimization run.
#[derive(Debug, Clone)]
pub struct Problem {
    nodes: Vec<Node>,
    tasks: Vec<Task>,
    node_index: HashMap<String, usize>,
    task_index: HashMap<String, usize>,
    /// Prior placement as (task index, node index) pairs.
    original_assignment: Vec<(usize, Option<usize>)>,
}

impl Problem {
    /// Builds a problem after validating the input.
    ///
    /// # Errors
    /// [`PlacementError::InvalidInput`] carrying every detected issue.
    pub fn new(nodes: Vec<Node>, tasks: Vec<Task>) -> PlacementResult<Self> {
        validate_input(&nodes, &tasks).map_err(PlacementError::InvalidInput)?;

        let node_index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        let task_index = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        Ok(Self {
            nodes,
            tasks,
            node_index,
            task_index,
            original_assignment: Vec::new(),
        })
    }

    /// Attaches a prior placement (task id → node id, `None` = unassigned).
    ///
    /// Only the reassignment-difference evaluator reads it; it never feeds
    /// the objective vector.
    ///
    /// # Errors
    /// [`PlacementError::InvalidInput`] if the map references unknown ids.
    pub fn with_original_assignment(
        mut self,
        original: &HashMap<String, Option<String>>,
    ) -> PlacementResult<Self> {
        validate_original_assignment(&self, original).map_err(PlacementError::InvalidInput)?;

        let mut pairs: Vec<(usize, Option<usize>)> = original
            .iter()
            .filter_map(|(task_id, node_id)| {
                let t = self.task_index(task_id)?;
                let n = node_id.as_deref().and_then(|id| self.node_index(id));
                Some((t, n))
            })
            .collect();
        pairs.sort_unstable_by_key(|&(t, _)| t);
        self.original_assignment = pairs;
        Ok(self)
    }

    /// Nodes in canonical order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Tasks in canonical order.
    #[inline]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Index of a node by id.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    /// Index of a task by id.
    pub fn task_index(&self, id: &str) -> Option<usize> {
        self.task_index.get(id).copied()
    }

    /// Prior placement, empty if none was attached.
    pub fn original_assignment(&self) -> &[(usize, Option<usize>)] {
        &self.original_assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn sample() -> Problem {
        Problem::new(
            vec![Node::new("N1", 4.0, 8.0), Node::new("N2", 2.0, 4.0)],
            vec![
                Task::new("T1").with_required(1.0, 1.0),
                Task::new("T2").with_required(1.0, 2.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_indices_follow_input_order() {
        let p = sample();
        assert_eq!(p.node_count(), 2);
        assert_eq!(p.task_count(), 2);
        assert_eq!(p.node_index("N2"), Some(1));
        assert_eq!(p.task_index("T1"), Some(0));
        assert_eq!(p.task_index("missing"), None);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let err = Problem::new(vec![], vec![Task::new("T1")]).unwrap_err();
        match err {
            PlacementError::InvalidInput(errors) => {
                assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyNodes));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_original_assignment() {
        let original: HashMap<String, Option<String>> = [
            ("T2".to_string(), Some("N1".to_string())),
            ("T1".to_string(), None),
        ]
        .into_iter()
        .collect();
        let p = sample().with_original_assignment(&original).unwrap();
        assert_eq!(p.original_assignment(), &[(0, None), (1, Some(0))]);
    }

    #[test]
    fn test_original_assignment_unknown_node() {
        let original: HashMap<String, Option<String>> =
            [("T1".to_string(), Some("N9".to_string()))].into_iter().collect();
        assert!(sample().with_original_assignment(&original).is_err());
    }
}
