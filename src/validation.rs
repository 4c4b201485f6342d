//! Input validation for placement problems.
//!
//! Checks structural integrity of nodes and tasks before a run. Every
//! issue is collected; validation never stops at the first one. Detects:
//! - Duplicate IDs
//! - Empty node or task lists
//! - Non-positive node capacity (the power and imbalance objectives divide by it)
//! - Inverted power models (`max_power < idle_power`)
//! - Negative task requirements
//! - NaN or infinite capacities, power figures and requirements
//! - Prior assignments referencing unknown tasks or nodes

use std::collections::{HashMap, HashSet};

use crate::models::{Node, Problem, Task};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// No nodes were supplied.
    EmptyNodes,
    /// No tasks were supplied.
    EmptyTasks,
    /// A node has zero or negative CPU or memory capacity.
    NonPositiveCapacity,
    /// A node's max power is below its idle power.
    InvertedPower,
    /// A task requires a negative amount of a resource.
    NegativeRequirement,
    /// A capacity, power figure or requirement is NaN or infinite.
    NonFiniteValue,
    /// A prior assignment names a task that is not in the problem.
    UnknownTask,
    /// A prior assignment names a node that is not in the problem.
    UnknownNode,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates the nodes and tasks of a placement problem.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(nodes: &[Node], tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    if nodes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyNodes,
            "At least one node is required",
        ));
    }
    if tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTasks,
            "At least one task is required",
        ));
    }

    let mut node_ids = HashSet::new();
    for node in nodes {
        if !node_ids.insert(node.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate node ID: {}", node.id),
            ));
        }
        if !node.capacity.is_finite()
            || !node.power.idle_power.is_finite()
            || !node.power.max_power.is_finite()
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!(
                    "Node '{}' has a non-finite capacity or power value",
                    node.id
                ),
            ));
        }
        if node.capacity.cpu_cores <= 0.0 || node.capacity.memory <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveCapacity,
                format!(
                    "Node '{}' has non-positive capacity (cpu {}, memory {})",
                    node.id, node.capacity.cpu_cores, node.capacity.memory
                ),
            ));
        }
        if node.power.max_power < node.power.idle_power {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedPower,
                format!(
                    "Node '{}' has max power {} below idle power {}",
                    node.id, node.power.max_power, node.power.idle_power
                ),
            ));
        }
    }

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        if !task.required.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!("Task '{}' has a non-finite requirement", task.id),
            ));
        }
        if task.required.cpu_cores < 0.0 || task.required.memory < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeRequirement,
                format!("Task '{}' has a negative requirement", task.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a prior task → node placement against a problem.
pub fn validate_original_assignment(
    problem: &Problem,
    original: &HashMap<String, Option<String>>,
) -> ValidationResult {
    let mut errors = Vec::new();

    for (task_id, node_id) in original {
        if problem.task_index(task_id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTask,
                format!("Prior assignment references unknown task '{task_id}'"),
            ));
        }
        if let Some(node_id) = node_id {
            if problem.node_index(node_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownNode,
                    format!("Task '{task_id}' was assigned to unknown node '{node_id}'"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
