//! Task model.
//!
//! A task is a unit of work to be placed on a node. Tasks are immutable
//! for the duration of a run and are referenced by index from every
//! [`Individual`](super::Individual), never owned by one.

use serde::{Deserialize, Serialize};

use super::Resources;

/// A task to be placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// CPU and memory the task consumes on its node.
    pub required: Resources,
    /// Type tag. Replicas of the same type on one node are penalized.
    pub task_type: String,
}

impl Task {
    /// Creates a task with zero requirements and an empty type tag.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            required: Resources::default(),
            task_type: String::new(),
        }
    }

    /// Sets the required resources.
    pub fn with_required(mut self, cpu_cores: f64, memory: f64) -> Self {
        self.required = Resources::new(cpu_cores, memory);
        self
    }

    /// Sets the type tag.
    pub fn with_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
        self
    }
}
