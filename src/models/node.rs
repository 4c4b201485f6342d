//! Node model.
//!
//! Nodes are the machines tasks are placed on. Capacity is fixed once a
//! run starts; each individual keeps its own working view of what is left
//! (see [`NodeLoad`](super::NodeLoad)).

use serde::{Deserialize, Serialize};

use super::{Power, Resources};

/// A node that can host tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    pub id: String,
    /// Total CPU and memory available for tasks.
    pub capacity: Resources,
    /// Power model used by the power objective.
    pub power: Power,
}

impl Node {
    /// Creates a node with the given capacity and a zero power model.
    pub fn new(id: impl Into<String>, cpu_cores: f64, memory: f64) -> Self {
        Self {
            id: id.into(),
            capacity: Resources::new(cpu_cores, memory),
            power: Power::default(),
        }
    }

    /// Sets the power model.
    pub fn with_power(mut self, idle_power: f64, max_power: f64) -> Self {
        self.power = Power::new(idle_power, max_power);
        self
    }

    /// Memory utilization fraction given the remaining memory.
    #[inline]
    pub fn memory_utilization(&self, remaining: &Resources) -> f64 {
        (self.capacity.memory - remaining.memory) / self.capacity.memory
    }

    /// |remaining cpu fraction − remaining memory fraction|.
    ///
    /// Zero when both dimensions are consumed in the same proportion.
    #[inline]
    pub fn imbalance(&self, remaining: &Resources) -> f64 {
        (remaining.cpu_cores / self.capacity.cpu_cores - remaining.memory / self.capacity.memory)
            .abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let n = Node::new("N1", 8.0, 16.0)
            .with_power(90.0, 250.0);

        assert_eq!(n.id, "N1");
        assert_eq!(n.capacity, Resources::new(8.0, 16.0));
        assert_eq!(n.power, Power::new(90.0, 250.0));
    }

    #[test]
    fn test_memory_utilization() {
        let n = Node::new("N1", 4.0, 8.0);
        assert!((n.memory_utilization(&Resources::new(4.0, 8.0)) - 0.0).abs() < 1e-10);
        assert!((n.memory_utilization(&Resources::new(0.0, 4.0)) - 0.5).abs() < 1e-10);
        assert!((n.memory_utilization(&Resources::new(0.0, -8.0)) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_imbalance() {
        let n = Node::new("N1", 4.0, 8.0);
        // cpu 2/4 = 0.5, mem 4/8 = 0.5
        assert!((n.imbalance(&Resources::new(2.0, 4.0)) - 0.0).abs() < 1e-10);
        // cpu 0/4 = 0.0, mem 4/8 = 0.5
        assert!((n.imbalance(&Resources::new(0.0, 4.0)) - 0.5).abs() < 1e-10);
    }
}
