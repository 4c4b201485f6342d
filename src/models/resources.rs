//! Resource and power value types.
//!
//! [`Resources`] doubles as a node's capacity and a task's requirement.
//! During evaluation a node's *remaining* resources may go negative:
//! overcommitment is scored, never prevented.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// CPU and memory quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    /// CPU cores (fractional cores allowed).
    pub cpu_cores: f64,
    /// Memory, in whatever unit the caller uses consistently.
    pub memory: f64,
}

impl Resources {
    /// Creates a resource vector.
    pub fn new(cpu_cores: f64, memory: f64) -> Self {
        Self { cpu_cores, memory }
    }

    /// Whether `self` covers `required` in both dimensions.
    #[inline]
    pub fn covers(&self, required: &Resources) -> bool {
        required.cpu_cores <= self.cpu_cores && required.memory <= self.memory
    }

    /// Sum of the negative parts of both dimensions, as a positive magnitude.
    ///
    /// Zero iff neither dimension is overcommitted.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.cpu_cores.is_finite() && self.memory.is_finite()
    }

    pub fn overcommit(&self) -> f64 {
        (-self.cpu_cores).max(0.0) + (-self.memory).max(0.0)
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(self, rhs: Resources) -> Resources {
        Resources::new(self.cpu_cores + rhs.cpu_cores, self.memory + rhs.memory)
    }
}

impl Sub for Resources {
    type Output = Resources;

    fn sub(self, rhs: Resources) -> Resources {
        Resources::new(self.cpu_cores - rhs.cpu_cores, self.memory - rhs.memory)
    }
}

/// Linear power model of a node.
///
/// Draw scales from `idle_power` at zero memory utilization to `max_power`
/// at full utilization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Power {
    /// Draw with nothing scheduled.
    pub idle_power: f64,
    /// Draw at full utilization.
    pub max_power: f64,
}

impl Power {
    /// Creates a power model.
    pub fn new(idle_power: f64, max_power: f64) -> Self {
        Self {
            idle_power,
            max_power,
        }
    }

    /// Estimated draw at the given utilization fraction.
    ///
    /// The fraction is not clamped; an overcommitted node draws more than
    /// `max_power`.
    #[inline]
    pub fn draw_at(&self, utilization: f64) -> f64 {
        self.idle_power + (self.max_power - self.idle_power) * utilization
    }
}
