//! Unique identifier issuance.
//!
//! Reference points are tagged with fresh identifiers. [`UlidGenerator`]
//! is the production source; [`SequentialIds`] is deterministic and suits
//! reproducible runs and tests.

use ulid::Ulid;

/// Source of fresh, unique identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// ULID-backed identifiers (time-ordered, 80 bits of randomness).
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidGenerator;

impl IdGenerator for UlidGenerator {
    fn next_id(&mut self) -> String {
        Ulid::new().to_string()
    }
}

/// `{prefix}_{n}` identifiers with a monotonically increasing counter.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}_{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
