//! Simplex-lattice reference points (Das & Dennis, 1998).
//!
//! With `M` objectives and `H` segments per axis the lattice holds
//! C(H+M−1, M−1) points whose coordinates are multiples of 1/H, are
//! non-negative and sum to 1.
//!
//! # Algorithm
//!
//! Start at the vertex (1, 0, …, 0). From every visited point, move one
//! step of 1/H from axis 0 to each other axis, stopping a branch when axis 0
//! would go negative. Points are deduplicated on their coordinates rounded
//! to two decimals; the set lives for one call only.

use serde::Serialize;
use std::collections::HashSet;

use crate::id::IdGenerator;

/// A direction on the unit simplex, with its niche count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferencePoint {
    pub id: String,
    /// Non-negative coordinates summing to 1.
    pub coordinates: Vec<f64>,
    /// Survivors currently associated with this point.
    pub niche_count: usize,
}

/// Generates the reference-point lattice, each point tagged with a fresh id.
///
/// Returns an empty set when `objectives` or `segments` is zero.
pub fn generate_reference_points<G: IdGenerator + ?Sized>(
    objectives: usize,
    segments: usize,
    ids: &mut G,
) -> Vec<ReferencePoint> {
    if objectives == 0 || segments == 0 {
        return Vec::new();
    }

    let mut start = vec![0usize; objectives];
    start[0] = segments;

    let mut seen = HashSet::new();
    let mut lattice = Vec::new();
    visit(start, segments, &mut seen, &mut lattice);

    lattice
        .into_iter()
        .map(|coordinates| ReferencePoint {
            id: ids.next_id(),
            coordinates,
            niche_count: 0,
        })
        .collect()
}

/// `steps[i]` counts the 1/H steps held by axis `i`.
fn visit(
    steps: Vec<usize>,
    segments: usize,
    seen: &mut HashSet<Vec<i64>>,
    lattice: &mut Vec<Vec<f64>>,
) {
    let coordinates: Vec<f64> = steps
        .iter()
        .map(|&s| s as f64 / segments as f64)
        .collect();
    if !seen.insert(dedup_key(&coordinates)) {
        return;
    }
    lattice.push(coordinates);

    if steps[0] == 0 {
        return;
    }
    for axis in 1..steps.len() {
        let mut next = steps.clone();
        next[0] -= 1;
        next[axis] += 1;
        visit(next, segments, seen, lattice);
    }
}

/// Coordinates rounded to two decimals, as integer hundredths.
fn dedup_key(coordinates: &[f64]) -> Vec<i64> {
    coordinates.iter().map(|c| (c * 100.0).round() as i64).collect()
}
