//! Fast non-dominated sorting under constrained dominance.
//!
//! # Algorithm (Deb et al., 2002)
//!
//! 1. For every pair, record who constraint-dominates whom. Each individual
//!    keeps the pool indices it dominates and a count of its dominators.
//! 2. Individuals with a zero count form front 0.
//! 3. Peel: for each member of the current front, decrement the count of
//!    everyone it dominates; those reaching zero form the next front.
//!
//! The dominance graph is stored as pool indices on each [`Individual`], so
//! the pool is an arena and no individual owns another.
//!
//! # Complexity
//! O(m·n²) comparisons, O(n²) peeling.

use crate::models::Individual;

/// Partitions `pool` into fronts of pool indices, best first.
///
/// Writes `rank`, `dominated` and `domination_count` on every individual.
/// Previous bookkeeping is discarded. Empty fronts are never returned.
pub fn fast_non_dominated_sort(pool: &mut [Individual]) -> Vec<Vec<usize>> {
    let n = pool.len();
    for individual in pool.iter_mut() {
        individual.dominated.clear();
        individual.domination_count = 0;
        individual.rank = 0;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if pool[i].constraint_dominates(&pool[j]) {
                pool[i].dominated.push(j);
                pool[j].domination_count += 1;
            } else if pool[j].constraint_dominates(&pool[i]) {
                pool[j].dominated.push(i);
                pool[i].domination_count += 1;
            }
        }
    }

    let first: Vec<usize> = (0..n).filter(|&i| pool[i].domination_count == 0).collect();
    if first.is_empty() {
        return Vec::new();
    }

    // Peeling consumes the counts; keep a working copy so the recorded
    // values stay readable after the sort.
    let mut remaining: Vec<usize> = pool.iter().map(|ind| ind.domination_count).collect();
    let mut fronts = vec![first];
    loop {
        let rank = fronts.len();
        let mut next = Vec::new();
        for &i in &fronts[rank - 1] {
            for &j in &pool[i].dominated {
                remaining[j] -= 1;
                if remaining[j] == 0 {
                    next.push(j);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        for &j in &next {
            pool[j].rank = rank;
        }
        fronts.push(next);
    }

    fronts
}
