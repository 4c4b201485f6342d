//! Crowding distance assignment.
//!
//! Only the crowded tournament reads crowding distances; NSGA-III survivor
//! selection uses reference-point niching instead.

use std::cmp::Ordering;

use crate::models::{Individual, OBJECTIVE_COUNT};

/// Assigns crowding distances to the members of one front.
///
/// For each objective the front is ordered by value, descending. The two
/// boundary members get `f64::INFINITY`; interior members accumulate the
/// gap between their neighbours divided by the front's range on that
/// objective. An objective on which every member has the same value
/// contributes nothing.
pub fn assign_crowding_distance(pool: &mut [Individual], front: &[usize]) {
    for &i in front {
        pool[i].crowding_distance = 0.0;
    }
    let n = front.len();
    if n == 0 {
        return;
    }
    if n <= 2 {
        for &i in front {
            pool[i].crowding_distance = f64::INFINITY;
        }
        return;
    }

    let mut order = front.to_vec();
    for m in 0..OBJECTIVE_COUNT {
        order.sort_by(|&a, &b| {
            pool[b].objectives[m]
                .partial_cmp(&pool[a].objectives[m])
                .unwrap_or(Ordering::Equal)
        });

        let max = pool[order[0]].objectives[m];
        let min = pool[order[n - 1]].objectives[m];
        pool[order[0]].crowding_distance = f64::INFINITY;
        pool[order[n - 1]].crowding_distance = f64::INFINITY;

        let range = max - min;
        if range <= 0.0 {
            continue;
        }
        for k in 1..(n - 1) {
            let gap = pool[order[k - 1]].objectives[m] - pool[order[k + 1]].objectives[m];
            pool[order[k]].crowding_distance += gap / range;
        }
    }
}
