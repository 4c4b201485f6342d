//! Reference-point association and niche-preserving selection.

use rand::Rng;
use tracing::{trace, warn};

use super::reference::ReferencePoint;
use crate::models::Individual;

/// Distance from `x` to the line through the origin along `direction`.
///
/// `‖x − ((x·r)/‖r‖²) r‖`. A zero direction yields `‖x‖`.
pub fn perpendicular_distance(x: &[f64], direction: &[f64]) -> f64 {
    let norm_sq: f64 = direction.iter().map(|r| r * r).sum();
    let scale = if norm_sq > 0.0 {
        x.iter().zip(direction).map(|(x, r)| x * r).sum::<f64>() / norm_sq
    } else {
        0.0
    };
    x.iter()
        .zip(direction)
        .map(|(x, r)| {
            let d = x - scale * r;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Associates each member with its closest reference point.
///
/// Reads `normalized`; writes `reference_point` and
/// `perpendicular_distance`. Ties keep the first reference point.
pub fn associate(pool: &mut [Individual], members: &[usize], refs: &[ReferencePoint]) {
    for &i in members {
        let ind = &mut pool[i];
        ind.reference_point = None;
        ind.perpendicular_distance = f64::INFINITY;
        for (r, point) in refs.iter().enumerate() {
            let d = perpendicular_distance(&ind.normalized, &point.coordinates);
            if d < ind.perpendicular_distance {
                ind.perpendicular_distance = d;
                ind.reference_point = Some(r);
            }
        }
    }
}

/// Resets niche counts and tallies the associations of `survivors`.
pub fn count_niches(pool: &[Individual], survivors: &[usize], refs: &mut [ReferencePoint]) {
    for point in refs.iter_mut() {
        point.niche_count = 0;
    }
    for &i in survivors {
        if let Some(r) = pool[i].reference_point {
            refs[r].niche_count += 1;
        }
    }
}

/// Picks up to `k` members of `last_front` by niche preservation.
///
/// Repeatedly takes a least-crowded reference point (random among ties).
/// A point with no remaining candidates is dropped for the rest of the
/// call. An empty niche receives its closest candidate; otherwise a random
/// associated candidate is taken. Each pick increments the point's niche
/// count.
///
/// Returns fewer than `k` indices only when candidates or reference points
/// run out.
pub fn niching<R: Rng>(
    k: usize,
    pool: &[Individual],
    last_front: &[usize],
    refs: &mut [ReferencePoint],
    rng: &mut R,
) -> Vec<usize> {
    let mut candidates = last_front.to_vec();
    let mut active: Vec<usize> = (0..refs.len()).collect();
    let mut chosen = Vec::with_capacity(k);

    while chosen.len() < k {
        if candidates.is_empty() || active.is_empty() {
            warn!(
                selected = chosen.len(),
                wanted = k,
                candidates = candidates.len(),
                "niching exhausted before filling the generation"
            );
            break;
        }

        let min_count = active
            .iter()
            .map(|&r| refs[r].niche_count)
            .min()
            .unwrap_or(0);
        let least_crowded: Vec<usize> = active
            .iter()
            .copied()
            .filter(|&r| refs[r].niche_count == min_count)
            .collect();
        let r = least_crowded[rng.random_range(0..least_crowded.len())];

        let associated: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| pool[i].reference_point == Some(r))
            .collect();
        if associated.is_empty() {
            active.retain(|&a| a != r);
            continue;
        }

        let pick = if refs[r].niche_count == 0 {
            associated
                .iter()
                .copied()
                .min_by(|&a, &b| {
                    pool[a]
                        .perpendicular_distance
                        .total_cmp(&pool[b].perpendicular_distance)
                })
                .unwrap_or(associated[0])
        } else {
            associated[rng.random_range(0..associated.len())]
        };

        trace!(
            reference = %refs[r].id,
            niche_count = refs[r].niche_count,
            individual = pick,
            "niche pick"
        );
        refs[r].niche_count += 1;
        candidates.retain(|&c| c != pick);
        chosen.push(pick);
    }

    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Objectives, Problem, Task};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn individual(normalized: Objectives) -> Individual {
        let problem = Problem::new(vec![Node::new("N1", 1.0, 1.0)], vec![Task::new("T1")]).unwrap();
        let mut ind = Individual::from_assignment(&problem, vec![Some(0)]);
        ind.normalized = normalized;
        ind
    }

    fn point(id: &str, coordinates: [f64; 4]) -> ReferencePoint {
        ReferencePoint {
            id: id.to_string(),
            coordinates: coordinates.to_vec(),
            niche_count: 0,
        }
    }

    fn axis_points() -> Vec<ReferencePoint> {
        vec![
            point("x", [1.0, 0.0, 0.0, 0.0]),
            point("y", [0.0, 1.0, 0.0, 0.0]),
            point("z", [0.0, 0.0, 1.0, 0.0]),
            point("w", [0.0, 0.0, 0.0, 1.0]),
        ]
    }

    #[test]
    fn test_perpendicular_distance() {
        assert!((perpendicular_distance(&[1.0, 1.0], &[1.0, 0.0]) - 1.0).abs() < 1e-10);
        assert!(perpendicular_distance(&[2.0, 2.0], &[0.5, 0.5]).abs() < 1e-10);
        assert!((perpendicular_distance(&[3.0, 4.0], &[0.0, 0.0]) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_associate_nearest_axis() {
        let mut pool = vec![
            individual([1.0, 0.1, 0.0, 0.0]),
            individual([0.0, 0.2, 0.9, 0.0]),
        ];
        let refs = axis_points();
        associate(&mut pool, &[0, 1], &refs);
        assert_eq!(pool[0].reference_point, Some(0));
        assert!((pool[0].perpendicular_distance - 0.1).abs() < 1e-10);
        assert_eq!(pool[1].reference_point, Some(2));
    }

    #[test]
    fn test_count_niches_resets() {
        let mut pool = vec![individual([1.0, 0.0, 0.0, 0.0]), individual([0.9, 0.1, 0.0, 0.0])];
        let mut refs = axis_points();
        refs[3].niche_count = 7;
        associate(&mut pool, &[0, 1], &refs);
        count_niches(&pool, &[0, 1], &mut refs);
        assert_eq!(refs[0].niche_count, 2);
        assert_eq!(refs[3].niche_count, 0);
    }

    #[test]
    fn test_niching_prefers_empty_niches() {
        let mut rng = SmallRng::seed_from_u64(42);
        // 0,1 survive on axis x; 2,3 compete on x, 4 sits alone on y.
        let mut pool = vec![
            individual([1.0, 0.0, 0.0, 0.0]),
            individual([1.0, 0.05, 0.0, 0.0]),
            individual([1.0, 0.1, 0.0, 0.0]),
            individual([1.0, 0.2, 0.0, 0.0]),
            individual([0.1, 1.0, 0.0, 0.0]),
        ];
        let mut refs = axis_points();
        associate(&mut pool, &[0, 1, 2, 3, 4], &refs);
        count_niches(&pool, &[0, 1], &mut refs);

        let chosen = niching(1, &pool, &[2, 3, 4], &mut refs, &mut rng);
        assert_eq!(chosen, vec![4]);
        assert_eq!(refs[1].niche_count, 1);
    }

    #[test]
    fn test_empty_niche_takes_closest() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut pool = vec![
            individual([1.0, 0.3, 0.0, 0.0]),
            individual([1.0, 0.1, 0.0, 0.0]),
            individual([1.0, 0.2, 0.0, 0.0]),
        ];
        let mut refs = axis_points();
        associate(&mut pool, &[0, 1, 2], &refs);
        count_niches(&pool, &[], &mut refs);

        let chosen = niching(1, &pool, &[0, 1, 2], &mut refs, &mut rng);
        assert_eq!(chosen, vec![1]);
    }

    #[test]
    fn test_niching_fills_k_without_repeats() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut pool: Vec<Individual> = (0..8)
            .map(|i| individual([1.0, i as f64 * 0.01, 0.0, 0.0]))
            .collect();
        let mut refs = axis_points();
        let front: Vec<usize> = (0..8).collect();
        associate(&mut pool, &front, &refs);
        count_niches(&pool, &[], &mut refs);

        let mut chosen = niching(5, &pool, &front, &mut refs, &mut rng);
        assert_eq!(chosen.len(), 5);
        assert_eq!(refs[0].niche_count, 5);
        chosen.sort();
        chosen.dedup();
        assert_eq!(chosen.len(), 5);
    }

    #[test]
    fn test_niching_stops_when_candidates_run_out() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut pool = vec![individual([1.0, 0.0, 0.0, 0.0])];
        let mut refs = axis_points();
        associate(&mut pool, &[0], &refs);
        let chosen = niching(3, &pool, &[0], &mut refs, &mut rng);
        assert_eq!(chosen, vec![0]);
    }
}
