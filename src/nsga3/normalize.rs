//! Objective normalization against the ideal point and hyperplane intercepts.
//!
//! # Algorithm (Deb & Jain, 2014)
//!
//! 1. Ideal point: per-objective minimum over the set.
//! 2. Translate every member by the ideal point.
//! 3. For each axis, the extreme point minimizes the achievement
//!    scalarizing function with weight 1 on that axis and 1e-6 elsewhere.
//! 4. The hyperplane through the extreme points is solved for its axis
//!    intercepts; a singular system or a negative intercept falls back to
//!    the extreme points' diagonal.
//! 5. Each translated objective is divided by `intercept − ideal`, with the
//!    intercept expressed in objective space.

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Individual, Objectives, OBJECTIVE_COUNT};

/// Off-axis weight of the extreme-point search.
const OFF_AXIS_WEIGHT: f64 = 1e-6;

/// Smallest magnitude allowed for a normalization denominator.
const MIN_DENOMINATOR: f64 = 1e-10;

/// The linear system has no unique solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("singular matrix: zero pivot in column {column}")]
pub struct SingularMatrix {
    pub column: usize,
}

/// Outcome of one normalization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub ideal: Objectives,
    /// Hyperplane intercepts in objective space (ideal point included).
    pub intercepts: Objectives,
    /// Whether the intercepts came from the diagonal fallback.
    pub fell_back: bool,
}

/// Per-objective minimum over `members`.
///
/// Returns all zeros for an empty set.
pub fn ideal_point(pool: &[Individual], members: &[usize]) -> Objectives {
    if members.is_empty() {
        return [0.0; OBJECTIVE_COUNT];
    }
    let mut ideal = [f64::INFINITY; OBJECTIVE_COUNT];
    for &i in members {
        for (m, value) in pool[i].objectives.iter().enumerate() {
            ideal[m] = ideal[m].min(*value);
        }
    }
    ideal
}

/// Achievement scalarizing function: `max_j x_j / w_j`.
pub fn asf(x: &[f64], weights: &[f64]) -> f64 {
    x.iter()
        .zip(weights)
        .map(|(x, w)| x / w)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Translated extreme point for each axis.
///
/// Reads `translated`, so members must already be translated. Ties keep
/// the first member in `members` order.
pub fn extreme_points(pool: &[Individual], members: &[usize]) -> [Objectives; OBJECTIVE_COUNT] {
    let mut extremes = [[0.0; OBJECTIVE_COUNT]; OBJECTIVE_COUNT];
    for (axis, extreme) in extremes.iter_mut().enumerate() {
        let mut weights = [OFF_AXIS_WEIGHT; OBJECTIVE_COUNT];
        weights[axis] = 1.0;

        let mut best = f64::INFINITY;
        for &i in members {
            let value = asf(&pool[i].translated, &weights);
            if value < best {
                best = value;
                *extreme = pool[i].translated;
            }
        }
    }
    extremes
}

/// Solves `a · x = b` by Gaussian elimination with partial pivoting.
///
/// `a` is square with `b.len()` rows.
pub fn gauss_partial(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, SingularMatrix> {
    let n = b.len();

    for k in 0..n {
        let pivot = (k..n)
            .max_by(|&i, &j| a[i][k].abs().total_cmp(&a[j][k].abs()))
            .unwrap_or(k);
        if a[pivot][k] == 0.0 {
            return Err(SingularMatrix { column: k });
        }
        a.swap(k, pivot);
        b.swap(k, pivot);

        for i in (k + 1)..n {
            let factor = a[i][k] / a[k][k];
            for j in k..n {
                a[i][j] -= factor * a[k][j];
            }
            b[i] -= factor * b[k];
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let tail: f64 = ((i + 1)..n).map(|j| a[i][j] * x[j]).sum();
        x[i] = (b[i] - tail) / a[i][i];
    }
    Ok(x)
}

/// Axis intercepts of the hyperplane through the translated `extremes`.
///
/// Returns the intercepts and whether the diagonal fallback was used.
pub fn intercepts(extremes: &[Objectives; OBJECTIVE_COUNT]) -> (Objectives, bool) {
    let diagonal = || {
        let mut values = [0.0; OBJECTIVE_COUNT];
        for (axis, value) in values.iter_mut().enumerate() {
            *value = extremes[axis][axis];
        }
        values
    };

    let a: Vec<Vec<f64>> = extremes.iter().map(|row| row.to_vec()).collect();
    let b = vec![1.0; OBJECTIVE_COUNT];

    let solution = match gauss_partial(a, b) {
        Ok(solution) => solution,
        Err(err) => {
            debug!(column = err.column, "intercept system singular, using diagonal");
            return (diagonal(), true);
        }
    };

    let mut values = [0.0; OBJECTIVE_COUNT];
    for (value, s) in values.iter_mut().zip(&solution) {
        *value = 1.0 / s;
    }
    if values.iter().any(|v| *v < 0.0 || !v.is_finite()) {
        warn!(?values, "degenerate intercepts, using diagonal");
        return (diagonal(), true);
    }
    (values, false)
}

/// Translates and normalizes `members` in place.
///
/// Writes `translated` and `normalized` on every member.
pub fn normalize(pool: &mut [Individual], members: &[usize]) -> Normalization {
    let ideal = ideal_point(pool, members);
    for &i in members {
        let ind = &mut pool[i];
        for m in 0..OBJECTIVE_COUNT {
            ind.translated[m] = ind.objectives[m] - ideal[m];
        }
    }

    let extremes = extreme_points(pool, members);
    let (translated_intercepts, fell_back) = intercepts(&extremes);
    let mut intercepts = ideal;
    for (value, offset) in intercepts.iter_mut().zip(translated_intercepts) {
        *value += offset;
    }

    let mut denominators = [0.0; OBJECTIVE_COUNT];
    for m in 0..OBJECTIVE_COUNT {
        let d = intercepts[m] - ideal[m];
        denominators[m] = if d.abs() < MIN_DENOMINATOR {
            MIN_DENOMINATOR
        } else {
            d
        };
    }

    for &i in members {
        let ind = &mut pool[i];
        for m in 0..OBJECTIVE_COUNT {
            ind.normalized[m] = ind.translated[m] / denominators[m];
        }
    }

    Normalization {
        ideal,
        intercepts,
        fell_back,
    }
}
