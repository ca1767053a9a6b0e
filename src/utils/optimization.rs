//! Bounded Nelder-Mead simplex minimisation used for parameter estimation.

use std::cmp::Ordering;

/// Result of Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// The optimal point found.
    pub optimal_point: Vec<f64>,
    /// The objective function value at the optimal point.
    pub optimal_value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of objective evaluations.
    pub evaluations: usize,
    /// Whether the algorithm converged.
    pub converged: bool,
}

/// Configuration for Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance, relative to `1 + |best value|`.
    pub tolerance: f64,
    /// Reflection coefficient (default: 1.0).
    pub alpha: f64,
    /// Expansion coefficient (default: 2.0).
    pub gamma: f64,
    /// Contraction coefficient (default: 0.5).
    pub rho: f64,
    /// Shrinkage coefficient (default: 0.5).
    pub sigma: f64,
    /// Initial simplex step size (default: 0.05).
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

/// Minimise `objective` starting from `initial`.
///
/// Every candidate is clamped into `bounds` when given. Non-finite objective
/// values are treated as `+inf`, so the simplex moves away from them.
///
/// # Example
/// ```
/// use sensor_forecast::utils::optimization::{nelder_mead, NelderMeadConfig};
///
/// // Minimize (x-2)^2 + (y-3)^2
/// let result = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
///     &[0.0, 0.0],
///     None,
///     NelderMeadConfig::default(),
/// );
///
/// assert!(result.converged);
/// assert!((result.optimal_point[0] - 2.0).abs() < 0.01);
/// assert!((result.optimal_point[1] - 3.0).abs() < 0.01);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return NelderMeadResult {
            optimal_point: vec![],
            optimal_value: f64::NAN,
            iterations: 0,
            evaluations: 0,
            converged: false,
        };
    }

    let mut evaluations = 0;
    let mut eval = |x: &[f64]| {
        evaluations += 1;
        let v = objective(x);
        if v.is_finite() {
            v
        } else {
            f64::INFINITY
        }
    };

    // Initial simplex: the start point plus one step along each axis
    let start = apply_bounds(initial, bounds);
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(start.clone());
    for i in 0..n {
        let mut vertex = start.clone();
        let step = if start[i].abs() > 1e-10 {
            config.initial_step * start[i].abs()
        } else {
            config.initial_step
        };
        vertex[i] += step;
        let mut vertex = apply_bounds(&vertex, bounds);
        if vertex == start {
            // Start sits on the upper bound for this axis
            vertex[i] -= step;
            vertex = apply_bounds(&vertex, bounds);
        }
        simplex.push(vertex);
    }

    let mut values: Vec<f64> = simplex.iter().map(|v| eval(v)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        let mut indices: Vec<usize> = (0..=n).collect();
        indices.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

        let best_idx = indices[0];
        let worst_idx = indices[n];
        let second_worst_idx = indices[n - 1];

        let range = values[worst_idx] - values[best_idx];
        if range.is_finite() && range <= config.tolerance * (1.0 + values[best_idx].abs()) {
            converged = true;
            break;
        }

        // Collapsed simplex
        let centroid = compute_centroid(&simplex, worst_idx);
        let max_dist = simplex
            .iter()
            .map(|v| euclidean_distance(v, &centroid))
            .fold(0.0, f64::max);
        if max_dist < config.tolerance {
            converged = values[best_idx].is_finite();
            break;
        }

        let reflected = apply_bounds(&towards(&centroid, &simplex[worst_idx], -config.alpha), bounds);
        let reflected_value = eval(&reflected);

        if reflected_value < values[second_worst_idx] && reflected_value >= values[best_idx] {
            simplex[worst_idx] = reflected;
            values[worst_idx] = reflected_value;
            continue;
        }

        if reflected_value < values[best_idx] {
            let expanded = apply_bounds(&towards(&centroid, &reflected, config.gamma), bounds);
            let expanded_value = eval(&expanded);

            if expanded_value < reflected_value {
                simplex[worst_idx] = expanded;
                values[worst_idx] = expanded_value;
            } else {
                simplex[worst_idx] = reflected;
                values[worst_idx] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[worst_idx] {
            // Outside contraction
            let contracted = apply_bounds(&towards(&centroid, &reflected, config.rho), bounds);
            let contracted_value = eval(&contracted);

            if contracted_value <= reflected_value {
                simplex[worst_idx] = contracted;
                values[worst_idx] = contracted_value;
                continue;
            }
        } else {
            // Inside contraction
            let contracted =
                apply_bounds(&towards(&centroid, &simplex[worst_idx], config.rho), bounds);
            let contracted_value = eval(&contracted);

            if contracted_value < values[worst_idx] {
                simplex[worst_idx] = contracted;
                values[worst_idx] = contracted_value;
                continue;
            }
        }

        // Shrink towards the best vertex
        let best = simplex[best_idx].clone();
        for i in 0..=n {
            if i != best_idx {
                let shrunk = towards(&best, &simplex[i], config.sigma);
                simplex[i] = apply_bounds(&shrunk, bounds);
                values[i] = eval(&simplex[i]);
            }
        }
    }

    let best_idx = values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    NelderMeadResult {
        optimal_point: simplex[best_idx].clone(),
        optimal_value: values[best_idx],
        iterations,
        evaluations,
        converged,
    }
}

/// Compute centroid of simplex excluding the worst vertex.
fn compute_centroid(simplex: &[Vec<f64>], exclude_idx: usize) -> Vec<f64> {
    let n = simplex[0].len();
    let count = (simplex.len() - 1) as f64;
    let mut centroid = vec![0.0; n];

    for (i, vertex) in simplex.iter().enumerate() {
        if i != exclude_idx {
            for (c, v) in centroid.iter_mut().zip(vertex) {
                *c += v;
            }
        }
    }

    for c in &mut centroid {
        *c /= count;
    }

    centroid
}

/// `origin + coef * (point - origin)`; a negative `coef` reflects through `origin`.
fn towards(origin: &[f64], point: &[f64], coef: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(point.iter())
        .map(|(o, p)| o + coef * (p - o))
        .collect()
}

fn apply_bounds(point: &[f64], bounds: Option<&[(f64, f64)]>) -> Vec<f64> {
    match bounds {
        None => point.to_vec(),
        Some(b) => point
            .iter()
            .enumerate()
            .map(|(i, &x)| match b.get(i) {
                Some(&(lo, hi)) => x.clamp(lo, hi),
                None => x,
            })
            .collect(),
    }
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
