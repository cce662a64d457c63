//! Accelerated projected gradient descent over the scaled simplex
//! `{x >= 0, sum(x) = total}`.
//!
//! Any point of that set also satisfies `x <= total`, so one projection
//! enforces both the equality and the box constraints. Iterates follow FISTA
//! with step `1 / L`; momentum is reset whenever the last step points against
//! the descent direction. The solver stops on the optimality gap
//! `sum_i x_i * (g_i - min g)`, which bounds `f(x) - f*` from above for
//! convex objectives.

use crate::config::SolverConfig;
use crate::error::{Result, TrafficError};
use log::debug;
use std::time::Instant;

/// Smooth objective over a vector of path flows.
pub trait Objective {
    fn value(&self, x: &[f64]) -> f64;

    fn gradient(&self, x: &[f64]) -> Vec<f64>;

    /// Upper bound on the Lipschitz constant of the gradient. Zero means the objective is linear.
    fn lipschitz(&self) -> f64;
}

#[derive(Debug)]
pub struct Solution {
    pub x: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
}

/// Euclidean projection of `v` onto `{x >= 0, sum(x) = total}`.
pub fn project_onto_simplex(v: &[f64], total: f64) -> Vec<f64> {
    if total <= 0.0 {
        return vec![0.0; v.len()];
    }
    let mut sorted = v.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut cumulative = 0.0;
    let mut theta = 0.0;
    for (i, u) in sorted.iter().enumerate() {
        cumulative += u;
        let t = (cumulative - total) / (i + 1) as f64;
        if u - t > 0.0 {
            theta = t;
        }
    }
    v.iter().map(|x| (x - theta).max(0.0)).collect()
}

fn check_finite(x: &[f64], value: f64, iteration: usize) -> Result<()> {
    if value.is_finite() && x.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(TrafficError::Optimization {
            diagnostic: format!("non-finite iterate at iteration {}", iteration),
        })
    }
}

/// Upper bound on `f(x) - f*`: the flow on each variable times how much
/// dearer its marginal cost is than the cheapest one.
pub fn optimality_gap(x: &[f64], gradient: &[f64]) -> f64 {
    let cheapest = gradient.iter().cloned().fold(f64::INFINITY, f64::min);
    x.iter()
        .zip(gradient.iter())
        .map(|(v, g)| v * (g - cheapest))
        .sum()
}

fn gradient_step(x: &[f64], gradient: &[f64], step: f64, total: f64) -> Vec<f64> {
    let target = x
        .iter()
        .zip(gradient.iter())
        .map(|(v, g)| v - step * g)
        .collect::<Vec<f64>>();
    project_onto_simplex(&target, total)
}

pub fn minimize<O: Objective>(
    objective: &O,
    x0: Vec<f64>,
    total: f64,
    config: &SolverConfig,
) -> Result<Solution> {
    let mut x = project_onto_simplex(&x0, total);
    let lipschitz = objective.lipschitz();

    if lipschitz <= 0.0 {
        // Linear objective: the cheapest vertex is optimal.
        let gradient = objective.gradient(&x);
        if let Some((best, _)) = gradient
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
        {
            x.iter_mut().for_each(|v| *v = 0.0);
            x[best] = total;
        }
        let value = objective.value(&x);
        check_finite(&x, value, 0)?;
        return Ok(Solution {
            x,
            value,
            iterations: 0,
        });
    }

    let step = 1.0 / lipschitz;
    let started = Instant::now();
    let mut y = x.clone();
    let mut momentum = 1.0_f64;
    let mut restarts = 0usize;
    let mut last_gap = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        if let Some(limit) = config.time_limit {
            if started.elapsed() >= limit {
                return Err(TrafficError::Optimization {
                    diagnostic: format!(
                        "time limit of {:.3}s reached after {} iterations (last gap {:.3e})",
                        limit.as_secs_f64(),
                        iteration - 1,
                        last_gap
                    ),
                });
            }
        }

        let next = gradient_step(&y, &objective.gradient(&y), step, total);

        // (y - next) . (next - x) > 0: the step undid part of the momentum
        let overshoot = y
            .iter()
            .zip(next.iter().zip(x.iter()))
            .map(|(yv, (nv, xv))| (yv - nv) * (nv - xv))
            .sum::<f64>()
            > 0.0;
        let previous = std::mem::replace(&mut x, next);

        let value = objective.value(&x);
        last_gap = optimality_gap(&x, &objective.gradient(&x));
        check_finite(&x, value + last_gap, iteration)?;

        if last_gap <= config.tolerance * value.abs().max(1.0) {
            debug!(
                "solver converged after {} iterations ({} restarts), objective {:.6}, gap {:.3e}",
                iteration, restarts, value, last_gap
            );
            return Ok(Solution {
                x,
                value,
                iterations: iteration,
            });
        }

        if overshoot {
            restarts += 1;
            momentum = 1.0;
            y = x.clone();
        } else {
            let accelerated = (1.0 + (1.0 + 4.0 * momentum * momentum).sqrt()) / 2.0;
            let beta = (momentum - 1.0) / accelerated;
            y = x
                .iter()
                .zip(previous.iter())
                .map(|(now, before)| now + beta * (now - before))
                .collect();
            momentum = accelerated;
        }
    }

    Err(TrafficError::Optimization {
        diagnostic: format!(
            "no convergence within {} iterations (last gap {:.3e}, tolerance {:.3e})",
            config.max_iterations, last_gap, config.tolerance
        ),
    })
}
