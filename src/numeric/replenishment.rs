//! Replenishment transition matrices
//!
//! Reward probability inside a patch recovers through `n` discrete states.
//! The recovery is a continuous-time Markov chain whose generator `Q` moves
//! one state up at rate `r / T`; the last state is absorbing. Sampling the
//! chain every `dt` seconds gives the transition matrix `P = exp(Q * dt)`.

use ndarray::Array2;

use crate::error::{Error, Result};

/// Model time constant used by the task's replenishment functions.
pub const DEFAULT_TIME_CONSTANT: f64 = 3.5;

/// Sampling interval (seconds) of the task's replenishment functions.
pub const DEFAULT_DT: f64 = 0.1;

/// Taylor terms below this magnitude no longer change the sum.
const TAYLOR_TOLERANCE: f64 = 1e-18;
const MAX_TAYLOR_TERMS: usize = 64;

/// Build the replenishment transition matrix for `n_states` reward states.
///
/// # Example
///
/// ```
/// use vr_foraging_curricula::numeric::replenishment_transition_matrix;
///
/// let p = replenishment_transition_matrix(3, 0.2, 3.5, 0.1).unwrap();
/// assert_eq!(p.dim(), (3, 3));
/// assert_eq!(p[[2, 2]], 1.0);
/// ```
pub fn replenishment_transition_matrix(
    n_states: usize,
    rate: f64,
    time_constant: f64,
    dt: f64,
) -> Result<Array2<f64>> {
    if n_states == 0 {
        return Err(Error::Numeric {
            message: "replenishment matrix needs at least one state".to_string(),
        });
    }
    if !rate.is_finite() || rate < 0.0 {
        return Err(Error::Numeric {
            message: format!("replenishment rate must be finite and >= 0, got {rate}"),
        });
    }
    if !time_constant.is_finite() || time_constant <= 0.0 {
        return Err(Error::Numeric {
            message: format!("time constant must be finite and > 0, got {time_constant}"),
        });
    }
    if !dt.is_finite() || dt < 0.0 {
        return Err(Error::Numeric {
            message: format!("sampling interval must be finite and >= 0, got {dt}"),
        });
    }

    let generator = generator_matrix(n_states, rate / time_constant);
    Ok(expm(&(generator * dt)))
}

/// Recover the replenishment rate a matrix was built with.
///
/// Inverts [`replenishment_transition_matrix`] through `P[0, 0] = exp(-r dt / T)`.
pub fn rate_from_transition_matrix(
    matrix: &[Vec<f64>],
    time_constant: f64,
    dt: f64,
) -> Result<f64> {
    let first = matrix
        .first()
        .and_then(|row| row.first())
        .copied()
        .ok_or_else(|| Error::Numeric {
            message: "cannot estimate a rate from an empty transition matrix".to_string(),
        })?;
    if matrix.len() == 1 {
        return Ok(0.0);
    }
    if !(first > 0.0 && first <= 1.0) {
        return Err(Error::Numeric {
            message: format!("P[0, 0] must lie in (0, 1], got {first}"),
        });
    }
    if dt <= 0.0 {
        return Err(Error::Numeric {
            message: format!("sampling interval must be > 0 to estimate a rate, got {dt}"),
        });
    }
    Ok(-first.ln() * time_constant / dt)
}

/// Flatten a matrix into nested rows for serialization.
pub fn to_nested(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}

fn generator_matrix(n_states: usize, step_rate: f64) -> Array2<f64> {
    let mut q = Array2::<f64>::zeros((n_states, n_states));
    for i in 0..n_states - 1 {
        q[[i, i]] = -step_rate;
        q[[i, i + 1]] = step_rate;
    }
    // q[n-1, n-1] stays 0: the fully replenished state is absorbing
    q
}

/// Matrix exponential by scaling and squaring with a Taylor core.
fn expm(a: &Array2<f64>) -> Array2<f64> {
    let n = a.nrows();
    let norm = a
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
        .fold(0.0, f64::max);

    let squarings = if norm > 0.5 {
        (norm / 0.5).log2().ceil() as i32
    } else {
        0
    };
    let scaled = a / 2f64.powi(squarings);

    let mut result = Array2::<f64>::eye(n);
    let mut term = Array2::<f64>::eye(n);
    for k in 1..=MAX_TAYLOR_TERMS {
        term = term.dot(&scaled) / k as f64;
        result += &term;
        if term.iter().all(|x| x.abs() < TAYLOR_TOLERANCE) {
            break;
        }
    }

    for _ in 0..squarings {
        result = result.dot(&result);
    }
    result
}
