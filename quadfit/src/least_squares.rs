//! Least-squares solutions of (usually over-determined) linear systems.
//!
//! The problem `min ‖A·x − b‖²` is reduced to the normal equations `AᵗA·x = Aᵗb`,
//! which are then solved by Gaussian elimination.
//! Forming `AᵗA` squares the condition number of `A`, so this loses roughly twice as
//! many digits as a QR or SVD based solve would. That is fine for the small, fixed-size
//! systems built in this crate (8 equations, 6 unknowns), but this is not a substitute for
//! a general purpose least-squares routine.

use crate::{
    LinalgError, Matrix,
    solver::{Config, solve_linear_system_with_config},
};

/// Least-squares solution of `a · x ≈ b`, with the default [`Config`].
pub fn solve_least_squares(a: &Matrix, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
    solve_least_squares_with_config(a, b, Config::default())
}

/// Least-squares solution of `a · x ≈ b`.
/// `a` is `m × n`, `b` has length `m`, and the result has length `n`.
/// Fails with [`LinalgError::SingularMatrix`] if `a` does not have full column rank
/// (which includes every system with fewer equations than unknowns).
pub fn solve_least_squares_with_config(
    a: &Matrix,
    b: &[f64],
    config: Config,
) -> Result<Vec<f64>, LinalgError> {
    if a.nrows() != b.len() {
        return Err(LinalgError::DimensionMismatch {
            operation: "fit",
            left: a.shape(),
            right: (b.len(), 1),
        });
    }
    let at = a.transpose();
    let ata = at.multiply(a)?;
    let atb = at.multiply_vector(b)?;
    solve_linear_system_with_config(&ata, &atb, config)
}

/// Squared residual norm `‖a·x − b‖²`.
pub fn residual_sum_of_squares(a: &Matrix, x: &[f64], b: &[f64]) -> Result<f64, LinalgError> {
    let ax = a.multiply_vector(x)?;
    if ax.len() != b.len() {
        return Err(LinalgError::DimensionMismatch {
            operation: "compare",
            left: a.shape(),
            right: (b.len(), 1),
        });
    }
    Ok(ax.iter().zip(b).map(|(p, q)| (p - q).powi(2)).sum())
}
