//! Fits the 2D affine transform which maps one quadrilateral onto another.
//!
//! Given four source points and the four target points they should land on,
//! [`compute_affine_transform`] finds the [`AffineTransform`] which does so best,
//! in the least-squares sense. The dense matrix and solver primitives it's built on
//! are public too.
//!
//! ```
//! use quadfit::{Point, compute_affine_transform};
//!
//! let square = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)].map(Point::from);
//! let moved = square.map(|p| Point::new(p.x + 3.0, p.y - 1.0));
//! let transform = compute_affine_transform(square, moved).unwrap();
//! assert!((transform.e - 3.0).abs() < 1e-9);
//! assert!((transform.f + 1.0).abs() < 1e-9);
//! ```

pub use crate::affine::{
    AffineTransform, compute_affine_transform, compute_affine_transform_with_config,
};
pub use crate::error::{Error, LinalgError, TextualError};
pub use crate::least_squares::{
    residual_sum_of_squares, solve_least_squares, solve_least_squares_with_config,
};
pub use crate::matrix::Matrix;
pub use crate::point::Point;
pub use crate::solver::{Config, solve_linear_system, solve_linear_system_with_config};

/// Fitting an affine transform to 4 point correspondences.
mod affine;
/// Errors which can occur anywhere in this crate.
mod error;
/// Least-squares via the normal equations.
pub mod least_squares;
/// Dense matrices.
mod matrix;
/// 2D points.
mod point;
/// Square linear systems.
pub mod solver;
/// Unit tests
#[cfg(test)]
mod tests;
/// Parser for textual representation of these problems.
pub mod textual;
