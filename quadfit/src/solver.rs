//! Gaussian elimination with partial pivoting, for small dense square systems.

use crate::{LinalgError, Matrix};

/// Default for [`Config::pivot_tolerance`].
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

/// Configuration for the linear solvers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// A pivot whose magnitude is at most `pivot_tolerance * max|A|` is treated as zero,
    /// and the matrix as singular. `max|A|` is the largest absolute entry of the input.
    /// Zero means only exactly-zero pivots are rejected.
    pub pivot_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl Config {
    /// Only reject pivots which are exactly zero.
    pub fn exact() -> Self {
        Self {
            pivot_tolerance: 0.0,
        }
    }

    /// Set the relative pivot tolerance.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }
}

/// Solve `a · x = b` for square `a`, with the default [`Config`].
/// Neither `a` nor `b` is modified.
pub fn solve_linear_system(a: &Matrix, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
    solve_linear_system_with_config(a, b, Config::default())
}

/// Solve `a · x = b` for square `a`.
/// Neither `a` nor `b` is modified.
pub fn solve_linear_system_with_config(
    a: &Matrix,
    b: &[f64],
    config: Config,
) -> Result<Vec<f64>, LinalgError> {
    if !a.is_square() || a.nrows() != b.len() {
        return Err(LinalgError::DimensionMismatch {
            operation: "solve",
            left: a.shape(),
            right: (b.len(), 1),
        });
    }
    // Work on copies, elimination is done in place.
    let mut a_work = a.clone();
    let mut b_work = b.to_vec();
    let threshold = config.pivot_tolerance * a.max_abs();
    gaussian_elimination(&mut a_work, &mut b_work, threshold)
}

/// Reduce `a` to upper-triangular form then back-substitute.
/// Clobbers both `a` and `b`: on return `b` holds the back-substitution residuals.
fn gaussian_elimination(
    a: &mut Matrix,
    b: &mut [f64],
    threshold: f64,
) -> Result<Vec<f64>, LinalgError> {
    let n = b.len();
    for i in 0..n {
        // Pick the row with the largest magnitude in this column.
        let mut max_row = i;
        let mut max_el = a[(i, i)].abs();
        for k in (i + 1)..n {
            let candidate = a[(k, i)].abs();
            if candidate > max_el {
                max_el = candidate;
                max_row = k;
            }
        }
        if !max_el.is_finite() || max_el == 0.0 || max_el <= threshold {
            log::debug!("no usable pivot in column {i} (largest magnitude {max_el:e})");
            return Err(LinalgError::SingularMatrix { column: i });
        }
        if max_row != i {
            log::trace!("column {i}: swapping rows {i} and {max_row}");
            a.swap_rows_from(i, max_row, i);
            b.swap(i, max_row);
        }

        // Zero out this column below the pivot.
        let pivot = a[(i, i)];
        for k in (i + 1)..n {
            let c = -a[(k, i)] / pivot;
            // Set exactly, rather than accumulating rounding error.
            a[(k, i)] = 0.0;
            for j in (i + 1)..n {
                a[(k, j)] += c * a[(i, j)];
            }
            b[k] += c * b[i];
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        x[i] = b[i] / a[(i, i)];
        if !x[i].is_finite() {
            log::debug!("back-substitution produced {} at row {i}", x[i]);
            return Err(LinalgError::SingularMatrix { column: i });
        }
        for k in 0..i {
            b[k] -= a[(k, i)] * x[i];
        }
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "expected {expected:?}, got {actual:?}");
        }
    }

    #[test]
    fn three_by_three() {
        // x + y + z = 6
        // 2x + y - z = 1
        // x - y + z = 2
        let a = Matrix::try_from([[1.0, 1.0, 1.0], [2.0, 1.0, -1.0], [1.0, -1.0, 1.0]]).unwrap();
        let x = solve_linear_system(&a, &[6.0, 1.0, 2.0]).unwrap();
        assert_close(&x, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn needs_pivoting() {
        // Zero on the diagonal, only solvable with a row swap.
        let a = Matrix::try_from([[0.0, 2.0, 1.0], [1.0, 0.0, 0.0], [3.0, 1.0, 0.0]]).unwrap();
        let x = solve_linear_system(&a, &[5.0, 1.0, 5.0]).unwrap();
        assert_close(&x, &[1.0, 2.0, 1.0]);
    }

    #[test]
    fn singular() {
        let a = Matrix::try_from([[1.0, 2.0], [2.0, 4.0]]).unwrap();
        for b in [[3.0, 6.0], [1.0, 0.0], [0.0, 0.0]] {
            assert_eq!(
                solve_linear_system(&a, &b).unwrap_err(),
                LinalgError::SingularMatrix { column: 1 }
            );
        }
    }

    #[test]
    fn zero_matrix_is_singular() {
        let a = Matrix::zeros(3, 3).unwrap();
        assert_eq!(
            solve_linear_system(&a, &[1.0, 2.0, 3.0]).unwrap_err(),
            LinalgError::SingularMatrix { column: 0 }
        );
    }

    #[test]
    fn nearly_singular_depends_on_tolerance() {
        let a = Matrix::try_from([[1.0, 1.0], [1.0, 1.0 + 1e-14]]).unwrap();
        let b = [2.0, 2.0];
        assert!(matches!(
            solve_linear_system(&a, &b),
            Err(LinalgError::SingularMatrix { column: 1 })
        ));
        // With only the exact check, the tiny pivot is accepted.
        let x = solve_linear_system_with_config(&a, &b, Config::exact()).unwrap();
        assert_close(&x, &[2.0, 0.0]);
    }

    #[test]
    fn inputs_are_untouched() {
        let a = Matrix::try_from([[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let b = vec![3.0, 4.0];
        let a_before = a.clone();
        let b_before = b.clone();
        let x = solve_linear_system(&a, &b).unwrap();
        assert_close(&x, &[4.0, 3.0]);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn one_by_one() {
        let a = Matrix::try_from([[4.0]]).unwrap();
        assert_close(&solve_linear_system(&a, &[2.0]).unwrap(), &[0.5]);
    }

    #[test]
    fn empty_system() {
        let mut a = Matrix::identity(1).unwrap();
        assert_eq!(gaussian_elimination(&mut a, &mut [], 0.0).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn shape_checks() {
        let rect = Matrix::zeros(2, 3).unwrap();
        assert!(matches!(
            solve_linear_system(&rect, &[1.0, 2.0]),
            Err(LinalgError::DimensionMismatch { .. })
        ));
        let square = Matrix::identity(2).unwrap();
        assert!(matches!(
            solve_linear_system(&square, &[1.0, 2.0, 3.0]),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn overflowing_solution_is_rejected() {
        let a = Matrix::try_from([[1e-300]]).unwrap();
        assert_eq!(
            solve_linear_system(&a, &[1e300]).unwrap_err(),
            LinalgError::SingularMatrix { column: 0 }
        );
    }

    #[test]
    fn nan_input_is_rejected() {
        let a = Matrix::try_from([[f64::NAN, 1.0], [1.0, 1.0]]).unwrap();
        assert!(matches!(
            solve_linear_system(&a, &[1.0, 1.0]),
            Err(LinalgError::SingularMatrix { .. })
        ));
    }
}
