//! Small dense matrices and the handful of operations the solvers need.

use std::ops::{Index, IndexMut};

use crate::LinalgError;

/// Dense `rows × cols` matrix of `f64`, stored row-major.
/// Always has at least one row and one column.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Build a matrix from row-major `data`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, LinalgError> {
        if rows == 0 || cols == 0 {
            return Err(LinalgError::EmptyMatrix);
        }
        if data.len() != rows * cols {
            return Err(LinalgError::DimensionMismatch {
                operation: "build",
                left: (rows, cols),
                right: (data.len(), 1),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from its rows. Every row must have the same, nonzero, length.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, LinalgError>
    where
        R: AsRef<[f64]>,
    {
        let Some(first) = rows.first() else {
            return Err(LinalgError::EmptyMatrix);
        };
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(LinalgError::EmptyMatrix);
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(LinalgError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// All-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, LinalgError> {
        Self::new(rows, cols, vec![0.0; rows * cols])
    }

    /// `n × n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, LinalgError> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Is this a square matrix?
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// One row of the matrix.
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols)
    }

    /// Largest absolute value of any entry.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|v| v.abs()).fold(0.0, libm::fmax)
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Matrix product `self · rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.cols != rhs.rows {
            return Err(LinalgError::DimensionMismatch {
                operation: "multiply",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let mut data = vec![0.0; self.rows * rhs.cols];
        for (i, out_row) in data.chunks_exact_mut(rhs.cols).enumerate() {
            for (k, &a_ik) in self.row(i).iter().enumerate() {
                for (out, &b_kj) in out_row.iter_mut().zip(rhs.row(k)) {
                    *out += a_ik * b_kj;
                }
            }
        }
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: rhs.cols,
        })
    }

    /// Matrix-vector product `self · v`.
    pub fn multiply_vector(&self, v: &[f64]) -> Result<Vec<f64>, LinalgError> {
        if self.cols != v.len() {
            return Err(LinalgError::DimensionMismatch {
                operation: "multiply",
                left: self.shape(),
                right: (v.len(), 1),
            });
        }
        Ok(self
            .rows()
            .map(|row| row.iter().zip(v).map(|(a, x)| a * x).sum::<f64>())
            .collect())
    }

    /// The transpose, i.e. `out[(i, j)] == self[(j, i)]`.
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            data.extend(self.rows().map(|row| row[j]));
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Swap two rows, but only the entries from column `from_col` onwards.
    pub(crate) fn swap_rows_from(&mut self, a: usize, b: usize, from_col: usize) {
        if a == b {
            return;
        }
        for j in from_col..self.cols {
            let (i, k) = (self.offset(a, j), self.offset(b, j));
            self.data.swap(i, k);
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        &self.data[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }
}

impl<const R: usize, const C: usize> TryFrom<[[f64; C]; R]> for Matrix {
    type Error = LinalgError;

    fn try_from(rows: [[f64; C]; R]) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl std::fmt::Display for Matrix {
    #[mutants::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<_> = row.iter().map(|v| format!("{v:>10.4}")).collect();
            write!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
