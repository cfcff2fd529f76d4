//! Error types, layered the way the crate is: linear algebra, then fitting, then the textual format.

/// Errors from the dense matrix primitives and the linear solvers built on them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum LinalgError {
    /// Operand shapes are incompatible for the requested operation.
    #[error(
        "Cannot {operation} a {}x{} matrix with a {}x{} operand",
        .left.0,
        .left.1,
        .right.0,
        .right.1
    )]
    DimensionMismatch {
        /// Which operation was attempted.
        operation: &'static str,
        /// Shape (rows, cols) of the left operand.
        left: (usize, usize),
        /// Shape (rows, cols) of the right operand. Vectors are `(len, 1)`.
        right: (usize, usize),
    },
    /// Elimination found no usable pivot, so the system has no unique solution.
    #[error("Matrix is singular: no usable pivot in column {column}")]
    SingularMatrix {
        /// Column being eliminated when the pivot vanished.
        column: usize,
    },
    /// A matrix must have at least one row and one column.
    #[error("A matrix needs at least one row and one column")]
    EmptyMatrix,
    /// Rows passed to a matrix constructor had different lengths.
    #[error("Row {row} has {found} entries but the matrix has {expected} columns")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
}

/// Errors from fitting an affine transform.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum Error {
    /// The source points are collinear or coincide, so no unique transform exists.
    #[error(
        "The source points are degenerate (collinear or coincident), so no unique affine transform maps them onto the target points"
    )]
    DegenerateConfiguration,
    /// A source or target coordinate is NaN or infinite.
    #[error("Every source and target coordinate must be finite")]
    NonFiniteInput,
    /// The points are finite, but the transform between them is too large to represent as `f64`.
    #[error("The fitted transform overflows: its coefficients don't fit in an f64")]
    Overflow,
    /// Some other linear algebra failure.
    #[error("{0}")]
    Linalg(#[from] LinalgError),
}

/// Errors from solving problems written in the textual format.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum TextualError {
    /// An affine fit needs exactly four correspondences.
    #[error("Expected exactly 4 correspondences but found {found}")]
    WrongNumberOfCorrespondences {
        /// How many correspondences the problem declared.
        found: usize,
    },
    /// The same label was declared twice.
    #[error("The label {label} was declared more than once")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
    /// The fit itself failed.
    #[error("{0}")]
    Fit(#[from] Error),
}
