//! Fitting a 2D affine transform to four point correspondences.

use crate::{
    Error, LinalgError, Matrix, Point,
    least_squares::solve_least_squares_with_config,
    solver::Config,
};

/// Rows and columns of the system built from 4 correspondences.
const NUM_EQUATIONS: usize = 8;
const NUM_UNKNOWNS: usize = 6;

/// 2D affine transform with coefficients in the same order as a canvas `DOMMatrix`:
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AffineTransform {
    #[allow(missing_docs)]
    pub a: f64,
    #[allow(missing_docs)]
    pub b: f64,
    #[allow(missing_docs)]
    pub c: f64,
    #[allow(missing_docs)]
    pub d: f64,
    /// Translation along X.
    pub e: f64,
    /// Translation along Y.
    pub f: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    /// Maps every point to itself.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Map a point through this transform.
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// Coefficients as `[a, b, c, d, e, f]`.
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// How far each mapped source point lands from its target.
    pub fn residuals(&self, source: [Point; 4], target: [Point; 4]) -> [f64; 4] {
        std::array::from_fn(|i| self.apply(source[i]).euclidean_distance(target[i]))
    }

    /// Are all coefficients finite?
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<[f64; 6]> for AffineTransform {
    fn from([a, b, c, d, e, f]: [f64; 6]) -> Self {
        Self { a, b, c, d, e, f }
    }
}

impl From<AffineTransform> for [f64; 6] {
    fn from(t: AffineTransform) -> Self {
        t.to_array()
    }
}

impl std::fmt::Display for AffineTransform {
    #[mutants::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { a, b, c, d, e, f: ff } = self;
        write!(f, "matrix({a}, {b}, {c}, {d}, {e}, {ff})")
    }
}

/// Find the affine transform which best maps each `source[i]` onto `target[i]`,
/// in the least-squares sense.
pub fn compute_affine_transform(
    source: [Point; 4],
    target: [Point; 4],
) -> Result<AffineTransform, Error> {
    compute_affine_transform_with_config(source, target, Config::default())
}

/// Like [`compute_affine_transform`] but with a custom solver config.
pub fn compute_affine_transform_with_config(
    source: [Point; 4],
    target: [Point; 4],
    config: Config,
) -> Result<AffineTransform, Error> {
    if !source.iter().chain(&target).all(|p| p.is_finite()) {
        return Err(Error::NonFiniteInput);
    }
    let from = Normalization::of(&source);
    let to = Normalization::of(&target);
    if !from.scale.is_finite() || !to.scale.is_finite() {
        return Err(Error::Overflow);
    }
    if from.scale <= 0.0 {
        log::debug!("affine fit is degenerate, every source point is at {}", from.centroid);
        return Err(Error::DegenerateConfiguration);
    }
    // Coincident targets are fine, everything just maps onto one point.
    let to = if to.scale <= 0.0 {
        Normalization { scale: 1.0, ..to }
    } else {
        to
    };

    let (a, rhs) = build_system(source.map(|p| from.apply(p)), target.map(|p| to.apply(p)))?;
    let coeffs = match solve_least_squares_with_config(&a, &rhs, config) {
        Ok(coeffs) => coeffs,
        Err(LinalgError::SingularMatrix { column }) => {
            log::debug!("affine fit is degenerate, singular at column {column}");
            return Err(Error::DegenerateConfiguration);
        }
        Err(e) => return Err(e.into()),
    };
    // Unknowns are ordered by row layout: [a, c, e, b, d, f].
    let &[a, c, e, b, d, f] = coeffs.as_slice() else {
        return Err(LinalgError::DimensionMismatch {
            operation: "unpack",
            left: (NUM_UNKNOWNS, 1),
            right: (coeffs.len(), 1),
        }
        .into());
    };
    let transform = to.undo(from, AffineTransform { a, b, c, d, e, f });
    if !transform.is_finite() {
        log::debug!("fitted transform overflows: {transform}");
        return Err(Error::Overflow);
    }
    log::debug!("fitted {transform}");
    Ok(transform)
}

/// Moves a quad's centroid to the origin and scales it so the mean distance
/// from the centroid is 1.
///
/// Fitting in these coordinates keeps the normal equations about as well
/// conditioned as the quad's shape allows, wherever the quad sits on the canvas.
#[derive(Clone, Copy, Debug)]
struct Normalization {
    centroid: Point,
    scale: f64,
}

impl Normalization {
    fn of(points: &[Point; 4]) -> Self {
        // Divide before summing, so huge coordinates don't overflow.
        let centroid = points.iter().fold(Point::default(), |acc, p| Point {
            x: acc.x + p.x / 4.0,
            y: acc.y + p.y / 4.0,
        });
        let scale = points
            .iter()
            .map(|p| p.euclidean_distance(centroid) / 4.0)
            .sum::<f64>();
        Self { centroid, scale }
    }

    fn apply(&self, p: Point) -> Point {
        let d = p.relative_to(self.centroid);
        Point::new(d.x / self.scale, d.y / self.scale)
    }

    /// `self` normalized the target and `from` the source. Turn a transform between
    /// the normalized quads back into one between the originals.
    fn undo(&self, from: Normalization, t: AffineTransform) -> AffineTransform {
        let ratio = self.scale / from.scale;
        let (a, b, c, d) = (t.a * ratio, t.b * ratio, t.c * ratio, t.d * ratio);
        let origin = from.centroid;
        AffineTransform {
            a,
            b,
            c,
            d,
            e: self.centroid.x + self.scale * t.e - (a * origin.x + c * origin.y),
            f: self.centroid.y + self.scale * t.f - (b * origin.x + d * origin.y),
        }
    }
}

/// Two equations per correspondence `p -> q`:
/// ```text
/// q.x = a·p.x + c·p.y + e    row [p.x, p.y, 1, 0,   0,   0]
/// q.y = b·p.x + d·p.y + f    row [0,   0,   0, p.x, p.y, 1]
/// ```
fn build_system(
    source: [Point; 4],
    target: [Point; 4],
) -> Result<(Matrix, Vec<f64>), LinalgError> {
    let mut a = Matrix::zeros(NUM_EQUATIONS, NUM_UNKNOWNS)?;
    let mut rhs = Vec::with_capacity(NUM_EQUATIONS);
    for (i, (p, q)) in source.into_iter().zip(target).enumerate() {
        let row_x = 2 * i;
        let row_y = row_x + 1;
        a[(row_x, 0)] = p.x;
        a[(row_x, 1)] = p.y;
        a[(row_x, 2)] = 1.0;
        a[(row_y, 3)] = p.x;
        a[(row_y, 4)] = p.y;
        a[(row_y, 5)] = 1.0;
        rhs.push(q.x);
        rhs.push(q.y);
    }
    Ok((a, rhs))
}
