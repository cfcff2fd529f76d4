//! 2D points and the closed-form helpers used around the affine fit.

use libm::{cos, hypot, sin};

/// A point in 2D space.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct Point {
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
}

/// Points can be easily converted to/from an (x, y) pair.
impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Points can be easily converted to/from an (x, y) pair.
impl From<Point> for (f64, f64) {
    fn from(Point { x, y }: Point) -> Self {
        (x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(Point { x, y }: Point) -> Self {
        [x, y]
    }
}

impl std::fmt::Display for Point {
    #[mutants::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Point {
    #[inline(always)]
    #[allow(missing_docs)]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    pub fn euclidean_distance(self, r: Point) -> f64 {
        let d = self - r;
        hypot(d.x, d.y)
    }

    /// Are both components finite?
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotate this point counter-clockwise (in a y-up frame) around `center`.
    pub fn rotate_about(self, center: Point, angle_radians: f64) -> Point {
        let (cos_theta, sin_theta) = (cos(angle_radians), sin(angle_radians));
        let d = self - center;
        Point {
            x: cos_theta * d.x - sin_theta * d.y + center.x,
            y: sin_theta * d.x + cos_theta * d.y + center.y,
        }
    }

    /// Move this point towards (`factor < 1`) or away from (`factor > 1`) `center`.
    pub fn scale_about(self, center: Point, factor: f64) -> Point {
        Point {
            x: center.x + (self.x - center.x) * factor,
            y: center.y + (self.y - center.y) * factor,
        }
    }

    /// This point in a frame whose origin is at `origin`.
    /// E.g. a mouse position in page coordinates, relative to a canvas' top-left corner.
    pub fn relative_to(self, origin: Point) -> Point {
        self - origin
    }
}
