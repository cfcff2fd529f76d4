use std::str::FromStr;

use super::*;
use crate::textual::Problem;


const EPSILON: f64 = 1e-9;

#[track_caller]
pub(crate) fn assert_nearly_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[track_caller]
pub(crate) fn assert_transform_nearly_eq(actual: AffineTransform, expected: AffineTransform) {
    for (a, e) in actual.to_array().into_iter().zip(expected.to_array()) {
        assert!(
            (a - e).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }
}

fn quad(points: [(f64, f64); 4]) -> [Point; 4] {
    points.map(Point::from)
}

#[test]
fn simple() {
    let problem = Problem::from_str(
        "
    # correspondences
    tl (0, 0) -> (10, 10)
    tr (4, 0) -> (18, 10)
    bl (0, 3) -> (10, 16)
    br (4, 3) -> (18, 16)
    ",
    )
    .unwrap();
    assert_eq!(problem.labels(), vec!["tl", "tr", "bl", "br"]);
    let solved = problem.solve().unwrap();
    assert_transform_nearly_eq(
        solved.transform,
        AffineTransform::from([2.0, 0.0, 0.0, 2.0, 10.0, 10.0]),
    );
}

#[test]
fn identity() {
    let square = quad([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    let t = compute_affine_transform(square, square).unwrap();
    assert_transform_nearly_eq(t, AffineTransform::IDENTITY);
}

#[test]
fn translation_only() {
    let square = quad([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    for (dx, dy) in [(1.0, 1.0), (-3.25, 0.5), (100.0, -250.0)] {
        let shifted = square.map(|p| Point::new(p.x + dx, p.y + dy));
        let t = compute_affine_transform(square, shifted).unwrap();
        assert_transform_nearly_eq(t, AffineTransform::from([1.0, 0.0, 0.0, 1.0, dx, dy]));
    }
}

#[test]
fn rotation_and_scale_round_trip() {
    // Build the target by rotating then scaling each corner, like a canvas handle drag would.
    let center = Point::new(2.0, 1.5);
    let angle = 0.3f64;
    let factor = 1.75;
    let source = quad([(0.0, 0.0), (4.0, 0.0), (0.0, 3.0), (4.0, 3.0)]);
    let target = source.map(|p| p.rotate_about(center, angle).scale_about(center, factor));
    let t = compute_affine_transform(source, target).unwrap();

    let (sin, cos) = angle.sin_cos();
    assert_nearly_eq(t.a, factor * cos);
    assert_nearly_eq(t.b, factor * sin);
    assert_nearly_eq(t.c, -factor * sin);
    assert_nearly_eq(t.d, factor * cos);
    // The center is a fixed point of this transform.
    assert!(t.apply(center).euclidean_distance(center) < EPSILON);
}

#[test]
fn square_far_from_origin() {
    // A 100px square in canvas pixels, nowhere near (0, 0).
    let known = AffineTransform::from([1.5, 0.2, -0.3, 0.8, 7.0, -3.0]);
    let source = quad([(0.0, 0.0), (100.0, 0.0), (0.0, 100.0), (100.0, 100.0)])
        .map(|p| Point::new(p.x + 10_000.0, p.y + 10_000.0));
    let target = source.map(|p| known.apply(p));
    for config in [Config::default(), Config::exact()] {
        let t = compute_affine_transform_with_config(source, target, config).unwrap();
        for (got, want) in t.to_array().into_iter().zip(known.to_array()) {
            assert!((got - want).abs() < 1e-7, "expected {known}, got {t}");
        }
    }
}

#[test]
fn degenerate() {
    let on_x_axis = quad([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (5.0, 0.0)]);
    let target = quad([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    let err = compute_affine_transform(on_x_axis, target).unwrap_err();
    assert_eq!(err, Error::DegenerateConfiguration);
    assert!(err.to_string().contains("degenerate"));
}

#[test]
fn exact_config_still_catches_exact_degeneracy() {
    let on_x_axis = quad([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (5.0, 0.0)]);
    let target = quad([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    assert_eq!(
        compute_affine_transform_with_config(on_x_axis, target, Config::exact()).unwrap_err(),
        Error::DegenerateConfiguration
    );
}

#[test]
fn gaussian_elimination_known_solution() {
    let a = Matrix::try_from([[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]]).unwrap();
    let x = solve_linear_system(&a, &[8.0, -11.0, -3.0]).unwrap();
    assert_nearly_eq(x[0], 2.0);
    assert_nearly_eq(x[1], 3.0);
    assert_nearly_eq(x[2], -1.0);
}

#[test]
fn singular_two_by_two() {
    let a = Matrix::try_from([[1.0, 2.0], [2.0, 4.0]]).unwrap();
    let err = solve_linear_system(&a, &[5.0, 7.0]).unwrap_err();
    assert!(matches!(err, LinalgError::SingularMatrix { .. }));
}

#[test]
fn shapes() {
    let a = Matrix::zeros(2, 3).unwrap();
    let b = Matrix::zeros(3, 2).unwrap();
    assert_eq!(a.multiply(&b).unwrap().shape(), (2, 2));
    assert_eq!(b.multiply(&a).unwrap().shape(), (3, 3));
    let err = a.multiply(&a).unwrap_err();
    assert!(matches!(err, LinalgError::DimensionMismatch { .. }));
    assert_eq!(err.to_string(), "Cannot multiply a 2x3 matrix with a 2x3 operand");
}

#[test]
fn linalg_errors_wrap() {
    let err: Error = LinalgError::EmptyMatrix.into();
    assert_eq!(err, Error::Linalg(LinalgError::EmptyMatrix));
    assert_eq!(err.to_string(), LinalgError::EmptyMatrix.to_string());
}
