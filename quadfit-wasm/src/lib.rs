//! Canvas-facing bindings: fit a transform from dragged corners, and move points
//! around the way the canvas handles do.
use quadfit::{Point, compute_affine_transform};
use wasm_bindgen::prelude::*;

/// Find the transform mapping the `source` quad onto the `target` quad.
/// Both are 8 numbers, `x0, y0, ..., x3, y3`. Returns `[a, b, c, d, e, f]`,
/// ready for `ctx.setTransform(...)`.
#[wasm_bindgen]
pub fn affine_transform(source: Vec<f64>, target: Vec<f64>) -> Result<Vec<f64>, JsError> {
    fit(&source, &target).map_err(|e| JsError::new(&e))
}

/// Rotate `(x, y)` about `(cx, cy)`, returning `[x, y]`.
#[wasm_bindgen]
pub fn rotate_point(x: f64, y: f64, cx: f64, cy: f64, angle: f64) -> Vec<f64> {
    let p = Point::new(x, y).rotate_about(Point::new(cx, cy), angle);
    <[f64; 2]>::from(p).to_vec()
}

/// Scale `(x, y)` away from `(cx, cy)`, returning `[x, y]`.
#[wasm_bindgen]
pub fn scale_point(x: f64, y: f64, cx: f64, cy: f64, factor: f64) -> Vec<f64> {
    let p = Point::new(x, y).scale_about(Point::new(cx, cy), factor);
    <[f64; 2]>::from(p).to_vec()
}

/// Turn a mouse event's client coordinates into canvas coordinates,
/// given the canvas bounding rect's top-left corner.
#[wasm_bindgen]
pub fn canvas_point(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Vec<f64> {
    let p = Point::new(client_x, client_y).relative_to(Point::new(rect_left, rect_top));
    <[f64; 2]>::from(p).to_vec()
}

fn fit(source: &[f64], target: &[f64]) -> Result<Vec<f64>, String> {
    let source = quad(source, "source")?;
    let target = quad(target, "target")?;
    let transform = compute_affine_transform(source, target).map_err(|e| e.to_string())?;
    Ok(transform.to_array().to_vec())
}

fn quad(values: &[f64], name: &str) -> Result<[Point; 4], String> {
    let &[x0, y0, x1, y1, x2, y2, x3, y3] = values else {
        return Err(format!(
            "{name} needs 8 numbers (4 points), but got {}",
            values.len()
        ));
    };
    Ok([(x0, y0), (x1, y1), (x2, y2), (x3, y3)].map(Point::from))
}
