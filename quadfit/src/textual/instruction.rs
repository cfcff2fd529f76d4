use crate::Point;

use super::Label;

/// `label (x, y) -> (x, y)`
#[derive(Debug, PartialEq, Clone)]
pub struct Correspondence {
    /// Name of the correspondence.
    pub label: Label,
    /// Point in the source quadrilateral.
    pub from: Point,
    /// Where `from` should land.
    pub to: Point,
}

/// `label (x, y)`
#[derive(Debug, PartialEq, Clone)]
pub struct Query {
    /// Name of the point.
    pub label: Label,
    /// Where the point is, before transforming.
    pub point: Point,
}
