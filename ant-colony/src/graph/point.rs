use serde::Serialize;

use super::Node;

/// A node together with its planar coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Point {
    pub node: Node,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Point {
            node: Node::new(id),
            x,
            y,
        }
    }
}

impl From<(usize, f64, f64)> for Point {
    fn from(input: (usize, f64, f64)) -> Self {
        Point::new(input.0, input.1, input.2)
    }
}
