use rand::Rng;

use crate::constants::{CELL_HEIGHT, CELL_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    pub fn add(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }
}

/// Drawing surface size in virtual pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Canvas { width, height }
    }

    /// Canvas covered by a terminal of `columns` x `rows` cells.
    pub fn from_cells(columns: u16, rows: u16) -> Self {
        Canvas::new(columns as f64 * CELL_WIDTH, rows as f64 * CELL_HEIGHT)
    }
}

/// Horizontal wrap: past the right edge restarts at 0, fully past the left edge
/// (by more than `size`) restarts at the right edge.
pub fn wrap_horizontal(x: f64, size: f64, width: f64) -> f64 {
    if x > width {
        0.0
    } else if x < -size {
        width
    } else {
        x
    }
}

/// Uniform draw from `[0, max)`, or 0 when the range is empty.
pub fn random_below(rng: &mut impl Rng, max: f64) -> f64 {
    if max > 0.0 {
        rng.gen_range(0.0..max)
    } else {
        0.0
    }
}
