//! Core value types for the tile map viewer.
//! World units are pixels at zoom 1; screen units are device pixels.

use serde::{Deserialize, Serialize};

/// A position in either world or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Offset that places the camera position at the middle of the surface.
    pub fn half(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Integer cell coordinate: `x` is the column index, `y` the row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.columns as i64 && y < self.rows as i64
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Fills a tile URL template with a cell's column and row labels.
pub fn tile_image_name(template: &str, column: &str, row: &str) -> String {
    template.replace("{column}", column).replace("{row}", row)
}
