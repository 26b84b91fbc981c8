#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

use crate::model::SurfaceSize;
use crate::state::{Camera, Grid, Tile};

/// Inclusive grid-index bounds covered by the viewport. May extend past the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleBounds {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl VisibleBounds {
    pub fn compute(camera: &Camera, size: SurfaceSize, tile_size: f64) -> Self {
        let half = size.half();
        let rel_x = half.x / camera.zoom;
        let rel_y = half.y / camera.zoom;
        let cell = |v: f64| (v / tile_size).floor() as i64;
        Self {
            left: cell(camera.position.x - rel_x),
            right: cell(camera.position.x + rel_x),
            top: cell(camera.position.y - rel_y),
            bottom: cell(camera.position.y + rel_y),
        }
    }
}

/// Tiles intersecting the viewport, row-major (ascending y, then x).
/// Indices outside the grid are skipped.
pub fn compute_visible<'a, H>(
    camera: &Camera,
    size: SurfaceSize,
    grid: &'a Grid<H>,
) -> Vec<&'a Tile<H>> {
    let b = VisibleBounds::compute(camera, size, grid.tile_size());
    let gs = grid.size();
    let top = b.top.max(0);
    let bottom = b.bottom.min(gs.rows as i64 - 1);
    let left = b.left.max(0);
    let right = b.right.min(gs.columns as i64 - 1);
    let mut visible = Vec::new();
    for y in top..=bottom {
        for x in left..=right {
            if let Some(tile) = grid.get(x, y) {
                visible.push(tile);
            }
        }
    }
    visible
}
