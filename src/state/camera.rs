#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::config::ViewerConfig;
use crate::model::{GridSize, Point};

/// Pan/zoom state. `position` is the world point shown at the surface center.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point,
    pub zoom: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub wheel_factor: f64,
    pub panning: bool,
    pub last_x: f64,
    pub last_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl Camera {
    pub fn new(cfg: &ViewerConfig) -> Self {
        Self {
            position: Point::default(),
            zoom: cfg.clamped_initial_zoom(),
            zoom_min: cfg.zoom_min,
            zoom_max: cfg.zoom_max,
            wheel_factor: cfg.wheel_factor,
            panning: false,
            last_x: 0.0,
            last_y: 0.0,
        }
    }

    /// Moves the camera to the middle of the grid.
    pub fn center_position(&mut self, grid: GridSize, tile_size: f64) {
        self.position.x = grid.columns as f64 * tile_size / 2.0;
        self.position.y = grid.rows as f64 * tile_size / 2.0;
    }

    pub fn start_drag(&mut self, pointer: Point) {
        if !pointer.is_finite() {
            return;
        }
        self.panning = true;
        self.last_x = pointer.x;
        self.last_y = pointer.y;
        log::debug!("drag start at ({}, {})", pointer.x, pointer.y);
    }

    /// Pans by the pointer movement since the last anchor, scaled by 1/zoom.
    /// Returns true when the camera moved and a redraw is due.
    pub fn drag(&mut self, pointer: Point) -> bool {
        if !self.panning || !pointer.is_finite() {
            return false;
        }
        let dx = pointer.x - self.last_x;
        let dy = pointer.y - self.last_y;
        self.position.x -= dx / self.zoom;
        self.position.y -= dy / self.zoom;
        self.last_x = pointer.x;
        self.last_y = pointer.y;
        true
    }

    pub fn stop_drag(&mut self) {
        if self.panning {
            log::debug!("drag stop at x{} y{}", self.position.x, self.position.y);
        }
        self.panning = false;
    }

    /// Applies a wheel delta, clamping into the zoom range. Infinite deltas
    /// clamp to a bound; only NaN is dropped.
    pub fn zoom_by(&mut self, wheel_delta: f64) -> bool {
        let next = self.zoom + wheel_delta * self.wheel_factor;
        if next.is_nan() {
            return false;
        }
        self.zoom = next.clamp(self.zoom_min, self.zoom_max);
        log::debug!("zoom {}", self.zoom);
        true
    }
}
