#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::model::GridSize;

pub const DEFAULT_TILE_SIZE: f64 = 2000.0;
pub const DEFAULT_ZOOM_MIN: f64 = 0.05;
pub const DEFAULT_ZOOM_MAX: f64 = 1.0;
/// Wheel delta to zoom factor. Negative so scrolling forward zooms in.
pub const DEFAULT_WHEEL_FACTOR: f64 = -0.01;
pub const DEFAULT_TILE_TEMPLATE: &str = "tiles/MapTex_{column}-{row}.png";

/// Viewer settings. Every field falls back to the stock 12x10 map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Row labels, top to bottom.
    pub rows: Vec<String>,
    /// Column labels, left to right.
    pub columns: Vec<String>,
    pub tile_size: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub initial_zoom: f64,
    pub wheel_factor: f64,
    pub background: String,
    pub tile_template: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rows: (0..10).map(|r| r.to_string()).collect(),
            columns: ('A'..='L').map(|c| c.to_string()).collect(),
            tile_size: DEFAULT_TILE_SIZE,
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            initial_zoom: 1.0,
            wheel_factor: DEFAULT_WHEEL_FACTOR,
            background: "#000".to_string(),
            tile_template: DEFAULT_TILE_TEMPLATE.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: ViewerConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() || self.columns.is_empty() {
            return Err(ViewerError::InvalidConfig(
                "grid needs at least one row and one column".into(),
            ));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(ViewerError::InvalidConfig(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        if !(self.zoom_min.is_finite() && self.zoom_max.is_finite())
            || self.zoom_min <= 0.0
            || self.zoom_min > self.zoom_max
        {
            return Err(ViewerError::InvalidConfig(format!(
                "zoom range [{}, {}] is not valid",
                self.zoom_min, self.zoom_max
            )));
        }
        if !self.wheel_factor.is_finite() {
            return Err(ViewerError::InvalidConfig("wheel_factor must be finite".into()));
        }
        if !self.tile_template.contains("{column}") || !self.tile_template.contains("{row}") {
            return Err(ViewerError::InvalidConfig(format!(
                "tile_template `{}` must contain {{column}} and {{row}}",
                self.tile_template
            )));
        }
        Ok(())
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize {
            columns: self.columns.len() as u32,
            rows: self.rows.len() as u32,
        }
    }

    /// Initial zoom forced into the configured range.
    pub fn clamped_initial_zoom(&self) -> f64 {
        if self.initial_zoom.is_finite() {
            self.initial_zoom.clamp(self.zoom_min, self.zoom_max)
        } else {
            self.zoom_max
        }
    }
}
