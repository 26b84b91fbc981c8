#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::error::Result;
use crate::model::{GridPos, Point, SurfaceSize};
use crate::state::{Camera, Tile, world_to_screen};

/// Drawing target for the renderer.
pub trait RenderSurface {
    type Image;

    fn size(&self) -> SurfaceSize;
    fn set_size(&mut self, size: SurfaceSize);
    fn clear(&mut self, color: &str);
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, width: f64, height: f64)
    -> Result<()>;
}

/// Outcome of one render pass, also fed to the debug overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub position: Point,
    pub zoom: f64,
    pub visible: usize,
    pub drawn: usize,
    pub deferred: usize,
}

/// Draws a loaded tile scaled to `tile_size * zoom`. Draw failures are logged only.
pub fn draw_tile<S: RenderSurface>(
    tile: &Tile<S::Image>,
    camera: &Camera,
    tile_size: f64,
    surface: &mut S,
) -> bool {
    let size = surface.size();
    let edge = tile_size * camera.zoom;
    let pos = world_to_screen(tile.world_origin(tile_size), camera, size);
    match surface.draw_image(&tile.image, pos.x, pos.y, edge, edge) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("draw {} failed: {e}", tile.name);
            false
        }
    }
}

/// Clears the surface and draws every loaded tile in order.
/// Returns the positions of tiles still loading; they are drawn on completion.
pub fn render<S: RenderSurface>(
    visible: &[&Tile<S::Image>],
    camera: &Camera,
    tile_size: f64,
    background: &str,
    surface: &mut S,
) -> (FrameStats, Vec<GridPos>) {
    let size = surface.size();
    surface.clear(background);
    let mut stats = FrameStats {
        position: camera.position,
        zoom: camera.zoom,
        visible: visible.len(),
        ..Default::default()
    };
    let mut deferred = Vec::new();
    for tile in visible {
        if !tile.loaded {
            deferred.push(tile.grid_position);
            continue;
        }
        if draw_tile(tile, camera, tile_size, surface) {
            stats.drawn += 1;
        }
    }
    stats.deferred = deferred.len();
    log::trace!(
        "render {}x{}: {} visible, {} drawn, {} deferred",
        size.width,
        size.height,
        stats.visible,
        stats.drawn,
        stats.deferred
    );
    (stats, deferred)
}
