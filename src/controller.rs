#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::RefCell;
use std::rc::Weak;

use futures::StreamExt;
use futures::channel::mpsc::UnboundedReceiver;

use crate::config::ViewerConfig;
use crate::model::{GridPos, Point, SurfaceSize};
use crate::render::{FrameStats, RenderSurface, draw_tile, render};
use crate::state::{Camera, Grid, compute_visible};

/// Raw input from the page, already reduced to surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Wheel(f64),
    Resize(SurfaceSize),
}

/// Owns the camera, the tile grid and the surface. Every event is handled
/// synchronously and triggers at most one render pass.
pub struct MapController<S: RenderSurface> {
    camera: Camera,
    grid: Grid<S::Image>,
    surface: S,
    background: String,
}

impl<S: RenderSurface> MapController<S> {
    /// Builds the grid (starting every image load through `load`) and centers the camera.
    pub fn new(
        cfg: &ViewerConfig,
        surface: S,
        load: impl FnMut(GridPos, &str) -> S::Image,
    ) -> Self {
        let grid = Grid::new(cfg, load);
        let mut camera = Camera::new(cfg);
        camera.center_position(grid.size(), grid.tile_size());
        Self {
            camera,
            grid,
            surface,
            background: cfg.background.clone(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[cfg(test)]
    pub fn grid(&self) -> &Grid<S::Image> {
        &self.grid
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_dragging(&self) -> bool {
        self.camera.panning
    }

    /// Applies one input event. Returns the frame stats if a render pass ran.
    pub fn handle(&mut self, event: InputEvent) -> Option<FrameStats> {
        let redraw = match event {
            InputEvent::PointerDown(p) => {
                self.camera.start_drag(p);
                false
            }
            InputEvent::PointerMove(p) => self.camera.drag(p),
            InputEvent::PointerUp => {
                self.camera.stop_drag();
                false
            }
            InputEvent::Wheel(delta) => self.camera.zoom_by(delta),
            InputEvent::Resize(size) => {
                if !(size.width.is_finite() && size.height.is_finite()) {
                    return None;
                }
                self.surface.set_size(size);
                true
            }
        };
        redraw.then(|| self.render_pass())
    }

    /// Re-applies the startup centering and redraws.
    pub fn recenter(&mut self) -> FrameStats {
        self.camera
            .center_position(self.grid.size(), self.grid.tile_size());
        self.render_pass()
    }

    /// Full clear and redraw of the visible set.
    pub fn render_pass(&mut self) -> FrameStats {
        let size = self.surface.size();
        let visible = compute_visible(&self.camera, size, &self.grid);
        let (stats, deferred) = render(
            &visible,
            &self.camera,
            self.grid.tile_size(),
            &self.background,
            &mut self.surface,
        );
        for pos in deferred {
            self.grid.request_draw_on_load(pos);
        }
        stats
    }

    /// Load-completion notification. Draws the tile alone if a pass was waiting
    /// on it; returns whether it was drawn.
    pub fn tile_loaded(&mut self, pos: GridPos) -> bool {
        if !self.grid.mark_loaded(pos) {
            return false;
        }
        match self.grid.get(pos.x as i64, pos.y as i64) {
            Some(tile) => draw_tile(tile, &self.camera, self.grid.tile_size(), &mut self.surface),
            None => false,
        }
    }
}

/// Feeds load completions into the controller in `slot` until the channel
/// closes or the slot is gone. Callers abort it when the slot is reused.
pub async fn forward_loads<S: RenderSurface>(
    mut loaded: UnboundedReceiver<GridPos>,
    slot: Weak<RefCell<Option<MapController<S>>>>,
) {
    while let Some(pos) = loaded.next().await {
        let Some(slot) = slot.upgrade() else {
            break;
        };
        if let Some(ctrl) = slot.borrow_mut().as_mut() {
            ctrl.tile_loaded(pos);
        }
    }
}
