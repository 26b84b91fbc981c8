#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::model::{Point, SurfaceSize};
use crate::state::Camera;

/// Maps a world point to the surface, centering the camera position.
pub fn world_to_screen(world: Point, camera: &Camera, size: SurfaceSize) -> Point {
    let offset = size.half();
    Point {
        x: (world.x - camera.position.x) * camera.zoom + offset.x,
        y: (world.y - camera.position.y) * camera.zoom + offset.y,
    }
}

#[cfg_attr(not(test), allow(dead_code))]
pub fn screen_to_world(screen: Point, camera: &Camera, size: SurfaceSize) -> Point {
    let offset = size.half();
    Point {
        x: (screen.x - offset.x) / camera.zoom + camera.position.x,
        y: (screen.y - offset.y) / camera.zoom + camera.position.y,
    }
}
