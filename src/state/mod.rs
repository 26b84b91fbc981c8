pub mod camera;
pub mod grid;
pub mod transform;
pub mod visibility;

pub use camera::Camera;
pub use grid::{Grid, Tile};
pub use transform::world_to_screen;
pub use visibility::{VisibleBounds, compute_visible};
