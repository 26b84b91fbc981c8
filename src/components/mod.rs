pub mod app;
pub mod camera_controls;
pub mod debug_overlay;
pub mod map_view;
