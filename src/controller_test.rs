#![allow(clippy::float_cmp)]

use super::*;
use crate::test_support::{FakeSurface, Op, index_handle};

fn controller() -> MapController<FakeSurface> {
    let cfg = ViewerConfig::default();
    MapController::new(&cfg, FakeSurface::new(800.0, 600.0), index_handle(cfg.grid_size()))
}

fn tile(x: u32, y: u32) -> u32 {
    y * 12 + x
}

#[test]
fn starts_centered_with_every_load_requested() {
    let cfg = ViewerConfig::default();
    let mut handle = index_handle(cfg.grid_size());
    let mut names = Vec::new();
    let ctrl = MapController::new(&cfg, FakeSurface::default(), |pos, name: &str| {
        names.push(name.to_string());
        handle(pos, name)
    });
    assert_eq!(names.len(), 120);
    assert_eq!(ctrl.camera().position, Point::new(12000.0, 10000.0));
    assert_eq!(ctrl.camera().zoom, 1.0);
    assert!(ctrl.surface().ops.is_empty());
}

#[test]
fn resize_sets_surface_size_and_renders() {
    let mut ctrl = controller();
    let stats = ctrl
        .handle(InputEvent::Resize(SurfaceSize::new(4000.0, 200.0)))
        .unwrap();
    assert_eq!(ctrl.surface().size, SurfaceSize::new(4000.0, 200.0));
    assert_eq!(stats.visible, 6);
    assert_eq!(stats.deferred, 6);
    assert_eq!(ctrl.surface().ops, vec![Op::Clear("#000".into())]);
    // resize never moves the camera
    assert_eq!(ctrl.camera().position, Point::new(12000.0, 10000.0));
}

#[test]
fn non_finite_resize_is_ignored() {
    let mut ctrl = controller();
    assert!(ctrl
        .handle(InputEvent::Resize(SurfaceSize::new(f64::NAN, 10.0)))
        .is_none());
    assert_eq!(ctrl.surface().size, SurfaceSize::new(800.0, 600.0));
}

#[test]
fn pointer_down_and_up_do_not_render() {
    let mut ctrl = controller();
    assert!(ctrl.handle(InputEvent::PointerDown(Point::new(1.0, 1.0))).is_none());
    assert!(ctrl.is_dragging());
    assert!(ctrl.handle(InputEvent::PointerUp).is_none());
    assert!(!ctrl.is_dragging());
    assert!(ctrl.surface().ops.is_empty());
}

#[test]
fn move_without_down_changes_nothing() {
    let mut ctrl = controller();
    assert!(ctrl.handle(InputEvent::PointerMove(Point::new(50.0, 50.0))).is_none());
    assert_eq!(ctrl.camera().position, Point::new(12000.0, 10000.0));
    assert!(ctrl.surface().ops.is_empty());
}

#[test]
fn drag_pans_and_renders_once() {
    let mut ctrl = controller();
    ctrl.handle(InputEvent::Wheel(50.0)); // zoom 0.5
    ctrl.handle(InputEvent::PointerDown(Point::new(100.0, 100.0)));
    let before = ctrl.surface().clear_count();
    let stats = ctrl
        .handle(InputEvent::PointerMove(Point::new(140.0, 80.0)))
        .unwrap();
    assert_eq!(ctrl.surface().clear_count(), before + 1);
    assert_eq!(stats.position, Point::new(12000.0 - 80.0, 10000.0 + 40.0));
}

#[test]
fn wheel_clamps_and_renders() {
    let mut ctrl = controller();
    let stats = ctrl.handle(InputEvent::Wheel(1000.0)).unwrap();
    assert_eq!(stats.zoom, 0.05);
    let stats = ctrl.handle(InputEvent::Wheel(-1000.0)).unwrap();
    assert_eq!(stats.zoom, 1.0);
    assert!(ctrl.handle(InputEvent::Wheel(f64::NAN)).is_none());
    let stats = ctrl.handle(InputEvent::Wheel(f64::INFINITY)).unwrap();
    assert_eq!(stats.zoom, 0.05);
    let stats = ctrl.handle(InputEvent::Wheel(f64::NEG_INFINITY)).unwrap();
    assert_eq!(stats.zoom, 1.0);
}

#[test]
fn repeated_passes_register_one_draw_per_tile() {
    let mut ctrl = controller();
    ctrl.render_pass();
    ctrl.render_pass();
    ctrl.render_pass();
    let pending = ctrl
        .grid()
        .tiles()
        .iter()
        .filter(|t| t.draw_pending)
        .count();
    assert_eq!(pending, 4);

    let pos = GridPos::new(5, 4);
    let clears = ctrl.surface().clear_count();
    assert!(ctrl.tile_loaded(pos));
    assert!(!ctrl.tile_loaded(pos));
    assert_eq!(ctrl.surface().drawn_images(), vec![tile(5, 4)]);
    // draw-on-load paints the one tile without clearing
    assert_eq!(ctrl.surface().clear_count(), clears);
}

#[test]
fn load_without_pending_draw_waits_for_next_pass() {
    let mut ctrl = controller();
    let pos = GridPos::new(6, 5);
    assert!(!ctrl.tile_loaded(pos));
    assert!(ctrl.grid().get(6, 5).unwrap().loaded);
    assert!(ctrl.surface().drawn_images().is_empty());
    let stats = ctrl.render_pass();
    assert_eq!(stats.drawn, 1);
    assert_eq!(ctrl.surface().drawn_images(), vec![tile(6, 5)]);
}

#[test]
fn late_load_draws_with_current_camera() {
    let mut ctrl = controller();
    ctrl.render_pass();
    ctrl.handle(InputEvent::PointerDown(Point::new(0.0, 0.0)));
    ctrl.handle(InputEvent::PointerMove(Point::new(-100.0, 0.0)));
    ctrl.handle(InputEvent::PointerUp);
    assert!(ctrl.tile_loaded(GridPos::new(6, 4)));
    let last = ctrl.surface().ops.last().cloned().unwrap();
    // camera x moved to 12100, so tile origin 12000 lands at 400 - 100
    assert_eq!(
        last,
        Op::Draw {
            image: tile(6, 4),
            x: 300.0,
            y: 300.0 - 2000.0,
            width: 2000.0,
            height: 2000.0,
        }
    );
}

#[test]
fn offscreen_load_is_harmless() {
    let mut ctrl = controller();
    ctrl.render_pass();
    assert!(!ctrl.tile_loaded(GridPos::new(0, 0)));
    assert!(!ctrl.tile_loaded(GridPos::new(99, 99)));
    assert!(ctrl.surface().drawn_images().is_empty());
}

#[test]
fn recenter_restores_midpoint() {
    let mut ctrl = controller();
    ctrl.handle(InputEvent::PointerDown(Point::new(0.0, 0.0)));
    ctrl.handle(InputEvent::PointerMove(Point::new(500.0, 500.0)));
    assert_ne!(ctrl.camera().position, Point::new(12000.0, 10000.0));
    let stats = ctrl.recenter();
    assert_eq!(stats.position, Point::new(12000.0, 10000.0));
}

// --- load forwarding ---

fn shared() -> std::rc::Rc<RefCell<Option<MapController<FakeSurface>>>> {
    std::rc::Rc::new(RefCell::new(Some(controller())))
}

#[test]
fn forwarded_loads_reach_the_controller() {
    let slot = shared();
    slot.borrow_mut().as_mut().unwrap().render_pass();
    let (tx, rx) = futures::channel::mpsc::unbounded();
    tx.unbounded_send(GridPos::new(5, 5)).unwrap();
    tx.unbounded_send(GridPos::new(0, 0)).unwrap();
    drop(tx);
    futures::executor::block_on(forward_loads(rx, std::rc::Rc::downgrade(&slot)));
    let guard = slot.borrow();
    let ctrl = guard.as_ref().unwrap();
    assert!(ctrl.grid().get(5, 5).unwrap().loaded);
    assert!(ctrl.grid().get(0, 0).unwrap().loaded);
    assert_eq!(ctrl.surface().drawn_images(), vec![tile(5, 5)]);
}

#[test]
fn aborted_forwarding_leaves_a_new_controller_untouched() {
    let slot = shared();
    let (tx, rx) = futures::channel::mpsc::unbounded();
    let (task, handle) =
        futures::future::abortable(forward_loads(rx, std::rc::Rc::downgrade(&slot)));
    // unmount: stop forwarding, then the slot is reused by a fresh mount
    handle.abort();
    *slot.borrow_mut() = Some(controller());
    tx.unbounded_send(GridPos::new(3, 3)).unwrap();
    assert!(futures::executor::block_on(task).is_err());
    let guard = slot.borrow();
    assert!(!guard.as_ref().unwrap().grid().get(3, 3).unwrap().loaded);
}

#[test]
fn forwarding_ends_when_the_slot_is_dropped() {
    let slot = shared();
    let weak = std::rc::Rc::downgrade(&slot);
    drop(slot);
    let (tx, rx) = futures::channel::mpsc::unbounded();
    tx.unbounded_send(GridPos::new(1, 1)).unwrap();
    // returns even though the sender is still open
    futures::executor::block_on(forward_loads::<FakeSurface>(rx, weak));
    drop(tx);
}
