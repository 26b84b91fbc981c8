use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::mpsc;
use futures::future::{AbortHandle, abortable};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, WheelEvent};
use yew::prelude::*;

use super::{camera_controls::CameraControls, debug_overlay::DebugOverlay};
use crate::config::ViewerConfig;
use crate::controller::{InputEvent, MapController, forward_loads};
use crate::error::{Result, ViewerError};
use crate::model::Point;
use crate::render::FrameStats;
use crate::web::{self, CanvasSurface};

type Controller = MapController<CanvasSurface>;
type ControllerSlot = Rc<RefCell<Option<Controller>>>;

/// Wheel delta applied by the zoom buttons (0.1 zoom per click).
const ZOOM_STEP_DELTA: f64 = 10.0;

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub config: ViewerConfig,
}

/// Listeners, load task and controller installed on mount; dropping it
/// detaches all three.
struct MountedMap {
    slot: ControllerSlot,
    loads: AbortHandle,
    listeners: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
}

impl Drop for MountedMap {
    fn drop(&mut self) {
        // Completions from this grid must not reach a later mount's controller.
        self.loads.abort();
        for (target, name, cb) in &self.listeners {
            let _ = target.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        }
        *self.slot.borrow_mut() = None;
    }
}

fn set_dragging_attr(canvas: &HtmlCanvasElement, dragging: bool) {
    let _ = canvas.set_attribute("data-dragging", if dragging { "true" } else { "false" });
}

/// Runs one input through the controller and publishes the frame, if any.
fn dispatch(slot: &ControllerSlot, on_frame: &UseStateSetter<FrameStats>, input: InputEvent) {
    let mut guard = slot.borrow_mut();
    let Some(ctrl) = guard.as_mut() else {
        return;
    };
    let stats = ctrl.handle(input);
    set_dragging_attr(ctrl.surface().canvas(), ctrl.is_dragging());
    drop(guard);
    if let Some(stats) = stats {
        on_frame.set(stats);
    }
}

fn listener(
    slot: &ControllerSlot,
    on_frame: &UseStateSetter<FrameStats>,
    to_input: impl Fn(&Event) -> Option<InputEvent> + 'static,
) -> Closure<dyn FnMut(Event)> {
    let slot = slot.clone();
    let on_frame = on_frame.clone();
    Closure::wrap(Box::new(move |e: Event| {
        if let Some(input) = to_input(&e) {
            dispatch(&slot, &on_frame, input);
        }
    }) as Box<dyn FnMut(_)>)
}

fn pointer(e: &Event) -> Option<Point> {
    e.dyn_ref::<MouseEvent>()
        .map(|m| Point::new(m.client_x() as f64, m.client_y() as f64))
}

fn mount(
    canvas: HtmlCanvasElement,
    config: &ViewerConfig,
    slot: &ControllerSlot,
    on_frame: &UseStateSetter<FrameStats>,
) -> Result<MountedMap> {
    let window = web_sys::window().ok_or_else(|| ViewerError::Surface("no window".into()))?;
    let surface = CanvasSurface::new(canvas.clone())?;
    let (loaded_tx, loaded_rx) = mpsc::unbounded();
    let controller = MapController::new(config, surface, |pos, src| {
        web::start_image_load(pos, src, &loaded_tx)
    });
    drop(loaded_tx);
    *slot.borrow_mut() = Some(controller);

    // Draw-on-load: completions arrive here one at a time, between input events.
    let (loads_task, loads) = abortable(forward_loads(loaded_rx, Rc::downgrade(slot)));
    wasm_bindgen_futures::spawn_local(async move {
        let _ = loads_task.await;
    });

    let canvas_target: EventTarget = canvas.clone().into();
    let window_target: EventTarget = window.clone().into();
    let resize_canvas = canvas.clone();
    let listeners = vec![
        (
            canvas_target.clone(),
            "mousedown",
            listener(slot, on_frame, |e| pointer(e).map(InputEvent::PointerDown)),
        ),
        (
            canvas_target,
            "mousemove",
            listener(slot, on_frame, |e| pointer(e).map(InputEvent::PointerMove)),
        ),
        (
            window_target.clone(),
            "mouseup",
            listener(slot, on_frame, |_| Some(InputEvent::PointerUp)),
        ),
        (
            window_target.clone(),
            "wheel",
            listener(slot, on_frame, |e| {
                e.dyn_ref::<WheelEvent>()
                    .map(|w| InputEvent::Wheel(w.delta_y()))
            }),
        ),
        (
            window_target,
            "resize",
            listener(slot, on_frame, move |_| {
                Some(InputEvent::Resize(web::parent_size(&resize_canvas)))
            }),
        ),
    ];
    let mounted = MountedMap {
        slot: slot.clone(),
        loads,
        listeners,
    };
    for (target, name, cb) in &mounted.listeners {
        target
            .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
            .map_err(|e| ViewerError::Surface(format!("cannot listen for {name}: {e:?}")))?;
    }

    // Size to the parent and run the first pass.
    dispatch(slot, on_frame, InputEvent::Resize(web::parent_size(&canvas)));
    Ok(mounted)
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let controller = use_mut_ref(|| None::<Controller>);
    let frame = use_state(FrameStats::default);

    {
        let canvas_ref = canvas_ref.clone();
        let controller = controller.clone();
        let on_frame = frame.setter();
        let config = props.config.clone();
        use_effect_with(config, move |config| {
            let mounted = match canvas_ref.cast::<HtmlCanvasElement>() {
                Some(canvas) => mount(canvas, config, &controller, &on_frame),
                None => Err(ViewerError::Surface("map canvas not attached".into())),
            };
            let mounted = mounted
                .inspect_err(|e| log::error!("map view not mounted: {e}"))
                .ok();
            move || drop(mounted)
        });
    }

    let control = |input: Option<InputEvent>| {
        let controller = controller.clone();
        let on_frame = frame.setter();
        Callback::from(move |_: ()| match input {
            Some(input) => dispatch(&controller, &on_frame, input),
            None => {
                let stats = controller.borrow_mut().as_mut().map(|c| c.recenter());
                if let Some(stats) = stats {
                    on_frame.set(stats);
                }
            }
        })
    };
    let on_zoom_in = control(Some(InputEvent::Wheel(-ZOOM_STEP_DELTA)));
    let on_zoom_out = control(Some(InputEvent::Wheel(ZOOM_STEP_DELTA)));
    let on_center = control(None);

    html! {
        <div id="map-container">
            <canvas id="map" ref={canvas_ref}></canvas>
            <DebugOverlay frame={*frame} />
            <CameraControls
                zoom={frame.zoom}
                zoom_min={props.config.zoom_min}
                zoom_max={props.config.zoom_max}
                {on_zoom_in}
                {on_zoom_out}
                {on_center}
            />
        </div>
    }
}
