#[cfg(test)]
#[path = "camera_controls_test.rs"]
mod camera_controls_test;

use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub zoom: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_center: Callback<()>,
}

/// Whether zoom out / zoom in can still move, and the percentage label.
fn zoom_readout(zoom: f64, zoom_min: f64, zoom_max: f64) -> (bool, bool, String) {
    (
        zoom > zoom_min,
        zoom < zoom_max,
        format!("{:.0}%", zoom * 100.0),
    )
}

/// Zoom buttons grey out at the configured limits.
#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let (can_out, can_in, label) = zoom_readout(props.zoom, props.zoom_min, props.zoom_max);
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(0,0,0,0.75); border:1px solid #30363d; border-radius:6px; padding:6px 8px; display:flex; gap:6px; align-items:center; font-size:12px;">
        <button title={format!("Zoom out (min {})", props.zoom_min)} disabled={!can_out} onclick={emit(&props.on_zoom_out)}>{"−"}</button>
        <span style="min-width:44px; text-align:center; font-variant-numeric:tabular-nums;">{ label }</span>
        <button title={format!("Zoom in (max {})", props.zoom_max)} disabled={!can_in} onclick={emit(&props.on_zoom_in)}>{"+"}</button>
        <button title="Back to the middle of the map" onclick={emit(&props.on_center)}>{"Center"}</button>
    </div>}
}
