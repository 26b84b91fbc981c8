use yew::prelude::*;

use crate::render::FrameStats;

#[derive(Properties, PartialEq, Clone)]
pub struct DebugOverlayProps {
    pub frame: FrameStats,
}

/// Camera position and zoom after the latest render pass.
#[function_component(DebugOverlay)]
pub fn debug_overlay(props: &DebugOverlayProps) -> Html {
    let f = props.frame;
    let value_style = "font-variant-numeric:tabular-nums;";
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px 12px; display:flex; flex-direction:column; gap:4px; font-size:12px;">
            <span id="debug-map-position" style={value_style}>{ format!("x{} y{}", f.position.x, f.position.y) }</span>
            <span id="debug-zoom-level" style={value_style}>{ f.zoom }</span>
            <span style="color:#8b949e;">{ format!("{} visible, {} loading", f.visible, f.deferred) }</span>
        </div>
    }
}
