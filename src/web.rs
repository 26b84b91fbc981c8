// Browser adapters: canvas surface, tile image loading and page config.
use futures::channel::mpsc::UnboundedSender;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::model::{GridPos, SurfaceSize};
use crate::render::RenderSurface;

pub const CONFIG_ELEMENT_ID: &str = "viewer-config";

/// `RenderSurface` over a 2d canvas context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| ViewerError::Surface(format!("get_context failed: {e:?}")))?
            .ok_or_else(|| ViewerError::Surface("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ViewerError::Surface("context is not 2d".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl RenderSurface for CanvasSurface {
    /// `None` when the image element could not be created; such tiles never load.
    type Image = Option<HtmlImageElement>;

    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
    }

    fn clear(&mut self, color: &str) {
        let size = self.size();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, size.width, size.height);
    }

    fn draw_image(
        &mut self,
        image: &Self::Image,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        let image = image
            .as_ref()
            .ok_or_else(|| ViewerError::Surface("tile has no image element".into()))?;
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height)
            .map_err(|e| ViewerError::Surface(format!("{e:?}")))
    }
}

/// Creates the tile's image element and starts its load. Completion is sent
/// on `loaded`; failures are logged and the tile stays unloaded.
pub fn start_image_load(
    pos: GridPos,
    src: &str,
    loaded: &UnboundedSender<GridPos>,
) -> Option<HtmlImageElement> {
    let image = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(e) => {
            log::warn!("cannot create image for {src}: {e:?}");
            return None;
        }
    };
    let tx = loaded.clone();
    let on_load = Closure::once_into_js(move || {
        let _ = tx.unbounded_send(pos);
    });
    let name = src.to_string();
    let on_error = Closure::once_into_js(move || {
        log::warn!("tile image {name} failed to load");
    });
    image.set_onload(Some(on_load.unchecked_ref()));
    image.set_onerror(Some(on_error.unchecked_ref()));
    image.set_src(src);
    Some(image)
}

/// Reads `<script type="application/json" id="viewer-config">` if present.
pub fn load_page_config() -> ViewerConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(raw) = raw else {
        log::info!("no #{CONFIG_ELEMENT_ID}, using default map config");
        return ViewerConfig::default();
    };
    match ViewerConfig::from_json(&raw) {
        Ok(cfg) => {
            log::info!(
                "loaded map config: {}x{} tiles of {}",
                cfg.columns.len(),
                cfg.rows.len(),
                cfg.tile_size
            );
            cfg
        }
        Err(e) => {
            log::warn!("{e}; falling back to default map config");
            ViewerConfig::default()
        }
    }
}

/// Client size of the canvas's parent, or the window size without one.
pub fn parent_size(canvas: &HtmlCanvasElement) -> SurfaceSize {
    if let Some(parent) = canvas.parent_element() {
        return SurfaceSize::new(parent.client_width() as f64, parent.client_height() as f64);
    }
    let window = web_sys::window();
    let width = window
        .as_ref()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .as_ref()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    SurfaceSize::new(width, height)
}
