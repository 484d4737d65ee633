use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::context::Context2d;
use crate::error::CanvasError;
use crate::model::settings::WILL_READ_FREQUENTLY;
use crate::util::get_canvas_by_id;

/// Attributes passed to `getContext("2d", ...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    pub will_read_frequently: bool,
    pub alpha: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        ContextOptions {
            will_read_frequently: WILL_READ_FREQUENTLY,
            alpha: true,
        }
    }
}

impl ContextOptions {
    fn to_js(self) -> Result<JsValue, CanvasError> {
        let opts = js_sys::Object::new();
        js_sys::Reflect::set(
            &opts,
            &"willReadFrequently".into(),
            &self.will_read_frequently.into(),
        )?;
        js_sys::Reflect::set(&opts, &"alpha".into(), &self.alpha.into())?;
        Ok(opts.into())
    }
}

/// A `<canvas>` element.
#[derive(Debug, Clone)]
pub struct Canvas {
    element: HtmlCanvasElement,
}

impl Canvas {
    pub fn by_id(id: &str) -> Result<Canvas, CanvasError> {
        let element = get_canvas_by_id(id)?;
        log::debug!("found canvas #{} ({}x{})", id, element.width(), element.height());
        Ok(Canvas { element })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }

    pub fn width(&self) -> u32 {
        self.element.width()
    }

    pub fn height(&self) -> u32 {
        self.element.height()
    }

    /// Resizing clears the canvas and resets its context state.
    pub fn set_width(&self, width: u32) {
        self.element.set_width(width);
    }

    pub fn set_height(&self, height: u32) {
        self.element.set_height(height);
    }

    pub fn context_2d(&self) -> Result<Context2d, CanvasError> {
        self.context_2d_with_options(ContextOptions::default())
    }

    pub fn context_2d_with_options(&self, options: ContextOptions) -> Result<Context2d, CanvasError> {
        let ctx = self
            .element
            .get_context_with_context_options("2d", &options.to_js()?)?
            .ok_or(CanvasError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| CanvasError::ContextUnavailable)?;
        log::debug!("acquired 2d context {:?}", options);
        Ok(Context2d::from(ctx))
    }

    /// `canvas.toDataURL()` or `canvas.toDataURL(mime)`; the engine falls back
    /// to `image/png` for types it can't encode.
    pub fn to_data_url(&self, mime_type: Option<&str>) -> Result<String, CanvasError> {
        let url = match mime_type {
            Some(mime) => self.element.to_data_url_with_type(mime)?,
            None => self.element.to_data_url()?,
        };
        Ok(url)
    }
}

impl From<HtmlCanvasElement> for Canvas {
    fn from(element: HtmlCanvasElement) -> Self {
        Canvas { element }
    }
}
