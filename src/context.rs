//! `CanvasRenderingContext2D` facade.
//!
//! Every method is a single call into the engine. Keyword properties go
//! through the enums in [`keywords`](crate::model::keywords), optional
//! trailing arguments are `Option`s, and engine exceptions come back as
//! [`CanvasError::Engine`].

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::canvas::Canvas;
use crate::error::CanvasError;
use crate::model::keywords::{
    CompositeOperation, LineCap, LineJoin, Repetition, TextAlign, TextBaseline,
};
use crate::model::pixel_buffer::PixelBuffer;
use crate::model::region::Region;
use crate::model::settings::DEBUG_TIMERS;
use crate::style::{Gradient, Pattern, Style};
use crate::surface::PixelSurface;
use crate::util::Timer;

/// Anything `drawImage` and `createPattern` accept that this crate exposes.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    Image(&'a HtmlImageElement),
    Canvas(&'a HtmlCanvasElement),
}

impl<'a> From<&'a HtmlImageElement> for ImageSource<'a> {
    fn from(img: &'a HtmlImageElement) -> Self {
        ImageSource::Image(img)
    }
}

impl<'a> From<&'a HtmlCanvasElement> for ImageSource<'a> {
    fn from(canvas: &'a HtmlCanvasElement) -> Self {
        ImageSource::Canvas(canvas)
    }
}

impl<'a> From<&'a Canvas> for ImageSource<'a> {
    fn from(canvas: &'a Canvas) -> Self {
        ImageSource::Canvas(canvas.element())
    }
}

/// Result of `measureText`, copied out of the engine object.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    pub width: f64,
    pub actual_bounding_box_left: f64,
    pub actual_bounding_box_right: f64,
    pub actual_bounding_box_ascent: f64,
    pub actual_bounding_box_descent: f64,
}

impl From<web_sys::TextMetrics> for TextMetrics {
    fn from(m: web_sys::TextMetrics) -> Self {
        TextMetrics {
            width: m.width(),
            actual_bounding_box_left: m.actual_bounding_box_left(),
            actual_bounding_box_right: m.actual_bounding_box_right(),
            actual_bounding_box_ascent: m.actual_bounding_box_ascent(),
            actual_bounding_box_descent: m.actual_bounding_box_descent(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Context2d {
    ctx: CanvasRenderingContext2d,
}

impl From<CanvasRenderingContext2d> for Context2d {
    fn from(ctx: CanvasRenderingContext2d) -> Self {
        Context2d { ctx }
    }
}

impl Context2d {
    pub fn as_raw(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// The canvas this context draws to; `None` for detached contexts.
    pub fn canvas(&self) -> Option<Canvas> {
        self.ctx.canvas().map(Canvas::from)
    }

    // Colors, styles and shadows

    pub fn stroke_style(&self) -> Result<Style, CanvasError> {
        Style::from_js(self.ctx.stroke_style())
    }

    /// Default `#000`.
    pub fn set_stroke_style(&self, style: impl Into<Style>) {
        self.ctx.set_stroke_style(&style.into().to_js());
    }

    pub fn fill_style(&self) -> Result<Style, CanvasError> {
        Style::from_js(self.ctx.fill_style())
    }

    /// Default `#000`.
    pub fn set_fill_style(&self, style: impl Into<Style>) {
        self.ctx.set_fill_style(&style.into().to_js());
    }

    pub fn shadow_color(&self) -> String {
        self.ctx.shadow_color()
    }

    /// Any CSS colour; default is fully transparent black.
    pub fn set_shadow_color(&self, color: &str) {
        self.ctx.set_shadow_color(color);
    }

    pub fn shadow_blur(&self) -> f64 {
        self.ctx.shadow_blur()
    }

    /// Blur level, not a pixel count and unaffected by the transform.
    pub fn set_shadow_blur(&self, blur: f64) {
        self.ctx.set_shadow_blur(blur);
    }

    pub fn shadow_offset_x(&self) -> f64 {
        self.ctx.shadow_offset_x()
    }

    pub fn set_shadow_offset_x(&self, offset: f64) {
        self.ctx.set_shadow_offset_x(offset);
    }

    pub fn shadow_offset_y(&self) -> f64 {
        self.ctx.shadow_offset_y()
    }

    pub fn set_shadow_offset_y(&self, offset: f64) {
        self.ctx.set_shadow_offset_y(offset);
    }

    pub fn create_linear_gradient(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Gradient {
        Gradient::from(self.ctx.create_linear_gradient(x0, y0, x1, y1))
    }

    /// Gradient between the circle `(x0, y0, r0)` and the circle `(x1, y1, r1)`.
    pub fn create_radial_gradient(
        &self,
        x0: f64,
        y0: f64,
        r0: f64,
        x1: f64,
        y1: f64,
        r1: f64,
    ) -> Result<Gradient, CanvasError> {
        Ok(Gradient::from(
            self.ctx.create_radial_gradient(x0, y0, r0, x1, y1, r1)?,
        ))
    }

    /// `Ok(None)` when the source has no pixels yet (e.g. an image still loading).
    pub fn create_pattern<'a>(
        &self,
        image: impl Into<ImageSource<'a>>,
        repetition: Repetition,
    ) -> Result<Option<Pattern>, CanvasError> {
        let pattern = match image.into() {
            ImageSource::Image(img) => self
                .ctx
                .create_pattern_with_html_image_element(img, repetition.as_str())?,
            ImageSource::Canvas(canvas) => self
                .ctx
                .create_pattern_with_html_canvas_element(canvas, repetition.as_str())?,
        };
        Ok(pattern.map(Pattern::from))
    }

    // Line styles

    pub fn line_width(&self) -> f64 {
        self.ctx.line_width()
    }

    pub fn set_line_width(&self, width: f64) {
        self.ctx.set_line_width(width);
    }

    pub fn line_cap(&self) -> Result<LineCap, CanvasError> {
        self.ctx.line_cap().parse()
    }

    pub fn set_line_cap(&self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    pub fn line_join(&self) -> Result<LineJoin, CanvasError> {
        self.ctx.line_join().parse()
    }

    pub fn set_line_join(&self, join: LineJoin) {
        self.ctx.set_line_join(join.as_str());
    }

    pub fn miter_limit(&self) -> f64 {
        self.ctx.miter_limit()
    }

    pub fn set_miter_limit(&self, limit: f64) {
        self.ctx.set_miter_limit(limit);
    }

    /// Alternating dash and gap lengths; an odd-length list is repeated by
    /// the engine to make it even.
    pub fn set_line_dash(&self, segments: &[f64]) -> Result<(), CanvasError> {
        let segments: js_sys::Array = segments.iter().map(|&d| JsValue::from_f64(d)).collect();
        Ok(self.ctx.set_line_dash(&segments)?)
    }

    pub fn line_dash(&self) -> Vec<f64> {
        self.ctx
            .get_line_dash()
            .iter()
            .filter_map(|v| v.as_f64())
            .collect()
    }

    pub fn line_dash_offset(&self) -> f64 {
        self.ctx.line_dash_offset()
    }

    pub fn set_line_dash_offset(&self, offset: f64) {
        self.ctx.set_line_dash_offset(offset);
    }

    // Text

    pub fn font(&self) -> String {
        self.ctx.font()
    }

    /// CSS font shorthand, default `10px sans-serif`.
    pub fn set_font(&self, font: &str) {
        self.ctx.set_font(font);
    }

    pub fn text_align(&self) -> Result<TextAlign, CanvasError> {
        self.ctx.text_align().parse()
    }

    pub fn set_text_align(&self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    pub fn text_baseline(&self) -> Result<TextBaseline, CanvasError> {
        self.ctx.text_baseline().parse()
    }

    pub fn set_text_baseline(&self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    pub fn fill_text(
        &self,
        text: &str,
        x: f64,
        y: f64,
        max_width: Option<f64>,
    ) -> Result<(), CanvasError> {
        match max_width {
            Some(max_width) => self.ctx.fill_text_with_max_width(text, x, y, max_width)?,
            None => self.ctx.fill_text(text, x, y)?,
        }
        Ok(())
    }

    pub fn stroke_text(
        &self,
        text: &str,
        x: f64,
        y: f64,
        max_width: Option<f64>,
    ) -> Result<(), CanvasError> {
        match max_width {
            Some(max_width) => self.ctx.stroke_text_with_max_width(text, x, y, max_width)?,
            None => self.ctx.stroke_text(text, x, y)?,
        }
        Ok(())
    }

    pub fn measure_text(&self, text: &str) -> Result<TextMetrics, CanvasError> {
        Ok(TextMetrics::from(self.ctx.measure_text(text)?))
    }

    // Compositing

    pub fn global_alpha(&self) -> f64 {
        self.ctx.global_alpha()
    }

    /// 0.0 (transparent) to 1.0 (opaque); the engine ignores values outside that.
    pub fn set_global_alpha(&self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    pub fn global_composite_operation(&self) -> Result<CompositeOperation, CanvasError> {
        self.ctx.global_composite_operation()?.parse()
    }

    pub fn set_global_composite_operation(
        &self,
        op: CompositeOperation,
    ) -> Result<(), CanvasError> {
        Ok(self.ctx.set_global_composite_operation(op.as_str())?)
    }

    // Rectangles

    /// Adds a closed rectangular sub-path.
    pub fn rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    pub fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    pub fn stroke_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    /// Resets the rectangle to transparent black.
    pub fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    // Paths

    pub fn begin_path(&self) {
        self.ctx.begin_path();
    }

    pub fn close_path(&self) {
        self.ctx.close_path();
    }

    pub fn move_to(&self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    pub fn line_to(&self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    pub fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cpx, cpy, x, y);
    }

    pub fn bezier_curve_to(&self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.ctx.bezier_curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    /// Angles in radians, clockwise unless `anticlockwise`. A negative
    /// radius is an engine error.
    pub fn arc(
        &self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Result<(), CanvasError> {
        Ok(self
            .ctx
            .arc_with_anticlockwise(x, y, radius, start_angle, end_angle, anticlockwise)?)
    }

    pub fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), CanvasError> {
        Ok(self.ctx.arc_to(x1, y1, x2, y2, radius)?)
    }

    pub fn fill(&self) {
        self.ctx.fill();
    }

    pub fn stroke(&self) {
        self.ctx.stroke();
    }

    pub fn clip(&self) {
        self.ctx.clip();
    }

    pub fn is_point_in_path(&self, x: f64, y: f64) -> bool {
        self.ctx.is_point_in_path_with_f64(x, y)
    }

    pub fn is_point_in_stroke(&self, x: f64, y: f64) -> bool {
        self.ctx.is_point_in_stroke_with_x_and_y(x, y)
    }

    // Transformations

    pub fn scale(&self, x: f64, y: f64) -> Result<(), CanvasError> {
        Ok(self.ctx.scale(x, y)?)
    }

    /// Clockwise, in radians.
    pub fn rotate(&self, angle: f64) -> Result<(), CanvasError> {
        Ok(self.ctx.rotate(angle)?)
    }

    pub fn translate(&self, x: f64, y: f64) -> Result<(), CanvasError> {
        Ok(self.ctx.translate(x, y)?)
    }

    /// Multiplies the current matrix by
    /// `[a c e]`
    /// `[b d f]`
    /// `[0 0 1]`.
    pub fn transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), CanvasError> {
        Ok(self.ctx.transform(a, b, c, d, e, f)?)
    }

    /// Replaces the current matrix instead of multiplying it.
    pub fn set_transform(
        &self,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    ) -> Result<(), CanvasError> {
        Ok(self.ctx.set_transform(a, b, c, d, e, f)?)
    }

    pub fn reset_transform(&self) -> Result<(), CanvasError> {
        Ok(self.ctx.reset_transform()?)
    }

    // State

    pub fn save(&self) {
        self.ctx.save();
    }

    pub fn restore(&self) {
        self.ctx.restore();
    }

    // Images and pixel data

    pub fn draw_image<'a>(
        &self,
        image: impl Into<ImageSource<'a>>,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) -> Result<(), CanvasError> {
        match image.into() {
            ImageSource::Image(img) => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, dx, dy, dw, dh)?,
            ImageSource::Canvas(canvas) => self
                .ctx
                .draw_image_with_html_canvas_element_and_dw_and_dh(canvas, dx, dy, dw, dh)?,
        }
        Ok(())
    }

    /// Blank buffer allocated by the engine, all transparent black.
    pub fn create_image_data(&self, width: u32, height: u32) -> Result<PixelBuffer, CanvasError> {
        let image_data = self
            .ctx
            .create_image_data_with_sw_and_sh(f64::from(width), f64::from(height))?;
        PixelBuffer::from_image_data(&image_data)
    }

    // getImageData is slow (forces a GPU readback on accelerated canvases)
    pub fn get_image_data(&self, region: Region) -> Result<PixelBuffer, CanvasError> {
        let _timer: Timer; // time_end runs on drop, so it must outlive the if
        if DEBUG_TIMERS {
            _timer = Timer::new("Context2d::get_image_data");
        }
        log::trace!("getImageData {:?}", region);
        let image_data = self.ctx.get_image_data(
            f64::from(region.x),
            f64::from(region.y),
            f64::from(region.width),
            f64::from(region.height),
        )?;
        PixelBuffer::from_image_data(&image_data)
    }

    pub fn put_image_data(
        &self,
        buffer: &PixelBuffer,
        dx: i32,
        dy: i32,
        dirty: Option<Region>,
    ) -> Result<(), CanvasError> {
        log::trace!(
            "putImageData {}x{} at ({}, {}) dirty {:?}",
            buffer.width(),
            buffer.height(),
            dx,
            dy,
            dirty
        );
        let image_data = buffer.to_image_data()?;
        match dirty {
            Some(d) => self
                .ctx
                .put_image_data_with_dirty_x_and_dirty_y_and_dirty_width_and_dirty_height(
                    &image_data,
                    f64::from(dx),
                    f64::from(dy),
                    f64::from(d.x),
                    f64::from(d.y),
                    f64::from(d.width),
                    f64::from(d.height),
                )?,
            None => self
                .ctx
                .put_image_data(&image_data, f64::from(dx), f64::from(dy))?,
        }
        Ok(())
    }
}

impl PixelSurface for Context2d {
    fn read_pixels(&self, region: Region) -> Result<PixelBuffer, CanvasError> {
        self.get_image_data(region)
    }

    fn write_pixels(
        &self,
        buffer: &PixelBuffer,
        dest_x: i32,
        dest_y: i32,
        dirty: Option<Region>,
    ) -> Result<(), CanvasError> {
        self.put_image_data(buffer, dest_x, dest_y, dirty)
    }
}
