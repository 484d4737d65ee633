use wasm_bindgen::{prelude::wasm_bindgen, JsValue};

use crate::{
    canvas::Canvas,
    model::{pixel_buffer::PixelBuffer, region::Region, settings::LOG_LEVEL},
    surface::PixelSurface,
};

#[wasm_bindgen(start)]
pub fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    // a second init (module instantiated twice) only means the logger is already there
    if console_log::init_with_level(LOG_LEVEL).is_err() {
        log::warn!("logger already initialized");
    }
}

/// Raw RGBA bytes of `region` (a stringified `{x, y, width, height}`) on the canvas with id `canvas_id`.
#[wasm_bindgen()]
pub fn read_pixels(canvas_id: &str, region_json: JsValue) -> Result<Vec<u8>, JsValue> {
    let region = Region::try_from(region_json)?;
    let ctx = Canvas::by_id(canvas_id)?.context_2d()?;
    Ok(ctx.read_pixels(region)?.into_bytes())
}

#[wasm_bindgen()]
pub fn write_pixels(
    canvas_id: &str,
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    dest_x: i32,
    dest_y: i32,
) -> Result<(), JsValue> {
    let buffer = PixelBuffer::from_bytes(bytes, width, height)?;
    let ctx = Canvas::by_id(canvas_id)?.context_2d()?;
    ctx.write_pixels(&buffer, dest_x, dest_y, None)?;
    Ok(())
}
