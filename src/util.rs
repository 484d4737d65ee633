use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement};

use crate::error::CanvasError;

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        web_sys::console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        web_sys::console::time_end_with_label(self.name);
    }
}

pub fn get_element(id: &str) -> Result<Element, CanvasError> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))
}

pub fn get_canvas_by_id(id: &str) -> Result<HtmlCanvasElement, CanvasError> {
    get_element(id)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| CanvasError::NotACanvas(id.to_string()))
}
