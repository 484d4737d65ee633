use thiserror::Error;
use wasm_bindgen::JsValue;

/// A pixel coordinate fell outside `[0, width) x [0, height)`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("pixel ({x}, {y}) is outside a {width}x{height} buffer")]
pub struct BoundsError {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    /// Whatever the rendering engine threw, untouched.
    #[error("rendering engine error: {0:?}")]
    Engine(JsValue),

    #[error("pixel data has {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("a {width}x{height} RGBA buffer does not fit in memory")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unknown {kind} keyword: {value:?}")]
    UnknownKeyword { kind: &'static str, value: String },

    #[error("no element with id {0:?}")]
    ElementNotFound(String),

    #[error("element {0:?} is not a canvas")]
    NotACanvas(String),

    #[error("2d context is not available")]
    ContextUnavailable,

    #[error("invalid region: {0}")]
    InvalidRegion(String),
}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        CanvasError::Engine(value)
    }
}

impl From<CanvasError> for JsValue {
    fn from(err: CanvasError) -> Self {
        match err {
            // hand engine exceptions back to JS as they were thrown
            CanvasError::Engine(value) => value,
            other => js_sys::Error::new(&other.to_string()).into(),
        }
    }
}
