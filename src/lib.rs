//! Canvas 2D bindings for Rust compiled to WebAssembly.
//!
//! Drawing calls are forwarded to the browser through [`Context2d`]. Pixel
//! data comes back as a caller-owned [`PixelBuffer`] that is read and
//! written one [`Rgba`] at a time, then pushed back with
//! [`PixelSurface::write_pixels`].

pub mod canvas;
pub mod context;
mod entrypoints;
pub mod error;
pub mod model;
pub mod style;
pub mod surface;
mod util;

pub use canvas::{Canvas, ContextOptions};
pub use context::{Context2d, ImageSource, TextMetrics};
pub use error::{BoundsError, CanvasError};
pub use model::color::Rgba;
pub use model::keywords::{
    CompositeOperation, LineCap, LineJoin, Repetition, TextAlign, TextBaseline,
};
pub use model::pixel_buffer::PixelBuffer;
pub use model::region::Region;
pub use style::{Gradient, Pattern, Style};
pub use surface::PixelSurface;
