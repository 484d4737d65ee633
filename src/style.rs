use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasPattern};

use crate::error::CanvasError;
use crate::model::color::Rgba;

/// Value of `fillStyle` / `strokeStyle`.
#[derive(Debug, Clone)]
pub enum Style {
    /// Any CSS colour; parsing is left to the engine.
    Color(String),
    Gradient(Gradient),
    Pattern(Pattern),
}

impl Style {
    /// Classifies a value read back from the engine.
    pub fn from_js(value: JsValue) -> Result<Self, CanvasError> {
        if let Some(color) = value.as_string() {
            return Ok(Style::Color(color));
        }
        let value = match value.dyn_into::<CanvasGradient>() {
            Ok(gradient) => return Ok(Style::Gradient(Gradient::from(gradient))),
            Err(value) => value,
        };
        match value.dyn_into::<CanvasPattern>() {
            Ok(pattern) => Ok(Style::Pattern(Pattern::from(pattern))),
            Err(value) => Err(CanvasError::Engine(value)),
        }
    }

    pub fn to_js(&self) -> JsValue {
        match self {
            Style::Color(css) => JsValue::from_str(css),
            Style::Gradient(gradient) => gradient.inner.clone().into(),
            Style::Pattern(pattern) => pattern.inner.clone().into(),
        }
    }

    pub fn as_color(&self) -> Option<&str> {
        match self {
            Style::Color(css) => Some(css),
            _ => None,
        }
    }
}

impl From<&str> for Style {
    fn from(css: &str) -> Self {
        Style::Color(css.to_string())
    }
}

impl From<String> for Style {
    fn from(css: String) -> Self {
        Style::Color(css)
    }
}

impl From<Rgba> for Style {
    fn from(color: Rgba) -> Self {
        Style::Color(color.to_css())
    }
}

impl From<Gradient> for Style {
    fn from(gradient: Gradient) -> Self {
        Style::Gradient(gradient)
    }
}

impl From<Pattern> for Style {
    fn from(pattern: Pattern) -> Self {
        Style::Pattern(pattern)
    }
}

/// Linear or radial gradient created by a context.
#[derive(Debug, Clone)]
pub struct Gradient {
    inner: CanvasGradient,
}

impl Gradient {
    /// `offset` outside 0..=1 or an unparsable colour is rejected by the engine.
    pub fn add_color_stop(&self, offset: f32, color: &str) -> Result<(), CanvasError> {
        Ok(self.inner.add_color_stop(offset, color)?)
    }

    pub fn as_raw(&self) -> &CanvasGradient {
        &self.inner
    }
}

impl From<CanvasGradient> for Gradient {
    fn from(inner: CanvasGradient) -> Self {
        Gradient { inner }
    }
}

/// Image-backed pattern created by a context.
#[derive(Debug, Clone)]
pub struct Pattern {
    inner: CanvasPattern,
}

impl Pattern {
    pub fn as_raw(&self) -> &CanvasPattern {
        &self.inner
    }
}

impl From<CanvasPattern> for Pattern {
    fn from(inner: CanvasPattern) -> Self {
        Pattern { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_colors_convert_without_the_engine() {
        let style = Style::from(Rgba::new(0, 128, 255, 255));
        assert_eq!(style.as_color(), Some("rgba(0,128,255,1)"));
        assert_eq!(Style::from("#fff").as_color(), Some("#fff"));
    }
}
