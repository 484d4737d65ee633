use serde::{Deserialize, Serialize};

/// One pixel as the engine stores it: straight (non-premultiplied) RGBA, 8 bits per channel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }

    /// Saturates each channel into 0..=255, the way a `Uint8ClampedArray` stores writes.
    pub fn clamped(r: i32, g: i32, b: i32, a: i32) -> Rgba {
        Rgba {
            r: Rgba::clamp_channel(r),
            g: Rgba::clamp_channel(g),
            b: Rgba::clamp_channel(b),
            a: Rgba::clamp_channel(a),
        }
    }

    fn clamp_channel(val: i32) -> u8 {
        val.clamp(u8::MIN as i32, u8::MAX as i32) as u8
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// CSS `rgba()` form, alpha scaled to 0..1.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({},{},{},{})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Rgba::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

impl From<image::Rgba<u8>> for Rgba {
    fn from(px: image::Rgba<u8>) -> Self {
        Rgba::from(px.0)
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(c: Rgba) -> Self {
        image::Rgba(c.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_saturates_out_of_range_channels() {
        assert_eq!(Rgba::clamped(-20, 300, 128, 255), Rgba::new(0, 255, 128, 255));
        assert_eq!(Rgba::clamped(i32::MIN, i32::MAX, 0, 0), Rgba::new(0, 255, 0, 0));
    }

    #[test]
    fn css_uses_unit_alpha() {
        assert_eq!(Rgba::new(255, 0, 0, 255).to_css(), "rgba(255,0,0,1)");
        assert_eq!(Rgba::TRANSPARENT.to_css(), "rgba(0,0,0,0)");
        assert_eq!(Rgba::new(10, 20, 30, 51).to_css(), "rgba(10,20,30,0.2)");
    }

    #[test]
    fn channel_order_is_rgba() {
        let bytes: [u8; 4] = Rgba::new(1, 2, 3, 4).into();
        assert_eq!(bytes, [1, 2, 3, 4]);
        assert_eq!(Rgba::from(image::Rgba([9, 8, 7, 6])), Rgba::new(9, 8, 7, 6));
    }

    #[test]
    fn deserializes_from_channel_map() {
        let c: Rgba = serde_json::from_str(r#"{"r":0,"g":255,"b":0,"a":128}"#).unwrap();
        assert_eq!(c, Rgba::new(0, 255, 0, 128));
        assert!(!c.is_opaque());
    }
}
