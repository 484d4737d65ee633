use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::CanvasError;

/// Integer rectangle in pixel space, as taken by `getImageData` and the dirty
/// rectangle of `putImageData`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Region {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    /// Region anchored at the origin, e.g. the whole of a buffer.
    pub const fn sized(width: u32, height: u32) -> Region {
        Region::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        x >= i64::from(self.x)
            && y >= i64::from(self.y)
            && x < i64::from(self.x) + i64::from(self.width)
            && y < i64::from(self.y) + i64::from(self.height)
    }

    /// Overlap of two regions, `None` when they don't touch.
    pub fn intersect(&self, other: &Region) -> Option<Region> {
        let left = i64::from(self.x).max(i64::from(other.x));
        let top = i64::from(self.y).max(i64::from(other.y));
        let right = (i64::from(self.x) + i64::from(self.width))
            .min(i64::from(other.x) + i64::from(other.width));
        let bottom = (i64::from(self.y) + i64::from(self.height))
            .min(i64::from(other.y) + i64::from(other.height));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Region::new(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}

impl TryFrom<&str> for Region {
    type Error = CanvasError;

    fn try_from(json: &str) -> Result<Self, Self::Error> {
        serde_json::from_str(json).map_err(|e| CanvasError::InvalidRegion(e.to_string()))
    }
}

impl TryFrom<JsValue> for Region {
    type Error = CanvasError;

    fn try_from(value: JsValue) -> Result<Self, Self::Error> {
        let stringified = value
            .as_string()
            .ok_or_else(|| CanvasError::InvalidRegion("expected stringified Region".into()))?;
        Region::try_from(stringified.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Region::new(-2, 3, 4, 2);
        assert!(r.contains(-2, 3));
        assert!(r.contains(1, 4));
        assert!(!r.contains(2, 4));
        assert!(!r.contains(1, 5));
        assert!(!r.contains(-3, 3));
        assert!(!Region::sized(0, 5).contains(0, 0));
    }

    #[test]
    fn intersect_clips_to_overlap() {
        let a = Region::sized(10, 10);
        let b = Region::new(5, -5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Region::new(5, 0, 5, 5)));
        assert_eq!(a.intersect(&Region::new(10, 0, 3, 3)), None);
    }

    #[test]
    fn parses_from_json() {
        let r = Region::try_from(r#"{"x":1,"y":2,"width":3,"height":4}"#).unwrap();
        assert_eq!(r, Region::new(1, 2, 3, 4));
        assert!(matches!(
            Region::try_from(r#"{"x":1}"#),
            Err(CanvasError::InvalidRegion(_))
        ));
        assert!(Region::sized(3, 0).is_empty());
    }
}
