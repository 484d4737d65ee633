use image::RgbaImage;
use wasm_bindgen::Clamped;
use web_sys::ImageData;

use crate::error::{BoundsError, CanvasError};

use super::{color::Rgba, settings::BYTES_PER_PIXEL};

/// Caller-owned copy of a rectangle of RGBA pixels.
///
/// Bytes are row-major, top to bottom, left to right, four bytes per pixel in
/// R, G, B, A order, so `bytes.len() == width * height * 4` always holds.
/// A buffer never aliases the surface it was read from: changes only reach
/// the surface through [`PixelSurface::write_pixels`](crate::surface::PixelSurface::write_pixels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Blank buffer, every pixel transparent black.
    ///
    /// Fails with `InvalidDimensions` when `width * height * 4` doesn't fit in `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        Ok(Self {
            width,
            height,
            bytes: vec![0u8; PixelBuffer::byte_len(width, height)?],
        })
    }

    pub fn from_bytes(bytes: Vec<u8>, width: u32, height: u32) -> Result<Self, CanvasError> {
        let expected = PixelBuffer::byte_len(width, height)?;
        if bytes.len() != expected {
            return Err(CanvasError::InvalidLength {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    /// Builds a buffer from rows that carry trailing padding, e.g. a GPU
    /// readback where every row is aligned to `bytes_per_row`.
    pub fn from_padded_rows(
        padded: &[u8],
        width: u32,
        height: u32,
        bytes_per_row: usize,
    ) -> Result<Self, CanvasError> {
        let too_large = || CanvasError::InvalidDimensions { width, height };
        let unpadded_bytes_per_row = (width as usize)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(too_large)?;
        if bytes_per_row == unpadded_bytes_per_row {
            // no padding has been added, can use directly
            return PixelBuffer::from_bytes(padded.to_vec(), width, height);
        }

        let expected = PixelBuffer::byte_len(width, height)?;
        let needed = match height as usize {
            0 => 0,
            h => bytes_per_row
                .checked_mul(h - 1)
                .and_then(|n| n.checked_add(unpadded_bytes_per_row))
                .ok_or_else(too_large)?,
        };
        if bytes_per_row < unpadded_bytes_per_row || padded.len() < needed {
            return Err(CanvasError::InvalidLength {
                expected: needed.max(expected),
                actual: padded.len(),
            });
        }

        // every slice below ends at or before `needed`, which fits in `padded`
        let mut bytes = Vec::with_capacity(expected);
        for i in 0..height as usize {
            let start_index = i * bytes_per_row;
            let end_index = start_index + unpadded_bytes_per_row;
            bytes.extend_from_slice(&padded[start_index..end_index]);
        }
        PixelBuffer::from_bytes(bytes, width, height)
    }

    fn byte_len(width: u32, height: u32) -> Result<usize, CanvasError> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(CanvasError::InvalidDimensions { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Offset of the red byte of pixel `(x, y)`: `4 * (y * width + x)`.
    ///
    /// This is the only place that turns coordinates into buffer indices.
    pub fn offset_of(&self, x: i32, y: i32) -> Result<usize, BoundsError> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Err(BoundsError {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Result<Rgba, BoundsError> {
        let idx = self.offset_of(x, y)?;
        Ok(Rgba::new(
            self.bytes[idx],
            self.bytes[idx + 1],
            self.bytes[idx + 2],
            self.bytes[idx + 3],
        ))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) -> Result<(), BoundsError> {
        let idx = self.offset_of(x, y)?;
        self.bytes[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&<[u8; 4]>::from(color));
        Ok(())
    }

    /// One scanline, `width * 4` bytes.
    pub fn row(&self, y: i32) -> Result<&[u8], BoundsError> {
        let start = match self.width {
            // zero-width rows have no pixel to anchor an offset on
            0 => {
                return Err(BoundsError {
                    x: 0,
                    y,
                    width: self.width,
                    height: self.height,
                })
            }
            _ => self.offset_of(0, y)?,
        };
        Ok(&self.bytes[start..start + self.width as usize * BYTES_PER_PIXEL])
    }

    pub fn fill(&mut self, color: Rgba) {
        let px: [u8; 4] = color.into();
        self.bytes
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .for_each(|c| c.copy_from_slice(&px));
    }

    /// Every pixel with its coordinate, in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgba)> + '_ {
        let width = (self.width as usize).max(1);
        self.bytes
            .chunks_exact(BYTES_PER_PIXEL)
            .enumerate()
            .map(move |(i, c)| {
                // both fit: x < width and y < height, which are u32
                let (x, y) = ((i % width) as u32, (i / width) as u32);
                (x, y, Rgba::new(c[0], c[1], c[2], c[3]))
            })
    }

    /// Copy of the whole byte sequence. Later writes to the buffer do not
    /// show up in the returned vector.
    pub fn raw_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Borrowed view of the bytes, valid while the buffer is not mutated.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        // same layout and length, so this cannot fail
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
            image::Rgba([
                self.bytes[idx],
                self.bytes[idx + 1],
                self.bytes[idx + 2],
                self.bytes[idx + 3],
            ])
        })
    }

    pub fn from_image_data(image_data: &ImageData) -> Result<Self, CanvasError> {
        PixelBuffer::from_bytes(
            image_data.data().0,
            image_data.width(),
            image_data.height(),
        )
    }

    pub fn to_image_data(&self) -> Result<ImageData, CanvasError> {
        let clamped = Clamped(self.bytes.as_slice());
        Ok(ImageData::new_with_u8_clamped_array_and_sh(
            clamped,
            self.width,
            self.height,
        )?)
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = CanvasError;

    fn try_from(img: RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        // the raw container may be longer than the image it describes
        let mut bytes = img.into_raw();
        bytes.truncate(PixelBuffer::byte_len(width, height)?);
        PixelBuffer::from_bytes(bytes, width, height)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn offset_matches_row_major_formula() {
        for (w, h) in [(1u32, 1u32), (3, 2), (7, 5), (16, 1), (1, 9)] {
            let buf = PixelBuffer::new(w, h).unwrap();
            for y in 0..h as i32 {
                for x in 0..w as i32 {
                    let expected = 4 * (y as usize * w as usize + x as usize);
                    assert_eq!(buf.offset_of(x, y), Ok(expected), "{}x{} at ({}, {})", w, h, x, y);
                }
            }
        }
    }

    #[test]
    fn set_then_get_returns_the_same_color() {
        let mut rng = rand::thread_rng();
        let mut buf = PixelBuffer::new(13, 7).unwrap();
        for _ in 0..500 {
            let x = rng.gen_range(0..13);
            let y = rng.gen_range(0..7);
            let c = Rgba::new(rng.gen(), rng.gen(), rng.gen(), rng.gen());
            buf.set_pixel(x, y, c).unwrap();
            assert_eq!(buf.get_pixel(x, y), Ok(c));
        }
    }

    #[test]
    fn set_pixel_leaves_neighbours_alone() {
        let mut buf = PixelBuffer::new(3, 3).unwrap();
        buf.set_pixel(1, 1, Rgba::WHITE).unwrap();
        for (x, y, c) in buf.pixels() {
            if (x, y) == (1, 1) {
                assert_eq!(c, Rgba::WHITE);
            } else {
                assert_eq!(c, Rgba::TRANSPARENT);
            }
        }
    }

    #[test]
    fn out_of_bounds_coordinates_fail() {
        let (w, h) = (4, 3);
        let mut buf = PixelBuffer::new(w, h).unwrap();
        for (x, y) in [(-1, 0), (w as i32, 0), (0, h as i32), (0, -1), (i32::MIN, i32::MAX)] {
            let err = BoundsError {
                x,
                y,
                width: w,
                height: h,
            };
            assert_eq!(buf.get_pixel(x, y), Err(err));
            assert_eq!(buf.set_pixel(x, y, Rgba::BLACK), Err(err));
            assert_eq!(buf.offset_of(x, y), Err(err));
        }
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_dimension_buffers_reject_everything() {
        for (w, h) in [(0u32, 0u32), (0, 5), (5, 0)] {
            let mut buf = PixelBuffer::new(w, h).unwrap();
            assert!(buf.is_empty());
            assert_eq!(buf.raw_bytes().len(), 0);
            for (x, y) in [(0, 0), (1, 1), (4, 4), (-1, -1)] {
                assert!(buf.get_pixel(x, y).is_err());
                assert!(buf.set_pixel(x, y, Rgba::WHITE).is_err());
            }
            assert!(buf.row(0).is_err());
            assert_eq!(buf.pixels().count(), 0);
        }
    }

    #[test]
    fn blank_buffer_is_transparent_black() {
        let buf = PixelBuffer::new(6, 4).unwrap();
        assert_eq!(buf.raw_bytes().len(), 6 * 4 * 4);
        assert!(buf.raw_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn two_by_two_scenario_bytes() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.set_pixel(0, 0, Rgba::new(255, 0, 0, 255)).unwrap();
        buf.set_pixel(1, 1, Rgba::new(0, 255, 0, 128)).unwrap();
        assert_eq!(
            buf.raw_bytes(),
            vec![255, 0, 0, 255, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255, 0, 128]
        );
    }

    #[test]
    fn raw_bytes_is_a_detached_copy() {
        let mut buf = PixelBuffer::new(1, 1).unwrap();
        let before = buf.raw_bytes();
        buf.set_pixel(0, 0, Rgba::WHITE).unwrap();
        assert_eq!(before, vec![0, 0, 0, 0]);
        assert_eq!(buf.as_bytes(), &[255, 255, 255, 255]);
    }

    #[test]
    fn from_bytes_checks_length() {
        assert!(PixelBuffer::from_bytes(vec![0; 8], 2, 1).is_ok());
        match PixelBuffer::from_bytes(vec![0; 7], 2, 1) {
            Err(CanvasError::InvalidLength { expected, actual }) => {
                assert_eq!((expected, actual), (8, 7));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn padded_rows_are_stripped() {
        // 2x2 image, rows padded to 12 bytes
        let padded = [
            1, 1, 1, 1, 2, 2, 2, 2, 9, 9, 9, 9, //
            3, 3, 3, 3, 4, 4, 4, 4, 9, 9, 9, 9,
        ];
        let buf = PixelBuffer::from_padded_rows(&padded, 2, 2, 12).unwrap();
        assert_eq!(buf.get_pixel(1, 0), Ok(Rgba::new(2, 2, 2, 2)));
        assert_eq!(buf.get_pixel(0, 1), Ok(Rgba::new(3, 3, 3, 3)));
        assert_eq!(buf.as_bytes().len(), 16);

        // last row may omit its padding
        assert!(PixelBuffer::from_padded_rows(&padded[..20], 2, 2, 12).is_ok());
        assert!(PixelBuffer::from_padded_rows(&padded[..19], 2, 2, 12).is_err());
        assert!(PixelBuffer::from_padded_rows(&padded, 2, 2, 4).is_err());
    }

    #[test]
    fn rows_and_fill() {
        let mut buf = PixelBuffer::new(2, 3).unwrap();
        buf.fill(Rgba::new(5, 6, 7, 8));
        buf.set_pixel(1, 2, Rgba::BLACK).unwrap();
        assert_eq!(buf.row(0).unwrap(), &[5, 6, 7, 8, 5, 6, 7, 8]);
        assert_eq!(buf.row(2).unwrap(), &[5, 6, 7, 8, 0, 0, 0, 255]);
        assert!(buf.row(3).is_err());
        assert!(buf.row(-1).is_err());
    }

    #[test]
    fn pixels_walk_row_major() {
        let mut buf = PixelBuffer::new(3, 2).unwrap();
        buf.set_pixel(2, 0, Rgba::WHITE).unwrap();
        let coords: Vec<(u32, u32)> = buf.pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(buf.pixels().nth(2).map(|p| p.2), Some(Rgba::WHITE));
    }

    #[test]
    fn converts_through_rgba_image() {
        let mut buf = PixelBuffer::new(3, 2).unwrap();
        buf.set_pixel(2, 1, Rgba::new(10, 20, 30, 40)).unwrap();
        let img = buf.to_rgba_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1), &image::Rgba([10, 20, 30, 40]));
        assert_eq!(PixelBuffer::try_from(img).unwrap(), buf);
    }

    #[test]
    fn oversized_raw_image_is_trimmed_to_its_pixels() {
        let img = RgbaImage::from_raw(1, 1, vec![7; 8]).unwrap();
        let buf = PixelBuffer::try_from(img).unwrap();
        assert_eq!(buf.raw_bytes(), vec![7, 7, 7, 7]);
        assert_eq!(buf.get_pixel(0, 0), Ok(Rgba::new(7, 7, 7, 7)));
    }

    #[test]
    fn dimensions_too_large_for_memory_are_rejected() {
        let (w, h) = (u32::MAX, u32::MAX);
        assert!(matches!(
            PixelBuffer::from_bytes(vec![], w, h),
            Err(CanvasError::InvalidDimensions { width: u32::MAX, height: u32::MAX })
        ));
        // 2^31 x 2^31 wraps to a zero length without the check
        let wrapped = PixelBuffer::from_bytes(vec![], 1 << 31, 1 << 31);
        assert!(matches!(wrapped, Err(CanvasError::InvalidDimensions { .. })));
        assert!(matches!(
            PixelBuffer::new(w, h),
            Err(CanvasError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PixelBuffer::from_padded_rows(&[], w, h, usize::MAX),
            Err(CanvasError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PixelBuffer::from_padded_rows(&[0; 8], 1, 3, usize::MAX / 2),
            Err(CanvasError::InvalidDimensions { .. })
        ));
    }
}
