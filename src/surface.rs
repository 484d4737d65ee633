use crate::error::CanvasError;
use crate::model::{pixel_buffer::PixelBuffer, region::Region};

/// Something pixels can be copied out of and back into.
///
/// [`Context2d`](crate::context::Context2d) is the browser implementation.
pub trait PixelSurface {
    /// Fresh, detached snapshot of `region`.
    fn read_pixels(&self, region: Region) -> Result<PixelBuffer, CanvasError>;

    /// Copies `buffer` onto the surface with its origin at `(dest_x, dest_y)`.
    ///
    /// `dirty` limits the copy to a rectangle in the buffer's own coordinates,
    /// `None` copies the whole buffer.
    fn write_pixels(
        &self,
        buffer: &PixelBuffer,
        dest_x: i32,
        dest_y: i32,
        dirty: Option<Region>,
    ) -> Result<(), CanvasError>;
}
