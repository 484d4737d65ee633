pub const LOG_LEVEL: log::Level = log::Level::Debug;

// console.time around every getImageData call
pub const DEBUG_TIMERS: bool = false;

/// Default for the `willReadFrequently` context attribute. Pixel reads are
/// the point of this crate, so ask for a CPU-backed canvas.
pub const WILL_READ_FREQUENTLY: bool = true;

pub const BYTES_PER_PIXEL: usize = 4;
