pub mod color;
pub mod keywords;
pub mod pixel_buffer;
pub mod region;
pub mod settings;
