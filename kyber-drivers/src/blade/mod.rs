//! Blade pixel strip

pub mod pixels;

pub use pixels::{brightness_level, FrameWriter, PixelStrip};
