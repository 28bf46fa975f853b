//! Frame-buffered pixel strip
//!
//! Holds one frame of `N` pixels, of which the first `len` belong to the
//! blade. Pixels past the blade are always sent black. Global brightness is
//! applied on flush so the buffer keeps full-scale colors.

use kyber_core::traits::{BladeStrip, StripError};
use smart_leds::{brightness, RGB8};

/// Transmits a complete frame to the LEDs
#[allow(async_fn_in_trait)]
pub trait FrameWriter<const N: usize> {
    async fn write(&mut self, frame: &[RGB8; N]) -> Result<(), StripError>;
}

/// Convert a 0.0..=1.0 brightness to the 8-bit scale used on flush
pub fn brightness_level(level: f32) -> u8 {
    (level.clamp(0.0, 1.0) * 255.0) as u8
}

pub struct PixelStrip<W, const N: usize> {
    writer: W,
    buffer: [RGB8; N],
    len: usize,
    brightness: u8,
}

impl<W: FrameWriter<N>, const N: usize> PixelStrip<W, N> {
    /// Create a strip driving the first `len` pixels (clamped to `N`)
    pub fn new(writer: W, len: usize, level: f32) -> Self {
        Self {
            writer,
            buffer: [RGB8::default(); N],
            len: len.min(N),
            brightness: brightness_level(level),
        }
    }

    /// Unscaled frame buffer of the blade pixels
    pub fn pixels(&self) -> &[RGB8] {
        &self.buffer[..self.len]
    }
}

impl<W: FrameWriter<N>, const N: usize> BladeStrip for PixelStrip<W, N> {
    fn len(&self) -> usize {
        self.len
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) {
        if index < self.len {
            self.buffer[index] = color;
        }
    }

    fn fill(&mut self, color: RGB8) {
        self.buffer[..self.len].fill(color);
    }

    async fn flush(&mut self) -> Result<(), StripError> {
        let mut frame = [RGB8::default(); N];
        let scaled = brightness(self.pixels().iter().copied(), self.brightness);
        for (dst, src) in frame.iter_mut().zip(scaled) {
            *dst = src;
        }
        self.writer.write(&frame).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockWriter;
    use embassy_futures::block_on;

    const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };

    fn strip(len: usize, level: f32) -> PixelStrip<MockWriter<6>, 6> {
        PixelStrip::new(MockWriter::default(), len, level)
    }

    #[test]
    fn test_nothing_sent_until_flush() {
        let mut s = strip(4, 1.0);
        s.fill(RED);
        assert!(s.writer.frames.is_empty());

        block_on(s.flush()).unwrap();
        assert_eq!(s.writer.frames.len(), 1);
    }

    #[test]
    fn test_full_brightness_is_unscaled() {
        let mut s = strip(6, 1.0);
        s.set_pixel(2, RED);
        block_on(s.flush()).unwrap();
        assert_eq!(s.writer.frames[0][2], RED);
        assert_eq!(s.writer.frames[0][1], RGB8::default());
    }

    #[test]
    fn test_brightness_scales_output_only() {
        let mut s = strip(6, 0.8);
        assert_eq!(s.brightness, 204);
        s.fill(RED);
        block_on(s.flush()).unwrap();

        assert_eq!(s.writer.frames[0][0], RGB8 { r: 204, g: 0, b: 0 });
        assert_eq!(s.pixels()[0], RED);
    }

    #[test]
    fn test_pixels_past_blade_stay_dark() {
        let mut s = strip(4, 1.0);
        assert_eq!(s.len(), 4);
        s.fill(RED);
        s.set_pixel(5, RED);
        block_on(s.flush()).unwrap();

        let frame = &s.writer.frames[0];
        assert!(frame[..4].iter().all(|&p| p == RED));
        assert!(frame[4..].iter().all(|&p| p == RGB8::default()));
    }

    #[test]
    fn test_len_clamped_to_capacity() {
        assert_eq!(strip(100, 1.0).len(), 6);
    }

    #[test]
    fn test_write_failure() {
        let mut s = strip(4, 1.0);
        s.writer.fail = true;
        assert_eq!(block_on(s.flush()), Err(StripError::WriteFailed));
    }
}
