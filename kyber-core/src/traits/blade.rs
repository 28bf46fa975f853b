//! Addressable LED strip trait

use smart_leds::RGB8;

/// Errors that can occur when pushing a frame to the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripError {
    /// The transmission to the strip failed
    WriteFailed,
}

/// Trait for the blade's pixel strip
///
/// Pixel writes only touch the frame buffer; nothing is visible until
/// [`BladeStrip::flush`] renders the buffer. Global brightness scaling is the
/// implementation's concern.
#[allow(async_fn_in_trait)]
pub trait BladeStrip {
    /// Number of pixels on the blade
    fn len(&self) -> usize;

    /// Check if the strip has no pixels
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set one pixel in the frame buffer
    ///
    /// Out-of-range indices are ignored.
    fn set_pixel(&mut self, index: usize, color: RGB8);

    /// Set every pixel in the frame buffer
    fn fill(&mut self, color: RGB8);

    /// Render the frame buffer to the strip
    async fn flush(&mut self) -> Result<(), StripError>;
}
