//! WS2812 blade output over PIO0

use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use kyber_core::config::MAX_PIXELS;
use kyber_core::traits::StripError;
use kyber_drivers::blade::FrameWriter;
use smart_leds::RGB8;

/// PIO WS2812 driver as a frame writer
pub struct Ws2812Blade(pub PioWs2812<'static, PIO0, 0, MAX_PIXELS>);

impl FrameWriter<MAX_PIXELS> for Ws2812Blade {
    async fn write(&mut self, frame: &[RGB8; MAX_PIXELS]) -> Result<(), StripError> {
        self.0.write(frame).await;
        Ok(())
    }
}
