//! Audio output task
//!
//! Pulls mono blocks from the shared mixer and writes them to the I2S
//! amplifier as 16-bit stereo frames (same sample on both channels).

use defmt::*;
use embassy_rp::peripherals::PIO1;
use embassy_rp::pio_programs::i2s::PioI2sOut;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use kyber_drivers::audio::SharedMixer;

/// Samples per DMA block (about 11.6 ms at 22.05 kHz)
const BLOCK: usize = 256;

pub type SaberMixer = SharedMixer<'static, CriticalSectionRawMutex>;

/// Pack one mono sample into a left/right I2S word
fn stereo_frame(sample: i16) -> u32 {
    let s = sample as u16 as u32;
    (s << 16) | s
}

#[embassy_executor::task]
pub async fn audio_task(mut i2s: PioI2sOut<'static, PIO1, 0>, mixer: &'static SaberMixer) {
    info!("Audio task started");

    let mut samples = [0i16; BLOCK];
    let mut frames = [0u32; BLOCK];

    loop {
        mixer.lock(|m| m.borrow_mut().fill(&mut samples));
        for (frame, &sample) in frames.iter_mut().zip(samples.iter()) {
            *frame = stereo_frame(sample);
        }
        i2s.write(&frames).await;
    }
}
