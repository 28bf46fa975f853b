//! Kyber - Prop Saber Firmware
//!
//! Main firmware binary for the Adafruit Feather RP2040 Prop-Maker.
//! One button, one LIS3DH accelerometer, an I2S amplifier and a WS2812
//! blade, driven by the board-agnostic control loop in kyber-core.
//!
//! # Pins
//!
//! - GPIO23: external power rail enable (blade, amplifier)
//! - GPIO2/GPIO3: I2C1 SDA/SCL (LIS3DH at 0x18)
//! - GPIO14: WS2812 data (PIO0)
//! - GPIO16/17/18: I2S data/bit clock/word clock (PIO1)
//! - GPIO15: button to ground

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0, PIO1};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::i2s::{PioI2sOut, PioI2sOutProgram};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Delay, Instant};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use {defmt_rtt as _, panic_probe as _};

use kyber_core::config::{parse_config, SaberConfig};
use kyber_core::control::ControlLoop;
use kyber_core::effects::{EffectCoordinator, RandomPicker};
use kyber_drivers::audio::{Mixer, MixerVoice, SAMPLE_RATE};
use kyber_drivers::blade::PixelStrip;
use kyber_drivers::input::DebouncedButton;
use kyber_drivers::sensor::{lis3dh, DataRate, Lis3dh, Range};

use crate::blade::Ws2812Blade;
use crate::sensor::MotionSensor;
use crate::tasks::SaberMixer;

mod assets;
mod blade;
mod sensor;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit saber.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../saber.toml");

/// I2S sample width
const BIT_DEPTH: u32 = 16;

/// Mixer voice carrying the looping hum
const AMBIENT_VOICE: usize = 0;

/// Mixer voice carrying one-shot effects
const EFFECT_VOICE: usize = 1;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
    PIO1_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO1>;
});

static MIXER: SaberMixer = Mutex::new(RefCell::new(Mixer::new()));

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kyber firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Blade and amplifier sit behind a switched rail; keep it on for the
    // life of the program
    let power_rail = Output::new(p.PIN_23, Level::High);
    core::mem::forget(power_rail);

    let config = load_config();
    let pixel_count = config.blade.pixel_count as usize;

    // Accelerometer
    let i2c = I2c::new_async(p.I2C1, p.PIN_3, p.PIN_2, Irqs, i2c::Config::default());
    let mut seed = Instant::now().as_ticks();
    let motion = match Lis3dh::new(i2c, lis3dh::DEFAULT_ADDRESS, Range::G2, DataRate::Hz400).await
    {
        Ok(mut lis) => {
            info!("LIS3DH ready");
            // Sensor noise makes a better seed than boot time alone
            if let Ok([x, y, z]) = lis.read_raw().await {
                seed ^= (x as u16 as u64) << 32 | (y as u16 as u64) << 16 | z as u16 as u64;
            }
            MotionSensor::Present(lis)
        }
        Err(e) => {
            error!("LIS3DH unavailable: {}", e);
            MotionSensor::Absent
        }
    };

    // Blade
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let ws_program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH1, p.PIN_14, &ws_program);
    let blade = PixelStrip::new(Ws2812Blade(ws2812), pixel_count, config.blade.brightness);
    info!("Blade: {} pixels", pixel_count);

    // Audio
    let Pio {
        common: mut audio_common,
        sm0: audio_sm,
        ..
    } = Pio::new(p.PIO1, Irqs);
    let i2s_program = PioI2sOutProgram::new(&mut audio_common);
    let i2s = PioI2sOut::new(
        &mut audio_common,
        audio_sm,
        p.DMA_CH0,
        p.PIN_16,
        p.PIN_17,
        p.PIN_18,
        SAMPLE_RATE,
        BIT_DEPTH,
        &i2s_program,
    );
    spawner.spawn(tasks::audio_task(i2s, &MIXER)).unwrap();

    let effects = EffectCoordinator::new(
        MixerVoice::new(&MIXER, AMBIENT_VOICE),
        MixerVoice::new(&MIXER, EFFECT_VOICE),
        blade,
        Delay,
        RandomPicker::new(SmallRng::seed_from_u64(seed)),
        assets::sound_bank(),
        config.effects,
    );

    let button = DebouncedButton::new_active_low(
        Input::new(p.PIN_15, Pull::Up),
        config.button.debounce_polls,
    );

    let saber = ControlLoop::new(&config, button, motion, effects);

    // The PIO blocks stay configured while this task runs
    tasks::run_control(saber, config.tick_ms).await
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> SaberConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: swing>{} clash>{} long_press={}ms palette={} colors",
                config.motion.swing_threshold,
                config.motion.clash_threshold,
                config.button.long_press_ms,
                config.blade.palette.len()
            );
            config
        }
        Err(e) => {
            error!("saber.toml rejected ({}), using defaults", e);
            SaberConfig::default()
        }
    }
}
