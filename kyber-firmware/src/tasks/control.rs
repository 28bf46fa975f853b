//! Control loop task
//!
//! Runs one control tick per `tick_ms` and logs what happened. Faults are
//! logged when they first appear, not on every tick they persist.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Delay, Duration, Instant, Ticker};
use kyber_core::config::MAX_PIXELS;
use kyber_core::control::{ControlLoop, TickReport};
use kyber_core::effects::{EffectCoordinator, Fault, RandomPicker};
use kyber_core::motion::MotionEvent;
use kyber_drivers::audio::MixerVoice;
use kyber_drivers::blade::PixelStrip;
use kyber_drivers::input::DebouncedButton;
use rand::rngs::SmallRng;

use crate::blade::Ws2812Blade;
use crate::sensor::MotionSensor;

pub type SaberVoice = MixerVoice<'static, 'static, CriticalSectionRawMutex>;
pub type Blade = PixelStrip<Ws2812Blade, MAX_PIXELS>;
pub type SaberEffects =
    EffectCoordinator<SaberVoice, SaberVoice, Blade, Delay, RandomPicker<SmallRng>>;
pub type Saber = ControlLoop<
    DebouncedButton<Input<'static>>,
    MotionSensor<I2c<'static, I2C1, Async>>,
    SaberEffects,
>;

/// Run the control loop forever
pub async fn run_control(mut saber: Saber, tick_ms: u32) -> ! {
    info!("Control loop started ({} ms tick)", tick_ms);

    let mut ticker = Ticker::every(Duration::from_millis(tick_ms as u64));
    let start = Instant::now();
    let mut last_fault: Option<Fault> = None;

    loop {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis() as u32;
        let report = saber.tick(now_ms).await;

        log_report(&report);

        let fault = report.all_faults().next().copied();
        if fault != last_fault {
            if let Some(f) = fault {
                warn!("Fault: {}", f);
            } else if let Some(f) = last_fault {
                info!("Recovered from {}", f);
            }
            last_fault = fault;
        }
    }
}

fn log_report(report: &TickReport) {
    if report.is_quiet() {
        return;
    }
    if let Some(gesture) = report.gesture {
        info!("Gesture: {}", gesture);
    }
    if let Some(motion) = report.motion {
        if motion != MotionEvent::Idle {
            debug!("Motion: {}", motion);
        }
    }
    for effect in &report.effects {
        match effect.suppressed {
            None => debug!("Effect {} ran (variant {})", effect.effect, effect.variant),
            Some(reason) => debug!("Effect {} suppressed: {}", effect.effect, reason),
        }
    }
}
