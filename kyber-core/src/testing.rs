//! Hand-written mocks shared by the unit tests

use std::collections::VecDeque;
use std::vec;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use smart_leds::RGB8;

use crate::config::EffectConfig;
use crate::effects::{EffectCoordinator, SoundBank, VariantPicker};
use crate::traits::{
    Acceleration, Accelerometer, AudioError, BladeStrip, ButtonInput, SensorError, StripError,
    Voice,
};

/// Clip names starting with this prefix fail to play
pub const BAD_CLIP: &str = "bad";

/// Voice that records every call
#[derive(Debug, Default)]
pub struct MockVoice {
    pub playing: bool,
    pub current: Option<&'static str>,
    pub looping: bool,
    pub level: f32,
    pub plays: Vec<&'static str>,
    pub stops: u32,
}

impl MockVoice {
    /// Simulate the clip reaching its end
    pub fn finish(&mut self) {
        self.playing = false;
        self.current = None;
    }
}

impl Voice for MockVoice {
    type Clip = &'static str;

    fn play(&mut self, clip: Self::Clip, looping: bool) -> Result<(), AudioError> {
        if clip.starts_with(BAD_CLIP) {
            return Err(AudioError::Unreadable);
        }
        self.plays.push(clip);
        self.current = Some(clip);
        self.looping = looping;
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.finish();
    }

    fn set_level(&mut self, level: f32) {
        self.level = level;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Strip that keeps a copy of every flushed frame
#[derive(Debug)]
pub struct MockStrip {
    pub pixels: Vec<RGB8>,
    pub frames: Vec<Vec<RGB8>>,
    pub fail: bool,
}

impl MockStrip {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![RGB8::default(); len],
            frames: Vec::new(),
            fail: false,
        }
    }

    pub fn last_frame(&self) -> Option<&[RGB8]> {
        self.frames.last().map(|f| f.as_slice())
    }
}

impl BladeStrip for MockStrip {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) {
        if let Some(p) = self.pixels.get_mut(index) {
            *p = color;
        }
    }

    fn fill(&mut self, color: RGB8) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }

    async fn flush(&mut self) -> Result<(), StripError> {
        if self.fail {
            return Err(StripError::WriteFailed);
        }
        self.frames.push(self.pixels.clone());
        Ok(())
    }
}

/// Delay that only accumulates the requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    pub elapsed_us: u64,
}

impl MockDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_us / 1000
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_us += u64::from(ns) / 1000;
    }

    async fn delay_us(&mut self, us: u32) {
        self.elapsed_us += u64::from(us);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.elapsed_us += u64::from(ms) * 1000;
    }
}

/// Picker that always chooses the same variant
#[derive(Debug, Default)]
pub struct FixedPicker(pub usize);

impl VariantPicker for FixedPicker {
    fn pick(&mut self, count: usize) -> usize {
        self.0.min(count - 1)
    }
}

/// Accelerometer that replays queued readings, then a default
#[derive(Debug, Default)]
pub struct MockAccel {
    pub queue: VecDeque<Result<Acceleration, SensorError>>,
    pub fallback: Acceleration,
    pub reads: u32,
}

impl MockAccel {
    pub fn push(&mut self, reading: Result<Acceleration, SensorError>) {
        self.queue.push_back(reading);
    }
}

impl Accelerometer for MockAccel {
    async fn read(&mut self) -> Result<Acceleration, SensorError> {
        self.reads += 1;
        self.queue.pop_front().unwrap_or(Ok(self.fallback))
    }
}

/// Button whose level the test sets directly
#[derive(Debug, Default)]
pub struct MockButton {
    pub pressed: bool,
}

impl ButtonInput for MockButton {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

pub type MockCoordinator =
    EffectCoordinator<MockVoice, MockVoice, MockStrip, MockDelay, FixedPicker>;

/// Bank with every clip present and three variants of each motion effect
pub fn full_bank() -> SoundBank<&'static str> {
    let mut bank = SoundBank::new();
    bank.hum = Some("hum");
    bank.power_on = Some("poweron");
    bank.power_off = Some("poweroff");
    for name in ["swing1", "swing2", "swing3"] {
        let _ = bank.swing.push(name);
    }
    for name in ["clash1", "clash2", "clash3"] {
        let _ = bank.clash.push(name);
    }
    bank
}

pub fn coordinator(bank: SoundBank<&'static str>, pixels: usize) -> MockCoordinator {
    coordinator_with(bank, pixels, EffectConfig::default())
}

pub fn coordinator_with(
    bank: SoundBank<&'static str>,
    pixels: usize,
    config: EffectConfig,
) -> MockCoordinator {
    EffectCoordinator::new(
        MockVoice::default(),
        MockVoice::default(),
        MockStrip::new(pixels),
        MockDelay::default(),
        FixedPicker(0),
        bank,
        config,
    )
}
