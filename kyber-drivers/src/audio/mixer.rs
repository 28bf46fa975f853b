//! Fixed-voice software mixer
//!
//! Each voice plays one clip at a time, optionally looping, scaled by its
//! own level. The control side starts and stops clips through
//! [`MixerVoice`] handles while the audio task pulls mixed blocks with
//! [`Mixer::fill`]; both go through the same blocking mutex.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use kyber_core::traits::{AudioError, Voice};

use super::wav::Pcm;

/// Number of voices (ambient hum + one-shot effects)
pub const VOICES: usize = 2;

#[derive(Debug, Clone, Copy)]
struct Channel<'a> {
    clip: Option<Pcm<'a>>,
    position: usize,
    looping: bool,
    level: f32,
}

impl Channel<'_> {
    const IDLE: Self = Self {
        clip: None,
        position: 0,
        looping: false,
        level: 1.0,
    };

    /// Next sample, advancing and ending or wrapping the clip
    fn next_sample(&mut self) -> i32 {
        let Some(clip) = self.clip else {
            return 0;
        };
        if self.position >= clip.len() {
            if self.looping && !clip.is_empty() {
                self.position = 0;
            } else {
                self.clip = None;
                return 0;
            }
        }
        let sample = clip.sample(self.position);
        self.position += 1;
        (sample as f32 * self.level) as i32
    }
}

pub struct Mixer<'a> {
    channels: [Channel<'a>; VOICES],
}

impl Default for Mixer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Mixer<'a> {
    pub const fn new() -> Self {
        Self {
            channels: [Channel::IDLE; VOICES],
        }
    }

    /// Start `clip` on `voice` from its first sample
    pub fn play(&mut self, voice: usize, clip: Pcm<'a>, looping: bool) {
        if let Some(ch) = self.channels.get_mut(voice) {
            ch.clip = Some(clip);
            ch.position = 0;
            ch.looping = looping;
        }
    }

    pub fn stop(&mut self, voice: usize) {
        if let Some(ch) = self.channels.get_mut(voice) {
            ch.clip = None;
        }
    }

    pub fn set_level(&mut self, voice: usize, level: f32) {
        if let Some(ch) = self.channels.get_mut(voice) {
            ch.level = level.clamp(0.0, 1.0);
        }
    }

    pub fn is_playing(&self, voice: usize) -> bool {
        self.channels.get(voice).is_some_and(|ch| ch.clip.is_some())
    }

    /// Mix the next `out.len()` samples, saturating at full scale
    pub fn fill(&mut self, out: &mut [i16]) {
        for sample in out.iter_mut() {
            let mixed: i32 = self.channels.iter_mut().map(Channel::next_sample).sum();
            *sample = mixed.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        }
    }
}

/// Mixer shared between the control task and the audio task
pub type SharedMixer<'a, M> = Mutex<M, RefCell<Mixer<'a>>>;

/// Handle to one voice of a shared mixer
///
/// Clips are raw WAV files; the header is checked on every `play`.
pub struct MixerVoice<'m, 'a, M: RawMutex> {
    mixer: &'m SharedMixer<'a, M>,
    voice: usize,
}

impl<'m, 'a, M: RawMutex> MixerVoice<'m, 'a, M> {
    pub fn new(mixer: &'m SharedMixer<'a, M>, voice: usize) -> Self {
        Self { mixer, voice }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Mixer<'a>) -> R) -> R {
        self.mixer.lock(|m| f(&mut m.borrow_mut()))
    }
}

impl<'a, M: RawMutex> Voice for MixerVoice<'_, 'a, M> {
    type Clip = &'a [u8];

    fn play(&mut self, clip: Self::Clip, looping: bool) -> Result<(), AudioError> {
        let pcm = Pcm::from_wav(clip)?;
        let voice = self.voice;
        self.with(|m| m.play(voice, pcm, looping));
        Ok(())
    }

    fn stop(&mut self) {
        let voice = self.voice;
        self.with(|m| m.stop(voice));
    }

    fn set_level(&mut self, level: f32) {
        let voice = self.voice;
        self.with(|m| m.set_level(voice, level));
    }

    fn is_playing(&self) -> bool {
        let voice = self.voice;
        self.with(|m| m.is_playing(voice))
    }
}
