//! Audio clips and mixing
//!
//! Clips are 16-bit mono PCM WAV files at [`SAMPLE_RATE`], played straight
//! from flash. Nothing is decoded ahead of time; the header is checked when
//! a voice starts a clip.

pub mod mixer;
pub mod wav;

pub use mixer::{Mixer, MixerVoice, SharedMixer, VOICES};
pub use wav::{Pcm, WavError};

/// Output sample rate in Hz
pub const SAMPLE_RATE: u32 = 22_050;
