//! Audio voice trait

/// Errors that can occur when starting playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    /// Clip data could not be opened or is corrupt
    Unreadable,
    /// Clip is readable but in a format the mixer cannot play
    UnsupportedFormat,
}

/// One independently addressable voice of the audio mixer
///
/// The firmware uses two voices: voice 0 carries the looping ambient hum,
/// voice 1 carries the exclusive one-shot effects.
pub trait Voice {
    /// Handle to a pre-decoded sample stream
    ///
    /// Clips are resolved once at startup and never mutated, so handles are
    /// cheap copies (typically a slice into flash).
    type Clip: Copy;

    /// Start playing a clip, replacing whatever this voice was playing
    fn play(&mut self, clip: Self::Clip, looping: bool) -> Result<(), AudioError>;

    /// Stop playback immediately
    fn stop(&mut self);

    /// Set the output level (0.0 = silent, 1.0 = full scale)
    fn set_level(&mut self, level: f32);

    /// Check if the voice is currently producing sound
    fn is_playing(&self) -> bool;
}
