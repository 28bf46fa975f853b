//! Sound bank
//!
//! Clip handles resolved once at startup. The bank is never mutated after
//! it is handed to the coordinator.

use heapless::Vec;

/// Maximum swing or clash variants
pub const MAX_VARIANTS: usize = 16;

/// Role of a clip in the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClipKind {
    Hum,
    PowerOn,
    PowerOff,
    Swing,
    Clash,
}

/// Ordered clip handles for every effect
///
/// Empty variant lists are valid: swing and clash then do nothing.
#[derive(Debug, Clone)]
pub struct SoundBank<C> {
    /// Looping ambient hum
    pub hum: Option<C>,
    /// Ignition one-shot
    pub power_on: Option<C>,
    /// Retraction one-shot
    pub power_off: Option<C>,
    /// Swing variants, sorted by asset name
    pub swing: Vec<C, MAX_VARIANTS>,
    /// Clash variants, sorted by asset name
    pub clash: Vec<C, MAX_VARIANTS>,
}

impl<C> Default for SoundBank<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SoundBank<C> {
    /// Create an empty bank
    pub const fn new() -> Self {
        Self {
            hum: None,
            power_on: None,
            power_off: None,
            swing: Vec::new(),
            clash: Vec::new(),
        }
    }

    /// Variants for a motion effect
    pub fn variants(&self, kind: ClipKind) -> &[C] {
        match kind {
            ClipKind::Swing => &self.swing,
            ClipKind::Clash => &self.clash,
            _ => &[],
        }
    }
}

impl<C: Copy> SoundBank<C> {
    /// Single clip for a non-variant effect
    pub fn clip(&self, kind: ClipKind) -> Option<C> {
        match kind {
            ClipKind::Hum => self.hum,
            ClipKind::PowerOn => self.power_on,
            ClipKind::PowerOff => self.power_off,
            ClipKind::Swing | ClipKind::Clash => None,
        }
    }
}
