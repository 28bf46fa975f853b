//! Effect outcome reporting
//!
//! Effects never fail outright: a missing clip or a dropped frame degrades
//! the effect and is recorded here for the firmware to log.

use heapless::Vec;

use super::bank::ClipKind;
use crate::traits::{AudioError, SensorError, StripError};

/// Maximum distinct faults kept per report
pub const MAX_FAULTS: usize = 4;

/// Effect primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    PowerOn,
    PowerOff,
    Swing,
    Clash,
    ColorChange,
}

/// Why an effect did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Suppressed {
    /// Motion effects need the blade on
    PoweredOff,
    /// A one-shot is already playing on the effect voice
    VoiceBusy,
    /// Clash effects are disabled by configuration
    ClashDisabled,
    /// The bank has no variants for this effect
    NoVariants,
}

/// Recoverable fault observed during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Accelerometer read failed; treated as no motion
    SensorUnavailable(SensorError),
    /// Bank has no clip for this role; sound skipped
    AssetMissing(ClipKind),
    /// Clip could not be played; sound skipped
    AssetUnreadable(ClipKind, AudioError),
    /// Strip flush failed; frame dropped
    StripWrite(StripError),
}

/// Outcome of one effect primitive
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EffectReport {
    pub effect: Effect,
    /// Set when a guard prevented the effect entirely
    pub suppressed: Option<Suppressed>,
    /// Index of the swing/clash variant that was played
    pub variant: Option<usize>,
    /// Faults that degraded the effect, each recorded once
    pub faults: Vec<Fault, MAX_FAULTS>,
}

impl EffectReport {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            suppressed: None,
            variant: None,
            faults: Vec::new(),
        }
    }

    pub fn suppressed(effect: Effect, reason: Suppressed) -> Self {
        Self {
            suppressed: Some(reason),
            ..Self::new(effect)
        }
    }

    /// Check if the effect ran (possibly degraded)
    pub fn ran(&self) -> bool {
        self.suppressed.is_none()
    }

    /// Check if the effect ran without any fault
    pub fn is_clean(&self) -> bool {
        self.ran() && self.faults.is_empty()
    }

    /// Record a fault, ignoring repeats
    ///
    /// A fade over a dead strip fails every frame; one entry is enough.
    pub fn record(&mut self, fault: Fault) {
        if !self.faults.contains(&fault) {
            let _ = self.faults.push(fault);
        }
    }
}
