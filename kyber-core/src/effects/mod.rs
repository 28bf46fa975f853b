//! Audio and light effects
//!
//! The coordinator owns both voices and the blade strip, and is the only
//! code that starts sounds or paints pixels.

pub mod bank;
pub mod coordinator;
pub mod picker;
pub mod report;

pub use bank::{ClipKind, SoundBank, MAX_VARIANTS};
pub use coordinator::{EffectCoordinator, WHITE};
pub use picker::{RandomPicker, VariantPicker};
pub use report::{Effect, EffectReport, Fault, Suppressed, MAX_FAULTS};
