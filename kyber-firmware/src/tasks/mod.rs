//! Embassy async tasks
//!
//! The audio task streams the mixer to I2S on its own; the control loop
//! runs every tick and talks to the mixer through voice handles.

pub mod audio;
pub mod control;

pub use audio::{audio_task, SaberMixer};
pub use control::{run_control, Saber};
