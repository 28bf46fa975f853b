//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic
//! and hardware-specific implementations. [`Effects`] is the seam between
//! the device state machine and the effect coordinator.

pub mod audio;
pub mod blade;
pub mod effects;
pub mod sensor;

pub use audio::{AudioError, Voice};
pub use blade::{BladeStrip, StripError};
pub use effects::Effects;
pub use sensor::{Acceleration, Accelerometer, ButtonInput, SensorError};
