//! Saber power state and event handling
//!
//! The power state is explicit, finite, and deterministic. The device
//! owns it together with the active color and turns events into effects.

pub mod device;
pub mod events;
pub mod machine;

pub use device::DeviceStateMachine;
pub use events::Event;
pub use machine::PowerState;
