//! Events that drive the device

use crate::input::GestureEvent;
use crate::motion::MotionEvent;

/// Events produced by one control tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Classified button gesture
    Gesture(GestureEvent),
    /// Classified accelerometer sample
    Motion(MotionEvent),
}

impl From<GestureEvent> for Event {
    fn from(gesture: GestureEvent) -> Self {
        Event::Gesture(gesture)
    }
}

impl From<MotionEvent> for Event {
    fn from(motion: MotionEvent) -> Self {
        Event::Motion(motion)
    }
}
