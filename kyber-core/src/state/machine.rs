//! Power state definition

use super::events::Event;
use crate::input::GestureEvent;

/// Blade power states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Blade dark, hum silent (boot state)
    #[default]
    Off,
    /// Blade lit, hum looping
    On,
}

impl PowerState {
    pub fn is_on(&self) -> bool {
        matches!(self, PowerState::On)
    }

    /// Check if this state reacts to motion
    pub fn motion_allowed(&self) -> bool {
        self.is_on()
    }

    /// Process an event and return the next state
    ///
    /// Only a short press changes power; everything else stays put.
    pub fn transition(self, event: Event) -> Self {
        use PowerState::*;

        match (self, event) {
            (Off, Event::Gesture(GestureEvent::ShortPress)) => On,
            (On, Event::Gesture(GestureEvent::ShortPress)) => Off,
            _ => self,
        }
    }
}
