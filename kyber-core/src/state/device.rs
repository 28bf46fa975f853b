//! Device state machine
//!
//! Owns the power state and the active palette index, and is the only
//! code that decides which effect runs. All state lives in this one
//! instance; the control loop passes it events in tick order.

use smart_leds::RGB8;

use super::events::Event;
use super::machine::PowerState;
use crate::config::Palette;
use crate::effects::EffectReport;
use crate::input::GestureEvent;
use crate::motion::MotionEvent;
use crate::traits::Effects;

pub struct DeviceStateMachine<X> {
    power: PowerState,
    palette: Palette,
    color_index: usize,
    effects: X,
}

impl<X: Effects> DeviceStateMachine<X> {
    /// Create a device that boots off, showing the first palette color
    pub fn new(palette: Palette, effects: X) -> Self {
        Self {
            power: PowerState::Off,
            palette,
            color_index: 0,
            effects,
        }
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Current blade color
    pub fn color(&self) -> RGB8 {
        self.palette.color(self.color_index)
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn effects(&self) -> &X {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut X {
        &mut self.effects
    }

    /// Apply one event, running the effect it triggers to completion
    ///
    /// Returns `None` when the event triggers nothing at all.
    pub async fn handle(&mut self, event: Event) -> Option<EffectReport> {
        match event {
            Event::Gesture(GestureEvent::ShortPress) => Some(self.toggle_power(event).await),
            Event::Gesture(GestureEvent::LongPress) => Some(self.change_color().await),
            Event::Gesture(GestureEvent::PressStart) => None,

            // Motion is ignored entirely while off
            Event::Motion(_) if !self.power.motion_allowed() => None,
            Event::Motion(MotionEvent::Clash) => {
                let color = self.color();
                Some(self.effects.trigger_clash(self.power, color).await)
            }
            Event::Motion(MotionEvent::Swing) => Some(self.effects.trigger_swing(self.power).await),
            Event::Motion(MotionEvent::Idle) => None,
        }
    }

    /// Advance to the next palette color, wrapping, and repaint if lit
    pub async fn change_color(&mut self) -> EffectReport {
        self.color_index = self.palette.next_index(self.color_index);
        let color = self.color();
        self.effects.change_color(self.power, color).await
    }

    async fn toggle_power(&mut self, event: Event) -> EffectReport {
        let next = self.power.transition(event);
        let color = self.color();
        let report = match next {
            PowerState::On => self.effects.power_on(color).await,
            PowerState::Off => self.effects.power_off(color).await,
        };
        self.power = next;
        report
    }
}
