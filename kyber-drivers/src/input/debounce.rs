//! Debounced push button
//!
//! A level change is accepted only after the raw line has read the new
//! level for `polls` consecutive samples. A failed pin read keeps the last
//! stable level.

use embedded_hal::digital::InputPin;
use kyber_core::traits::ButtonInput;

pub struct DebouncedButton<P> {
    pin: P,
    /// If true, pressed = pin LOW (button to ground with pull-up)
    active_low: bool,
    polls: u8,
    stable: bool,
    pending: u8,
}

impl<P: InputPin> DebouncedButton<P> {
    /// Create a debounced button
    ///
    /// `polls` of 0 or 1 accepts every change immediately.
    pub fn new(pin: P, polls: u8, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            polls: polls.max(1),
            stable: false,
            pending: 0,
        }
    }

    /// Button wired to ground with a pull-up
    pub fn new_active_low(pin: P, polls: u8) -> Self {
        Self::new(pin, polls, true)
    }

    fn raw_pressed(&mut self) -> Option<bool> {
        let high = self.pin.is_high().ok()?;
        Some(high != self.active_low)
    }
}

impl<P: InputPin> ButtonInput for DebouncedButton<P> {
    fn is_pressed(&mut self) -> bool {
        let Some(raw) = self.raw_pressed() else {
            return self.stable;
        };

        if raw == self.stable {
            self.pending = 0;
        } else {
            self.pending += 1;
            if self.pending >= self.polls {
                self.stable = raw;
                self.pending = 0;
            }
        }
        self.stable
    }
}
