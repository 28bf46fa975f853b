//! Button gesture classifier
//!
//! Turns the debounced button level into press gestures by timing how long
//! the button is held. Called once per control tick.
//!
//! State transitions:
//! Idle --press--> Pressed (emit PressStart)
//! Pressed --held >= long press, not yet fired--> Pressed (emit LongPress once)
//! Pressed --release--> Idle (emit ShortPress only if released before the
//! long press threshold and no long press fired)

use crate::config::ButtonConfig;

/// Gesture recognized on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureEvent {
    /// Button went down
    PressStart,
    /// Button released before the long press threshold
    ShortPress,
    /// Button held past the long press threshold (fires once per hold)
    LongPress,
}

/// Gesture state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Pressed { start_ms: u32, long_fired: bool },
}

/// Short / long press classifier
#[derive(Debug, Clone)]
pub struct ButtonGesture {
    long_press_ms: u32,
    state: State,
}

impl ButtonGesture {
    pub fn new(config: &ButtonConfig) -> Self {
        Self {
            long_press_ms: config.long_press_ms,
            state: State::Idle,
        }
    }

    /// Check if the button is currently held
    pub fn is_pressed(&self) -> bool {
        matches!(self.state, State::Pressed { .. })
    }

    /// Feed one sample of the debounced button level
    ///
    /// `now_ms` is a free-running millisecond counter; wrap-around is handled.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Option<GestureEvent> {
        match (self.state, pressed) {
            (State::Idle, true) => {
                self.state = State::Pressed {
                    start_ms: now_ms,
                    long_fired: false,
                };
                Some(GestureEvent::PressStart)
            }
            (State::Idle, false) => None,

            (State::Pressed { start_ms, long_fired }, true) => {
                let held_ms = now_ms.wrapping_sub(start_ms);
                if !long_fired && held_ms >= self.long_press_ms {
                    self.state = State::Pressed {
                        start_ms,
                        long_fired: true,
                    };
                    Some(GestureEvent::LongPress)
                } else {
                    None
                }
            }

            (State::Pressed { start_ms, long_fired }, false) => {
                self.state = State::Idle;
                let held_ms = now_ms.wrapping_sub(start_ms);
                // A hold that reached the threshold is consumed even when no
                // held tick got to fire the long press.
                if !long_fired && held_ms < self.long_press_ms {
                    Some(GestureEvent::ShortPress)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LONG_MS: u32 = 500;

    fn gesture() -> ButtonGesture {
        ButtonGesture::new(&ButtonConfig {
            long_press_ms: LONG_MS,
            ..Default::default()
        })
    }

    /// Press at t=0, held samples every `step_ms`, release at `ticks * step_ms`
    fn run_hold(start_ms: u32, step_ms: u32, ticks: u32) -> (u32, u32) {
        let mut g = gesture();
        let mut shorts = 0;
        let mut longs = 0;
        let mut count = |e: Option<GestureEvent>| match e {
            Some(GestureEvent::ShortPress) => shorts += 1,
            Some(GestureEvent::LongPress) => longs += 1,
            _ => {}
        };

        for k in 0..ticks {
            count(g.update(true, start_ms.wrapping_add(k * step_ms)));
        }
        count(g.update(false, start_ms.wrapping_add(ticks * step_ms)));
        count(g.update(false, start_ms.wrapping_add((ticks + 1) * step_ms)));

        (shorts, longs)
    }

    #[test]
    fn test_press_start() {
        let mut g = gesture();
        assert_eq!(g.update(false, 0), None);
        assert_eq!(g.update(true, 5), Some(GestureEvent::PressStart));
        assert!(g.is_pressed());
        assert_eq!(g.update(true, 10), None);
    }

    #[test]
    fn test_short_press() {
        let mut g = gesture();
        g.update(true, 0);
        g.update(true, 100);
        assert_eq!(g.update(false, 200), Some(GestureEvent::ShortPress));
        assert!(!g.is_pressed());
    }

    #[test]
    fn test_long_press_fires_once() {
        let mut g = gesture();
        g.update(true, 0);
        assert_eq!(g.update(true, 499), None);
        assert_eq!(g.update(true, 500), Some(GestureEvent::LongPress));
        assert_eq!(g.update(true, 505), None);
        assert_eq!(g.update(true, 5_000), None);
        // Release after a long press emits nothing further
        assert_eq!(g.update(false, 5_005), None);
    }

    #[test]
    fn test_release_at_threshold_without_long_tick() {
        let mut g = gesture();
        g.update(true, 0);
        assert_eq!(g.update(false, 500), None);
        assert_eq!(g.update(false, 505), None);
    }

    #[test]
    fn test_new_hold_rearms_long_press() {
        let mut g = gesture();
        g.update(true, 0);
        assert_eq!(g.update(true, 600), Some(GestureEvent::LongPress));
        g.update(false, 610);

        assert_eq!(g.update(true, 700), Some(GestureEvent::PressStart));
        assert_eq!(g.update(true, 1_200), Some(GestureEvent::LongPress));
    }

    #[test]
    fn test_timer_wraparound() {
        let mut g = gesture();
        g.update(true, u32::MAX - 100);
        assert_eq!(g.update(true, 50), None);
        assert_eq!(g.update(false, 100), Some(GestureEvent::ShortPress));
    }

    /// (step, ticks) with every sample, release included, before the threshold
    fn short_hold() -> impl Strategy<Value = (u32, u32)> {
        (1u32..50).prop_flat_map(|step| (Just(step), 1..=(LONG_MS - 1) / step))
    }

    /// (step, ticks) where some held sample lands at or after the threshold
    fn long_hold() -> impl Strategy<Value = (u32, u32)> {
        (1u32..50).prop_flat_map(|step| {
            let min = LONG_MS.div_ceil(step) + 1;
            (Just(step), min..min + 200)
        })
    }

    proptest! {
        #[test]
        fn prop_short_hold_is_one_short_press(
            start in any::<u32>(),
            (step, ticks) in short_hold(),
        ) {
            prop_assert_eq!(run_hold(start, step, ticks), (1, 0));
        }

        #[test]
        fn prop_long_hold_is_one_long_press(
            start in any::<u32>(),
            (step, ticks) in long_hold(),
        ) {
            prop_assert_eq!(run_hold(start, step, ticks), (0, 1));
        }
    }
}
