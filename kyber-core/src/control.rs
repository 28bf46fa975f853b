//! Per-tick control loop
//!
//! One [`ControlLoop::tick`] polls the button, classifies the gesture,
//! samples motion when the blade is on, and hands each resulting event to
//! the device. The caller provides the cadence and the clock.

use heapless::Vec;

use crate::config::SaberConfig;
use crate::effects::{EffectReport, Fault};
use crate::input::{ButtonGesture, GestureEvent};
use crate::motion::{MotionClassifier, MotionEvent};
use crate::state::{DeviceStateMachine, Event};
use crate::traits::{Accelerometer, ButtonInput, Effects};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Gesture classified this tick
    pub gesture: Option<GestureEvent>,
    /// Motion classified this tick (`None` when the sensor was not sampled)
    pub motion: Option<MotionEvent>,
    /// Effects started this tick, in order
    pub effects: Vec<EffectReport, 2>,
    /// Faults outside any effect
    pub faults: Vec<Fault, 1>,
}

impl TickReport {
    /// Check if nothing worth logging happened
    pub fn is_quiet(&self) -> bool {
        self.gesture.is_none()
            && matches!(self.motion, None | Some(MotionEvent::Idle))
            && self.effects.is_empty()
            && self.faults.is_empty()
    }

    /// Every fault from this tick, including those inside effects
    pub fn all_faults(&self) -> impl Iterator<Item = &Fault> {
        self.faults
            .iter()
            .chain(self.effects.iter().flat_map(|e| e.faults.iter()))
    }
}

pub struct ControlLoop<B, M, X> {
    button: B,
    accel: M,
    gesture: ButtonGesture,
    classifier: MotionClassifier,
    device: DeviceStateMachine<X>,
}

impl<B, M, X> ControlLoop<B, M, X>
where
    B: ButtonInput,
    M: Accelerometer,
    X: Effects,
{
    pub fn new(config: &SaberConfig, button: B, accel: M, effects: X) -> Self {
        Self {
            button,
            accel,
            gesture: ButtonGesture::new(&config.button),
            classifier: MotionClassifier::new(&config.motion),
            device: DeviceStateMachine::new(config.blade.palette.clone(), effects),
        }
    }

    pub fn device(&self) -> &DeviceStateMachine<X> {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut DeviceStateMachine<X> {
        &mut self.device
    }

    /// Run one polling cycle at time `now_ms`
    ///
    /// The gesture is handled first, so a power-off in this tick also
    /// skips the motion read.
    pub async fn tick(&mut self, now_ms: u32) -> TickReport {
        let mut report = TickReport::default();

        let pressed = self.button.is_pressed();
        report.gesture = self.gesture.update(pressed, now_ms);
        if let Some(gesture) = report.gesture {
            self.dispatch(gesture.into(), &mut report).await;
        }

        if self.device.power().motion_allowed() {
            let reading = self.accel.read().await;
            if let Err(e) = reading {
                let _ = report.faults.push(Fault::SensorUnavailable(e));
            }
            let motion = self.classifier.classify_reading(reading);
            report.motion = Some(motion);
            self.dispatch(motion.into(), &mut report).await;
        }

        report
    }

    async fn dispatch(&mut self, event: Event, report: &mut TickReport) {
        if let Some(effect) = self.device.handle(event).await {
            let _ = report.effects.push(effect);
        }
    }
}
