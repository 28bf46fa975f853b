//! Effect primitives trait

use smart_leds::RGB8;

use crate::effects::EffectReport;
use crate::state::PowerState;

/// Audio-visual responses the device state machine can request
///
/// Each call runs to completion, including any animation, before it
/// returns. Guards (power, busy voice, clash disabled) are the
/// implementation's concern and show up in the returned report.
#[allow(async_fn_in_trait)]
pub trait Effects {
    /// Ignition: power-on sound, base-to-tip sweep, then the looping hum
    async fn power_on(&mut self, color: RGB8) -> EffectReport;

    /// Retraction: stop the hum, power-off sound, tip-to-base fade to black
    async fn power_off(&mut self, color: RGB8) -> EffectReport;

    /// Play a random swing variant
    async fn trigger_swing(&mut self, power: PowerState) -> EffectReport;

    /// Play a random clash variant and flash the blade white
    async fn trigger_clash(&mut self, power: PowerState, color: RGB8) -> EffectReport;

    /// Repaint the blade with a new color if it is lit
    async fn change_color(&mut self, power: PowerState, color: RGB8) -> EffectReport;
}
