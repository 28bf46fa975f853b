//! Effect coordinator
//!
//! Sequences sounds and light for the power, swing, clash and color
//! primitives. Voice 0 (ambient) only ever carries the looping hum;
//! voice 1 (effect) carries the one-shots and is exclusive: a swing or
//! clash is dropped while another one-shot is still playing.

use embedded_hal_async::delay::DelayNs;
use smart_leds::RGB8;

use super::bank::{ClipKind, SoundBank};
use super::picker::VariantPicker;
use super::report::{Effect, EffectReport, Fault, Suppressed};
use crate::config::EffectConfig;
use crate::state::PowerState;
use crate::traits::{BladeStrip, Effects, Voice};

/// Clash flash color
pub const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Owns the voices, the strip and the sound bank
pub struct EffectCoordinator<A, E, S, D, P>
where
    A: Voice,
{
    ambient: A,
    effect: E,
    strip: S,
    delay: D,
    picker: P,
    bank: SoundBank<A::Clip>,
    config: EffectConfig,
}

impl<A, E, S, D, P> EffectCoordinator<A, E, S, D, P>
where
    A: Voice,
    E: Voice<Clip = A::Clip>,
    S: BladeStrip,
    D: DelayNs,
    P: VariantPicker,
{
    pub fn new(
        ambient: A,
        effect: E,
        strip: S,
        delay: D,
        picker: P,
        bank: SoundBank<A::Clip>,
        config: EffectConfig,
    ) -> Self {
        Self {
            ambient,
            effect,
            strip,
            delay,
            picker,
            bank,
            config,
        }
    }

    pub fn ambient(&self) -> &A {
        &self.ambient
    }

    pub fn effect_voice(&self) -> &E {
        &self.effect
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut A, &mut E, &mut S, &mut D) {
        (
            &mut self.ambient,
            &mut self.effect,
            &mut self.strip,
            &mut self.delay,
        )
    }

    /// Start a one-shot on the effect voice, replacing whatever it plays
    ///
    /// Returns false when the clip is missing or could not be opened.
    fn play_one_shot(
        &mut self,
        clip: Option<A::Clip>,
        kind: ClipKind,
        report: &mut EffectReport,
    ) -> bool {
        let Some(clip) = clip else {
            report.record(Fault::AssetMissing(kind));
            return false;
        };
        self.effect.set_level(self.config.effect_level);
        match self.effect.play(clip, false) {
            Ok(()) => true,
            Err(e) => {
                report.record(Fault::AssetUnreadable(kind, e));
                false
            }
        }
    }

    /// Pick and start a swing or clash variant
    ///
    /// Callers have already checked that the variant list is non-empty.
    fn play_variant(&mut self, kind: ClipKind, report: &mut EffectReport) -> bool {
        let count = self.bank.variants(kind).len();
        let index = self.picker.pick(count).min(count - 1);
        let clip = self.bank.variants(kind)[index];
        let started = self.play_one_shot(Some(clip), kind, report);
        if started {
            report.variant = Some(index);
        }
        started
    }

    async fn flush(&mut self, report: &mut EffectReport) {
        if let Err(e) = self.strip.flush().await {
            report.record(Fault::StripWrite(e));
        }
    }

    fn start_hum(&mut self, report: &mut EffectReport) {
        let Some(hum) = self.bank.clip(ClipKind::Hum) else {
            report.record(Fault::AssetMissing(ClipKind::Hum));
            return;
        };
        self.ambient.set_level(self.config.hum_level);
        if let Err(e) = self.ambient.play(hum, true) {
            report.record(Fault::AssetUnreadable(ClipKind::Hum, e));
        }
    }

    /// Common guard for swing and clash
    fn motion_guard(&self, power: PowerState, kind: ClipKind) -> Option<Suppressed> {
        if !power.is_on() {
            return Some(Suppressed::PoweredOff);
        }
        if kind == ClipKind::Clash && !self.config.clash_enabled {
            return Some(Suppressed::ClashDisabled);
        }
        if self.effect.is_playing() {
            return Some(Suppressed::VoiceBusy);
        }
        if self.bank.variants(kind).is_empty() {
            return Some(Suppressed::NoVariants);
        }
        None
    }
}

/// Scale a color by `factor` (0.0..=1.0), truncating each channel
fn dim(color: RGB8, factor: f32) -> RGB8 {
    let scale = |c: u8| (c as f32 * factor) as u8;
    RGB8 {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}

impl<A, E, S, D, P> Effects for EffectCoordinator<A, E, S, D, P>
where
    A: Voice,
    E: Voice<Clip = A::Clip>,
    S: BladeStrip,
    D: DelayNs,
    P: VariantPicker,
{
    async fn power_on(&mut self, color: RGB8) -> EffectReport {
        let mut report = EffectReport::new(Effect::PowerOn);

        // Ignition animates even without its sound
        let clip = self.bank.clip(ClipKind::PowerOn);
        self.play_one_shot(clip, ClipKind::PowerOn, &mut report);

        for i in 0..self.strip.len() {
            self.strip.set_pixel(i, color);
            self.flush(&mut report).await;
            self.delay.delay_ms(self.config.ignite_step_ms).await;
        }

        self.start_hum(&mut report);
        report
    }

    async fn power_off(&mut self, color: RGB8) -> EffectReport {
        let mut report = EffectReport::new(Effect::PowerOff);

        self.ambient.stop();
        let clip = self.bank.clip(ClipKind::PowerOff);
        self.play_one_shot(clip, ClipKind::PowerOff, &mut report);

        // Tip-to-base: pixel i is left at i/(N-1) of full color
        let len = self.strip.len();
        let span = len.saturating_sub(1);
        for i in (0..len).rev() {
            let factor = if span == 0 { 0.0 } else { i as f32 / span as f32 };
            self.strip.set_pixel(i, dim(color, factor));
            self.flush(&mut report).await;
            self.delay.delay_ms(self.config.retract_step_ms).await;
        }

        self.strip.fill(BLACK);
        self.flush(&mut report).await;
        report
    }

    async fn trigger_swing(&mut self, power: PowerState) -> EffectReport {
        if let Some(reason) = self.motion_guard(power, ClipKind::Swing) {
            return EffectReport::suppressed(Effect::Swing, reason);
        }
        let mut report = EffectReport::new(Effect::Swing);
        self.play_variant(ClipKind::Swing, &mut report);
        report
    }

    async fn trigger_clash(&mut self, power: PowerState, color: RGB8) -> EffectReport {
        if let Some(reason) = self.motion_guard(power, ClipKind::Clash) {
            return EffectReport::suppressed(Effect::Clash, reason);
        }
        let mut report = EffectReport::new(Effect::Clash);
        if !self.play_variant(ClipKind::Clash, &mut report) {
            return report;
        }

        self.strip.fill(WHITE);
        self.flush(&mut report).await;
        self.delay.delay_ms(self.config.clash_flash_ms).await;
        self.strip.fill(color);
        self.flush(&mut report).await;
        report
    }

    async fn change_color(&mut self, power: PowerState, color: RGB8) -> EffectReport {
        if !power.is_on() {
            return EffectReport::suppressed(Effect::ColorChange, Suppressed::PoweredOff);
        }
        let mut report = EffectReport::new(Effect::ColorChange);
        self.strip.fill(color);
        self.flush(&mut report).await;
        report
    }
}
