//! Configuration type definitions
//!
//! These types represent the saber configuration. Configuration is fixed at
//! startup: the firmware parses its embedded `saber.toml` once and never
//! reloads it.

use heapless::Vec;
use smart_leds::RGB8;

/// Maximum number of palette entries
pub const MAX_PALETTE: usize = 8;

/// Maximum pixels on one blade
pub const MAX_PIXELS: usize = 144;

/// Default palette entries, in cycling order
pub const CYAN: RGB8 = RGB8 { r: 0, g: 125, b: 255 };
pub const GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };
pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
pub const YELLOW: RGB8 = RGB8 { r: 255, g: 255, b: 0 };

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Clash threshold must be strictly greater than swing threshold
    ThresholdOrder,
    /// Threshold is negative or not a number
    InvalidThreshold,
    /// Palette needs at least one color
    EmptyPalette,
    /// Palette exceeds [`MAX_PALETTE`]
    TooManyColors,
    /// Long press duration must be non-zero
    ZeroLongPress,
    /// Pixel count is zero or exceeds [`MAX_PIXELS`]
    PixelCount,
    /// Brightness or voice level outside 0.0..=1.0
    InvalidLevel,
    /// Tick interval must be non-zero
    ZeroTick,
}

/// Ordered list of blade colors
///
/// Order matters: a long press advances to the next entry, wrapping at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<RGB8, MAX_PALETTE>,
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = Vec::new();
        for color in [CYAN, GREEN, RED, YELLOW] {
            let _ = colors.push(color);
        }
        Self { colors }
    }
}

impl Palette {
    /// Create an empty palette
    pub const fn new() -> Self {
        Self { colors: Vec::new() }
    }

    /// Build a palette from a slice of colors
    pub fn from_slice(colors: &[RGB8]) -> Result<Self, ConfigError> {
        let mut palette = Self::new();
        for &color in colors {
            palette.push(color)?;
        }
        Ok(palette)
    }

    /// Append a color
    pub fn push(&mut self, color: RGB8) -> Result<(), ConfigError> {
        self.colors.push(color).map_err(|_| ConfigError::TooManyColors)
    }

    /// Remove all colors
    pub fn clear(&mut self) {
        self.colors.clear();
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping around the palette length
    ///
    /// An empty palette yields black.
    pub fn color(&self, index: usize) -> RGB8 {
        if self.colors.is_empty() {
            return RGB8::default();
        }
        self.colors[index % self.colors.len()]
    }

    /// Index of the entry following `index`, wrapping at the end
    pub fn next_index(&self, index: usize) -> usize {
        if self.colors.is_empty() {
            return 0;
        }
        (index + 1) % self.colors.len()
    }
}

/// Motion classification thresholds (m/s²)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Magnitude above which a motion counts as a swing
    pub swing_threshold: f32,
    /// Magnitude above which a motion counts as a clash
    pub clash_threshold: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            swing_threshold: 15.0,
            clash_threshold: 20.0,
        }
    }
}

/// Button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Hold time that turns a press into a long press
    pub long_press_ms: u32,
    /// Consecutive identical polls required before a level change is accepted
    pub debounce_polls: u8,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 500,
            debounce_polls: 2,
        }
    }
}

/// Blade strip layout and colors
#[derive(Debug, Clone, PartialEq)]
pub struct BladeConfig {
    /// Number of pixels driven
    pub pixel_count: u16,
    /// Global brightness applied by the strip (0.0..=1.0)
    pub brightness: f32,
    /// Color cycle order
    pub palette: Palette,
}

impl Default for BladeConfig {
    fn default() -> Self {
        Self {
            pixel_count: 100,
            brightness: 0.8,
            palette: Palette::default(),
        }
    }
}

/// Effect levels and animation timing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EffectConfig {
    /// Clash effects are suppressed entirely when false
    pub clash_enabled: bool,
    /// Sustain level of the looping hum
    pub hum_level: f32,
    /// Level of one-shot effects
    pub effect_level: f32,
    /// Delay between pixels of the ignition sweep
    pub ignite_step_ms: u32,
    /// Delay between pixels of the retraction fade
    pub retract_step_ms: u32,
    /// How long the blade stays white on a clash
    pub clash_flash_ms: u32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            clash_enabled: true,
            hum_level: 0.9,
            effect_level: 1.0,
            ignite_step_ms: 2,
            retract_step_ms: 2,
            clash_flash_ms: 300,
        }
    }
}

/// Complete saber configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SaberConfig {
    /// Control loop polling interval
    pub tick_ms: u32,
    pub motion: MotionConfig,
    pub button: ButtonConfig,
    pub blade: BladeConfig,
    pub effects: EffectConfig,
}

impl Default for SaberConfig {
    fn default() -> Self {
        Self {
            tick_ms: 5,
            motion: MotionConfig::default(),
            button: ButtonConfig::default(),
            blade: BladeConfig::default(),
            effects: EffectConfig::default(),
        }
    }
}

impl SaberConfig {
    /// Check every startup invariant
    pub fn validate(&self) -> Result<(), ConfigError> {
        let swing = self.motion.swing_threshold;
        let clash = self.motion.clash_threshold;
        if !swing.is_finite() || !clash.is_finite() || swing < 0.0 {
            return Err(ConfigError::InvalidThreshold);
        }
        if clash <= swing {
            return Err(ConfigError::ThresholdOrder);
        }

        if self.button.long_press_ms == 0 {
            return Err(ConfigError::ZeroLongPress);
        }

        if self.blade.pixel_count == 0 || self.blade.pixel_count as usize > MAX_PIXELS {
            return Err(ConfigError::PixelCount);
        }
        if self.blade.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        let levels = [
            self.blade.brightness,
            self.effects.hum_level,
            self.effects.effect_level,
        ];
        if levels.iter().any(|l| !(0.0..=1.0).contains(l)) {
            return Err(ConfigError::InvalidLevel);
        }

        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }
}
