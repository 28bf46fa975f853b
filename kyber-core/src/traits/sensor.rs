//! Motion sensor and button traits

/// Errors that can occur when reading the accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed
    Bus,
    /// Device did not answer with the expected identity
    NotDetected,
    /// No fresh sample available
    NotReady,
}

/// Acceleration vector in m/s²
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Acceleration {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude of the vector
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Trait for 3-axis accelerometers
#[allow(async_fn_in_trait)]
pub trait Accelerometer {
    /// Read the current acceleration
    ///
    /// Takes `&mut self` because bus reads require mutable access.
    async fn read(&mut self) -> Result<Acceleration, SensorError>;
}

/// Trait for the (already debounced) user button
pub trait ButtonInput {
    /// Check if the button is held down
    ///
    /// Takes `&mut self` because implementations sample and filter the
    /// raw line on every call.
    fn is_pressed(&mut self) -> bool;
}
