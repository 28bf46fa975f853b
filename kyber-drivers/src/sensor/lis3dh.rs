//! LIS3DH 3-axis accelerometer (I2C)
//!
//! # Setup
//!
//! - CTRL_REG1: output data rate, all three axes enabled
//! - CTRL_REG4: block data update + high resolution, full-scale range
//!
//! Samples are read as one 6-byte auto-increment burst starting at
//! OUT_X_L (the MSB of the sub-address enables auto-increment).

use embedded_hal_async::i2c::I2c;
use kyber_core::traits::{Acceleration, Accelerometer, SensorError};

/// LIS3DH register addresses
pub mod reg {
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0F;
    /// Data rate and axis enable
    pub const CTRL_REG1: u8 = 0x20;
    /// Range, resolution and block data update
    pub const CTRL_REG4: u8 = 0x23;
    /// First output register (X low byte)
    pub const OUT_X_L: u8 = 0x28;
}

/// I2C address with SDO/SA0 pulled low
pub const DEFAULT_ADDRESS: u8 = 0x18;

/// Expected WHO_AM_I value
pub const DEVICE_ID: u8 = 0x33;

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.806;

/// Auto-increment flag for multi-byte reads
const AUTO_INCREMENT: u8 = 0x80;

/// CTRL_REG4 block data update + high resolution bits
const BDU_HR: u8 = 0x88;

/// Full-scale measurement range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Range {
    #[default]
    G2,
    G4,
    G8,
    G16,
}

impl Range {
    /// FS bits for CTRL_REG4
    pub fn bits(self) -> u8 {
        let fs = match self {
            Range::G2 => 0b00,
            Range::G4 => 0b01,
            Range::G8 => 0b10,
            Range::G16 => 0b11,
        };
        fs << 4
    }

    /// Raw counts per g
    pub fn divider(self) -> f32 {
        match self {
            Range::G2 => 16380.0,
            Range::G4 => 8190.0,
            Range::G8 => 4096.0,
            Range::G16 => 1365.0,
        }
    }
}

/// Output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    Hz100,
    Hz200,
    #[default]
    Hz400,
}

impl DataRate {
    /// CTRL_REG1 value with X, Y and Z enabled
    pub fn ctrl_reg1(self) -> u8 {
        let odr = match self {
            DataRate::Hz100 => 0x5,
            DataRate::Hz200 => 0x6,
            DataRate::Hz400 => 0x7,
        };
        (odr << 4) | 0x07
    }
}

/// Convert one raw axis reading to m/s²
pub fn raw_to_ms2(raw: i16, range: Range) -> f32 {
    raw as f32 / range.divider() * STANDARD_GRAVITY
}

/// LIS3DH driver
pub struct Lis3dh<I> {
    i2c: I,
    address: u8,
    range: Range,
}

impl<I: I2c> Lis3dh<I> {
    /// Probe and configure the sensor
    ///
    /// Fails with [`SensorError::NotDetected`] if the device id is wrong.
    pub async fn new(
        i2c: I,
        address: u8,
        range: Range,
        rate: DataRate,
    ) -> Result<Self, SensorError> {
        let mut sensor = Self {
            i2c,
            address,
            range,
        };

        if sensor.read_register(reg::WHO_AM_I).await? != DEVICE_ID {
            return Err(SensorError::NotDetected);
        }
        sensor.write_register(reg::CTRL_REG1, rate.ctrl_reg1()).await?;
        sensor.set_range(range).await?;

        Ok(sensor)
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub async fn set_range(&mut self, range: Range) -> Result<(), SensorError> {
        self.write_register(reg::CTRL_REG4, BDU_HR | range.bits())
            .await?;
        self.range = range;
        Ok(())
    }

    /// Read raw X, Y, Z counts
    pub async fn read_raw(&mut self) -> Result<[i16; 3], SensorError> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::OUT_X_L | AUTO_INCREMENT], &mut buf)
            .await
            .map_err(|_| SensorError::Bus)?;

        Ok([
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ])
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    async fn read_register(&mut self, register: u8) -> Result<u8, SensorError> {
        let mut value = [0u8];
        self.i2c
            .write_read(self.address, &[register], &mut value)
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(value[0])
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[register, value])
            .await
            .map_err(|_| SensorError::Bus)
    }
}

impl<I: I2c> Accelerometer for Lis3dh<I> {
    async fn read(&mut self) -> Result<Acceleration, SensorError> {
        let [x, y, z] = self.read_raw().await?;
        Ok(Acceleration::new(
            raw_to_ms2(x, self.range),
            raw_to_ms2(y, self.range),
            raw_to_ms2(z, self.range),
        ))
    }
}
