//! Accelerometer presence wrapper
//!
//! A saber without a working accelerometer still powers on and changes
//! color; every motion read then reports the sensor as missing.

use embedded_hal_async::i2c::I2c;
use kyber_core::traits::{Acceleration, Accelerometer, SensorError};
use kyber_drivers::sensor::Lis3dh;

pub enum MotionSensor<I> {
    Present(Lis3dh<I>),
    Absent,
}

impl<I: I2c> Accelerometer for MotionSensor<I> {
    async fn read(&mut self) -> Result<Acceleration, SensorError> {
        match self {
            MotionSensor::Present(sensor) => sensor.read().await,
            MotionSensor::Absent => Err(SensorError::NotDetected),
        }
    }
}
