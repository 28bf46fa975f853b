//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kyber-core for the saber's hardware:
//!
//! - Accelerometer (LIS3DH over async I2C)
//! - Debounced button input
//! - Pixel strip frame buffer with global brightness
//! - WAV clip parsing and the two-voice mixer
//! - Flash asset image and sound bank resolution

#![no_std]
#![deny(unsafe_code)]

pub mod assets;
pub mod audio;
pub mod blade;
pub mod input;
pub mod sensor;

#[cfg(test)]
pub(crate) mod testing;
