//! Board-agnostic control core for the prop saber firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (voice, blade strip, accelerometer, button)
//! - Motion classification (idle / swing / clash)
//! - Button gesture classification (short / long press)
//! - Effect coordination (power, swing, clash, color change)
//! - Power state machine and the per-tick control loop
//! - Configuration types and the embedded config parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod effects;
pub mod input;
pub mod motion;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
