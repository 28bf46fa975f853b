//! Motion classification
//!
//! Turns raw acceleration into discrete swing and clash events.

pub mod classifier;

pub use classifier::{MotionClassifier, MotionEvent};
