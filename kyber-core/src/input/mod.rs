//! Button gesture handling

pub mod gesture;

pub use gesture::{ButtonGesture, GestureEvent};
