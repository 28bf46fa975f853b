//! Button input

pub mod debounce;

pub use debounce::DebouncedButton;
