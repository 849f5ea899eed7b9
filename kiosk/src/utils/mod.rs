//! Utility modules for the review kiosk.
//!
//! # Modules
//!
//! - [`timer`]: One-shot timers that are cancelled when their handle is dropped

pub mod timer;

pub use timer::ScopedTimer;
