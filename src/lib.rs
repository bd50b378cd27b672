#![no_std]

//! Driver for the Lumissil IS31FL3197 four-channel LED controller.
//!
//! The chip drives four LEDs (red, green, blue and a white that is
//! unpopulated on the reference hardware) over a two-wire bus and offers
//! three layers of control:
//!
//! - direct per-channel control (intensity, PWM duty, current-limit band),
//! - grouped color control over all three color channels at once,
//! - an autonomous pattern engine that sequences up to three colors with
//!   humanized timing, looping and gamma parameters and keeps running
//!   while the host sleeps.
//!
//! The driver is generic over any [`embedded_hal::i2c::I2c`] implementation
//! and owns the bus handle for its lifetime. All operations are blocking
//! single-register transactions; multi-step operations are not atomic, so a
//! multi-threaded host must serialize whole calls into the driver.
//!
//! Staged register values only take effect once the matching update latch
//! is struck; the pattern entry points handle the latching for you.

pub mod channel;
pub mod encode;
mod error;
pub mod registers;

mod driver;
mod pattern;
mod status;

pub use channel::{Channel, OperatingMode, Scope};
pub use driver::{DEFAULT_ADDRESS, Is31fl3197};
pub use encode::{GammaCurve, Repeat};
pub use error::Error;
pub use pattern::{ColorSlot, HoldTimeSelection, PatternConfig, PatternState};
pub use status::{PatternStatus, StatusMonitor};

pub use embassy_time::{Duration, Instant};

/// Color triple used for the pattern color table and grouped control.
pub type Rgb = smart_leds::RGB8;
