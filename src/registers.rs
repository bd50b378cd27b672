//! Register map of the IS31FL3197.
//!
//! Register table: <https://www.lumissil.com/assets/pdf/core/IS31FL3197_DS.pdf>
//!
//! The packed per-channel registers ([`OP_MODE`], [`CURRENT_BAND`]) hold one
//! 2-bit field per channel, red in the lowest bits; the field offsets live on
//! [`Channel`](crate::Channel). Staged values written to the intensity, PWM
//! and pattern registers only take effect once the matching update latch is
//! struck with [`UPDATE_KEY`].

/// Shutdown and output-enable control.
pub const SHUTDOWN_CTRL: u8 = 0x01;

/// Per-channel operating mode, 2 bits per channel.
pub const OP_MODE: u8 = 0x02;

/// Per-channel current-limit band, 2 bits per channel, 25% steps.
pub const CURRENT_BAND: u8 = 0x05;

/// Hold-time selection (bit 0) and hold-time function enable (bit 1).
pub const HOLD_TIME: u8 = 0x06;

/// Output current phase delay (bit 0). Function not described by the
/// datasheet.
pub const PHASE_DELAY: u8 = 0x07;

/// Pattern execution state, read-only.
pub const PATTERN_STATE: u8 = 0x0F;

/// First intensity register; R/G/B/W at 0x10..=0x13. Doubles as the base of
/// pattern color table slot 1.
pub const INTENSITY_BASE: u8 = 0x10;

/// PWM duty cycle low byte of the red channel; low/high pairs for R/G/B/W
/// occupy 0x1A..=0x21.
pub const PWM_BASE: u8 = 0x1A;

/// Pattern start time (low nibble) and rise time (high nibble).
pub const PATTERN_TIME_START_RISE: u8 = 0x22;

/// Pattern hold time (low nibble) and fall time (high nibble).
pub const PATTERN_TIME_HOLD_FALL: u8 = 0x23;

/// Pattern off time (low nibble) and between-pulse time (high nibble).
pub const PATTERN_TIME_OFF_BETWEEN: u8 = 0x24;

/// Per-slot crossfade enable, bits 2..0.
pub const CROSSFADE_ENABLE: u8 = 0x25;

/// Crossfade time, 4-bit timing code.
pub const CROSSFADE_TIME: u8 = 0x26;

/// Per-slot color enable, bits 2..0.
pub const COLOR_ENABLE: u8 = 0x27;

/// Per-slot color cycle counts: slot 3 in bits 5:4, slot 2 in 3:2,
/// slot 1 in 1:0.
pub const COLOR_CYCLES: u8 = 0x28;

/// Multi-pulse loop count (bits 7:4) and gamma curve (bits 3:2).
pub const MULTI_PULSE_GAMMA: u8 = 0x29;

/// Times-16 multiplier flag (bit 7) and pattern loop count (bits 6:0).
pub const PATTERN_LOOPS: u8 = 0x2A;

/// Color update latch; write [`UPDATE_KEY`] to commit staged color and
/// intensity values.
pub const COLOR_UPDATE: u8 = 0x2B;

/// PWM update latch; write [`UPDATE_KEY`] to commit staged duty cycles.
pub const PWM_UPDATE: u8 = 0x2C;

/// Pattern timing update latch; write [`UPDATE_KEY`] to commit staged
/// pattern timing.
pub const PATTERN_TIME_UPDATE: u8 = 0x2D;

/// Soft reset; write [`RESET_KEY`] to restore register defaults.
pub const RESET: u8 = 0x3F;

/// Sentinel byte accepted by the three update latches.
pub const UPDATE_KEY: u8 = 0xC5;

/// Sentinel byte accepted by the reset register.
pub const RESET_KEY: u8 = 0xC5;

/// [`SHUTDOWN_CTRL`] value enabling all outputs in normal operation.
pub const OUTPUT_ENABLE_ALL: u8 = 0xF1;
