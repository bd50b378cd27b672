//! Pure encoders from humanized parameters to chip bitfield codes.
//!
//! Every encoder is total over its documented domain and performs no bus
//! traffic; out-of-domain values fail with
//! [`Error::InvalidParameter`](crate::Error::InvalidParameter).

use libm::fabsf;

use crate::error::Error;

/// The hardware timing steps in seconds, indexed by their 4-bit code.
pub const TIME_STEPS: [f32; 16] = [
    0.03, 0.13, 0.26, 0.38, 0.51, 0.77, 1.04, 1.60, 2.10, 2.60, 3.10, 4.20, 5.20, 6.20, 7.30, 8.30,
];

/// A repeat count for pattern looping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Run the given number of times.
    Times(u8),
    /// Loop until stopped; encodes to 0 in every loop register.
    Endless,
}

/// Gamma correction curve applied to the whole pattern, not per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GammaCurve {
    /// Gamma 2.4.
    #[default]
    Gamma2_4,
    /// Gamma 3.5.
    Gamma3_5,
    /// No correction.
    Linear,
}

impl GammaCurve {
    /// The 2-bit register code for this curve.
    pub const fn code(self) -> u8 {
        match self {
            Self::Gamma2_4 => 0b00,
            Self::Gamma3_5 => 0b01,
            Self::Linear => 0b11,
        }
    }

    /// Parse the humanized curve names used by the chip documentation.
    pub fn parse_from_str(name: &str) -> Option<Self> {
        match name {
            "2.4" => Some(Self::Gamma2_4),
            "3.5" => Some(Self::Gamma3_5),
            "linear" => Some(Self::Linear),
            _ => None,
        }
    }

    /// Humanized name of this curve.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gamma2_4 => "2.4",
            Self::Gamma3_5 => "3.5",
            Self::Linear => "linear",
        }
    }
}

/// Quantize a duration in seconds to the chip's 4-bit timing code.
///
/// Accepts any value in `0.0..=10.0` and maps it to the nearest entry of
/// [`TIME_STEPS`]. On an exact tie the earlier (shorter) step wins; the
/// datasheet does not specify a tie-break, so verify against hardware if the
/// distinction matters.
pub fn encode_time<E>(seconds: f32) -> Result<u8, Error<E>> {
    if !(0.0..=10.0).contains(&seconds) {
        return Err(Error::InvalidParameter);
    }
    let mut code = 0;
    let mut best = fabsf(TIME_STEPS[0] - seconds);
    for (index, step) in TIME_STEPS.iter().enumerate().skip(1) {
        let distance = fabsf(step - seconds);
        if distance < best {
            best = distance;
            code = index as u8;
        }
    }
    Ok(code)
}

/// Encode a color slot cycle count (1..=3 or endless) to its 2-bit code.
pub fn encode_color_cycles<E>(repeat: Repeat) -> Result<u8, Error<E>> {
    match repeat {
        Repeat::Times(count) if (1..=3).contains(&count) => Ok(count),
        Repeat::Endless => Ok(0),
        Repeat::Times(_) => Err(Error::InvalidParameter),
    }
}

/// Encode a multi-pulse loop count (1..=15 or endless) to its 4-bit code.
pub fn encode_multi_pulse_loops<E>(repeat: Repeat) -> Result<u8, Error<E>> {
    match repeat {
        Repeat::Times(count) if (1..=15).contains(&count) => Ok(count),
        Repeat::Endless => Ok(0),
        Repeat::Times(_) => Err(Error::InvalidParameter),
    }
}

/// Encode a pattern loop count (1..=64 or endless) to its 7-bit code.
pub fn encode_pattern_loops<E>(repeat: Repeat) -> Result<u8, Error<E>> {
    match repeat {
        Repeat::Times(count) if (1..=64).contains(&count) => Ok(count),
        Repeat::Endless => Ok(0),
        Repeat::Times(_) => Err(Error::InvalidParameter),
    }
}
