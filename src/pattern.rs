//! The autonomous pattern engine: configuration, lifecycle and the
//! dual-latch commit protocol.
//!
//! The chip buffers color-table and pattern-timing writes separately; each
//! set only takes effect once its update latch is struck. A pattern is
//! observably running only after *both* latches have been struck since the
//! last register change, which is what [`Is31fl3197::start_pattern`] does.

use embedded_hal::i2c::I2c;

use crate::Rgb;
use crate::channel::{OperatingMode, Scope};
use crate::driver::Is31fl3197;
use crate::encode::{
    GammaCurve, Repeat, encode_color_cycles, encode_multi_pulse_loops, encode_pattern_loops,
    encode_time,
};
use crate::error::Error;
use crate::registers as reg;

/// One of the three color table slots of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    One,
    Two,
    Three,
}

impl ColorSlot {
    /// All slots, in pattern order.
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// Position of this slot's enable/cycle bits.
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
        }
    }

    /// Offset of this slot's color bytes from the intensity base register.
    ///
    /// Slot 2 starts at +4, not +3: the byte in between belongs to the
    /// unpopulated white channel.
    const fn table_offset(self) -> u8 {
        match self {
            Self::One => 0,
            Self::Two => 4,
            Self::Three => 7,
        }
    }
}

/// Which timing phase the engine parks in when the hold-time function is
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldTimeSelection {
    /// Hold in phase T2 (the on-hold phase).
    T2,
    /// Hold in phase T4 (the off phase).
    #[default]
    T4,
}

impl HoldTimeSelection {
    const fn code(self) -> u8 {
        match self {
            Self::T4 => 0b0,
            Self::T2 => 0b1,
        }
    }
}

/// Lifecycle of the pattern engine as seen by this driver.
///
/// Tracked for diagnostics only; the chip itself accepts any operation in
/// any state and simply runs whatever was last latched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternState {
    /// Nothing staged since construction.
    #[default]
    Idle,
    /// A configuration has been staged but not started.
    Configured,
    /// The engine drives the color channels.
    Running,
    /// Stopped with all staged registers intact; starting resumes.
    Stopped,
}

/// Everything one pattern run needs.
///
/// Times are in seconds, anywhere in `0.0..=10.0`, and quantize to the
/// nearest hardware step (see [`encode_time`]). The defaults mirror the
/// chip's reset values: minimal times, no crossfade, gamma 2.4, every loop
/// count 1, no colors, no activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternConfig {
    /// Delay before the first pulse.
    pub start_time: f32,
    /// Ramp-up time of each pulse.
    pub rise_time: f32,
    /// On-hold time of each pulse.
    pub hold_time: f32,
    /// Ramp-down time of each pulse.
    pub fall_time: f32,
    /// Gap between pulses of a multi-pulse group.
    pub between_time: f32,
    /// Off time at the end of each pattern period.
    pub off_time: f32,
    /// Crossfade time between color slots.
    pub crossfade_time: f32,
    /// Crossfade between slots instead of switching hard. Only slots that
    /// have a color get their crossfade bit.
    pub crossfade: bool,
    /// Gamma curve for the whole pattern.
    pub gamma: GammaCurve,
    /// Repeat count per color slot, 1..=3 or endless.
    pub cycles: [Repeat; 3],
    /// Pulses per multi-pulse group, 1..=15 or endless.
    pub multi_pulse_loops: Repeat,
    /// Whole-pattern repeats, 1..=64 or endless.
    pub pattern_loops: Repeat,
    /// Multiply `pattern_loops` by 16 (up to 1024 effective loops).
    pub times16: bool,
    /// Phase the hold-time function parks in.
    pub hold_time_selection: HoldTimeSelection,
    /// Enable the hold-time function.
    pub hold_time_function: bool,
    /// Color table entries; a slot is part of the pattern iff it has a
    /// color.
    pub colors: [Option<Rgb>; 3],
    /// Start the pattern right after staging.
    pub activate: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            rise_time: 0.0,
            hold_time: 0.0,
            fall_time: 0.0,
            between_time: 0.0,
            off_time: 0.0,
            crossfade_time: 0.0,
            crossfade: false,
            gamma: GammaCurve::default(),
            cycles: [Repeat::Times(1); 3],
            multi_pulse_loops: Repeat::Times(1),
            pattern_loops: Repeat::Times(1),
            times16: false,
            hold_time_selection: HoldTimeSelection::default(),
            hold_time_function: false,
            colors: [None; 3],
            activate: false,
        }
    }
}

impl<I2C: I2c> Is31fl3197<I2C> {
    /// Stage a full pattern configuration, in register address order.
    ///
    /// An encoder failure aborts before the failing register is written;
    /// registers staged by earlier steps keep their new values. Callers
    /// needing all-or-nothing configuration must snapshot and restore the
    /// registers themselves.
    pub fn configure_pattern(&mut self, config: &PatternConfig) -> Result<(), Error<I2C::Error>> {
        let start = encode_time::<I2C::Error>(config.start_time)?;
        let rise = encode_time::<I2C::Error>(config.rise_time)?;
        self.write_register(reg::PATTERN_TIME_START_RISE, (rise << 4) | start)?;

        let hold = encode_time::<I2C::Error>(config.hold_time)?;
        let fall = encode_time::<I2C::Error>(config.fall_time)?;
        self.write_register(reg::PATTERN_TIME_HOLD_FALL, (fall << 4) | hold)?;

        let off = encode_time::<I2C::Error>(config.off_time)?;
        let between = encode_time::<I2C::Error>(config.between_time)?;
        self.write_register(reg::PATTERN_TIME_OFF_BETWEEN, (between << 4) | off)?;

        // A slot crossfades only when crossfading is requested AND the slot
        // has a color; the two enable fields are otherwise independent.
        let mut crossfade_bits = 0;
        if config.crossfade {
            crossfade_bits = slot_bits(&config.colors);
        }
        self.write_register(reg::CROSSFADE_ENABLE, crossfade_bits)?;

        let crossfade_time = encode_time::<I2C::Error>(config.crossfade_time)?;
        self.write_register(reg::CROSSFADE_TIME, crossfade_time)?;

        self.write_register(reg::COLOR_ENABLE, slot_bits(&config.colors))?;

        let cycles_1 = encode_color_cycles::<I2C::Error>(config.cycles[0])?;
        let cycles_2 = encode_color_cycles::<I2C::Error>(config.cycles[1])?;
        let cycles_3 = encode_color_cycles::<I2C::Error>(config.cycles[2])?;
        self.write_register(reg::COLOR_CYCLES, (cycles_3 << 4) | (cycles_2 << 2) | cycles_1)?;

        let multi_pulse = encode_multi_pulse_loops::<I2C::Error>(config.multi_pulse_loops)?;
        self.write_register(
            reg::MULTI_PULSE_GAMMA,
            (multi_pulse << 4) | (config.gamma.code() << 2),
        )?;

        let pattern_loops = encode_pattern_loops::<I2C::Error>(config.pattern_loops)?;
        self.write_register(
            reg::PATTERN_LOOPS,
            (u8::from(config.times16) << 7) | pattern_loops,
        )?;

        // Two independent round-trips, one bit each, matching the chip's
        // documented write sequence.
        self.update_register(reg::HOLD_TIME, 0b0000_0001, config.hold_time_selection.code())?;
        self.update_register(
            reg::HOLD_TIME,
            0b0000_0010,
            u8::from(config.hold_time_function) << 1,
        )?;

        for slot in ColorSlot::ALL {
            if let Some(color) = config.colors[slot.index()] {
                self.write_color_slot(slot, color)?;
            }
        }

        self.pattern_state = PatternState::Configured;
        if config.activate {
            self.start_pattern()?;
        }
        Ok(())
    }

    /// Start, or resume after [`Self::stop_pattern`], the staged pattern.
    ///
    /// Puts the three color channels in pattern mode, then strikes the
    /// color-update and pattern-timing-update latches. Both strikes are
    /// required; omitting either leaves the chip running stale values. The
    /// white channel is never touched.
    pub fn start_pattern(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mode(OperatingMode::Pattern, Scope::RGB)?;
        self.write_register(reg::COLOR_UPDATE, reg::UPDATE_KEY)?;
        self.write_register(reg::PATTERN_TIME_UPDATE, reg::UPDATE_KEY)?;
        self.pattern_state = PatternState::Running;
        Ok(())
    }

    /// Stop the pattern by handing the color channels back to PWM mode.
    ///
    /// No staged register is cleared, so a following
    /// [`Self::start_pattern`] resumes the identical pattern. Channels
    /// outside the RGB scope are not disturbed.
    pub fn stop_pattern(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mode(OperatingMode::PwmCurrentLimit, Scope::RGB)?;
        self.pattern_state = PatternState::Stopped;
        Ok(())
    }

    /// Set the current-limit band (1..=4) for the pattern's RGB scope.
    ///
    /// Allowed in any lifecycle state; does not transition the pattern.
    pub fn pattern_clb(&mut self, band: u8) -> Result<(), Error<I2C::Error>> {
        self.set_current_band(Scope::RGB, band)
    }

    /// Lifecycle state of the pattern engine as tracked by this driver.
    pub fn pattern_state(&self) -> PatternState {
        self.pattern_state
    }

    /// Write one color table slot, then strike the color-update latch.
    fn write_color_slot(&mut self, slot: ColorSlot, color: Rgb) -> Result<(), Error<I2C::Error>> {
        let base = reg::INTENSITY_BASE + slot.table_offset();
        self.write_register(base, color.r)?;
        self.write_register(base + 1, color.g)?;
        self.write_register(base + 2, color.b)?;
        self.write_register(reg::COLOR_UPDATE, reg::UPDATE_KEY)
    }
}

/// One bit per slot that has a color assigned, slot 1 in bit 0.
fn slot_bits(colors: &[Option<Rgb>; 3]) -> u8 {
    let mut bits = 0;
    for slot in ColorSlot::ALL {
        if colors[slot.index()].is_some() {
            bits |= 1 << slot.index();
        }
    }
    bits
}
