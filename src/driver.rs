//! The chip handle and its direct (non-pattern) control surface.

use embedded_hal::i2c::I2c;

use crate::Rgb;
use crate::channel::{Channel, OperatingMode, Scope};
use crate::error::Error;
use crate::pattern::PatternState;
use crate::registers as reg;

/// Bus address of the chip on the Arduino Giga display shield.
pub const DEFAULT_ADDRESS: u8 = 0x50;

/// Maximum 12-bit PWM duty cycle.
const PWM_MAX: u16 = 4095;

/// Driver handle for one IS31FL3197.
///
/// Owns the bus for its lifetime; wrap the bus in a shared-bus adapter
/// before constructing the driver if other devices sit on the same lines.
///
/// The chip allows every channel to be in any mode at any time. This driver
/// assumes one of three usage layers instead: the grouped color and pattern
/// operations preset the mode of every channel in their scope, overwriting
/// individual settings, while per-channel operations retouch one channel at
/// a time. Individual overrides therefore only make sense *after* a grouped
/// call, never as a way to restore a previous per-channel mode.
///
/// # Examples
/// ```ignore
/// let mut chip = Is31fl3197::new(i2c);
/// chip.init()?;
///
/// // Direct color, full duty and current band.
/// chip.set_color(Rgb::new(255, 64, 0))?;
///
/// // A red/green/blue loop the chip runs on its own.
/// chip.configure_pattern(&PatternConfig {
///     rise_time: 1.0,
///     fall_time: 1.0,
///     colors: [
///         Some(Rgb::new(255, 0, 0)),
///         Some(Rgb::new(0, 255, 0)),
///         Some(Rgb::new(0, 0, 255)),
///     ],
///     activate: true,
///     ..PatternConfig::default()
/// })?;
/// ```
pub struct Is31fl3197<I2C> {
    i2c: I2C,
    address: u8,
    /// Shadow of the last commanded intensity per channel, for [`Self::dim`].
    intensity: [u8; 4],
    pub(crate) pattern_state: PatternState,
}

impl<I2C: I2c> Is31fl3197<I2C> {
    /// Create a driver at the shield's default address (0x50).
    ///
    /// No bus traffic happens until [`Self::init`] or the first operation.
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver at a custom bus address.
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            intensity: [0; 4],
            pattern_state: PatternState::Idle,
        }
    }

    /// Probe the chip and reset it to a known state.
    ///
    /// A chip that does not answer the probe read fails with
    /// [`Error::DeviceNotFound`].
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        let mut probe = [0];
        self.i2c
            .write_read(self.address, &[reg::PATTERN_STATE], &mut probe)
            .map_err(|_| Error::DeviceNotFound)?;
        self.reset()
    }

    /// Soft-reset the chip, then enable all outputs in normal operation.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_register(reg::RESET, reg::RESET_KEY)?;
        self.write_register(reg::SHUTDOWN_CTRL, reg::OUTPUT_ENABLE_ALL)
    }

    /// Release the bus handle.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub(crate) fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, &[register, value])?;
        Ok(())
    }

    pub(crate) fn read_register(&mut self, register: u8) -> Result<u8, Error<I2C::Error>> {
        let mut value = [0];
        self.i2c.write_read(self.address, &[register], &mut value)?;
        Ok(value[0])
    }

    /// Read-modify-write: clear the bits in `mask`, OR in `value`.
    ///
    /// Not atomic beyond the two bus transactions; see the crate docs on
    /// serialization.
    pub(crate) fn update_register(
        &mut self,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let current = self.read_register(register)?;
        self.write_register(register, (current & !mask) | value)
    }

    /// Set the operating mode of every channel in `scope`.
    ///
    /// Channels outside the scope keep their mode bits untouched. Pattern
    /// mode is undefined for the white channel and fails with
    /// [`Error::UnsupportedOperation`] before any bus traffic.
    pub fn set_mode(&mut self, mode: OperatingMode, scope: Scope) -> Result<(), Error<I2C::Error>> {
        if mode == OperatingMode::Pattern && scope.contains(Channel::White) {
            return Err(Error::UnsupportedOperation);
        }
        let (mask, value) = packed_fields(scope, mode.code());
        self.update_register(reg::OP_MODE, mask, value)
    }

    /// Set the current-limit band (1..=4, i.e. 25% to 100%) for every
    /// channel in `scope`.
    pub fn set_current_band(&mut self, scope: Scope, band: u8) -> Result<(), Error<I2C::Error>> {
        if !(1..=4).contains(&band) {
            return Err(Error::InvalidParameter);
        }
        let (mask, value) = packed_fields(scope, band - 1);
        self.update_register(reg::CURRENT_BAND, mask, value)
    }

    /// Set the drive intensity of every channel in `scope` and latch it.
    pub fn set_intensity(&mut self, scope: Scope, intensity: u8) -> Result<(), Error<I2C::Error>> {
        for channel in Channel::ALL {
            if scope.contains(channel) {
                self.write_register(reg::INTENSITY_BASE + channel.index() as u8, intensity)?;
                self.intensity[channel.index()] = intensity;
            }
        }
        self.write_register(reg::COLOR_UPDATE, reg::UPDATE_KEY)
    }

    /// Set the 12-bit PWM duty cycle (0..=4095) of every channel in `scope`
    /// and latch it.
    pub fn set_pwm(&mut self, scope: Scope, duty_cycle: u16) -> Result<(), Error<I2C::Error>> {
        if duty_cycle > PWM_MAX {
            return Err(Error::InvalidParameter);
        }
        let high = (duty_cycle >> 8) as u8;
        let low = (duty_cycle & 0xFF) as u8;
        for channel in Channel::ALL {
            if scope.contains(channel) {
                let base = reg::PWM_BASE + 2 * channel.index() as u8;
                // High byte first, matching the chip's staging expectations.
                self.write_register(base + 1, high)?;
                self.write_register(base, low)?;
            }
        }
        self.write_register(reg::PWM_UPDATE, reg::UPDATE_KEY)
    }

    /// Drive every channel in `scope` fully on: intensity 255, full duty,
    /// full current band.
    pub fn led_on(&mut self, scope: Scope) -> Result<(), Error<I2C::Error>> {
        self.config_led(scope, 255, PWM_MAX, 4)
    }

    /// Turn every channel in `scope` fully off: intensity 0, zero duty,
    /// lowest current band.
    pub fn led_off(&mut self, scope: Scope) -> Result<(), Error<I2C::Error>> {
        self.config_led(scope, 0, 0, 1)
    }

    /// Scale the last commanded intensity of every channel in `scope` to
    /// `percent` (0..=100) of its current value.
    ///
    /// Repeated calls compound: two `dim(scope, 50)` calls leave 25%.
    pub fn dim(&mut self, scope: Scope, percent: u8) -> Result<(), Error<I2C::Error>> {
        if percent > 100 {
            return Err(Error::InvalidParameter);
        }
        for channel in Channel::ALL {
            if scope.contains(channel) {
                let scaled = (u16::from(self.intensity[channel.index()]) * u16::from(percent) / 100) as u8;
                self.write_register(reg::INTENSITY_BASE + channel.index() as u8, scaled)?;
                self.intensity[channel.index()] = scaled;
            }
        }
        self.write_register(reg::COLOR_UPDATE, reg::UPDATE_KEY)
    }

    /// Show a color on the three color channels, at full duty and full
    /// current band.
    ///
    /// Presets PWM/current-limit mode on all three channels, overwriting any
    /// individual mode settings.
    pub fn set_color(&mut self, color: Rgb) -> Result<(), Error<I2C::Error>> {
        self.config_color(color, PWM_MAX, 4)
    }

    /// Turn the three color channels off: black, zero duty, lowest band.
    pub fn color_off(&mut self) -> Result<(), Error<I2C::Error>> {
        self.config_color(Rgb::new(0, 0, 0), 0, 1)
    }

    /// Select the output current phase delay mode (register bit the
    /// datasheet does not explain further). Untested.
    pub fn set_phase_delay(&mut self, delayed: bool) -> Result<(), Error<I2C::Error>> {
        self.update_register(reg::PHASE_DELAY, 0b0000_0001, u8::from(delayed))
    }

    /// Mode, intensity, duty and band in one go, per channel.
    fn config_led(
        &mut self,
        scope: Scope,
        intensity: u8,
        duty_cycle: u16,
        band: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.set_mode(OperatingMode::PwmCurrentLimit, scope)?;
        self.set_intensity(scope, intensity)?;
        self.set_pwm(scope, duty_cycle)?;
        self.set_current_band(scope, band)
    }

    fn config_color(
        &mut self,
        color: Rgb,
        duty_cycle: u16,
        band: u8,
    ) -> Result<(), Error<I2C::Error>> {
        for (channel, value) in [
            (Channel::Red, color.r),
            (Channel::Green, color.g),
            (Channel::Blue, color.b),
        ] {
            self.config_led(Scope::single(channel), value, duty_cycle, band)?;
        }
        Ok(())
    }
}

/// Mask and value covering the 2-bit field of every channel in `scope`.
const fn packed_fields(scope: Scope, code: u8) -> (u8, u8) {
    let mut mask = 0;
    let mut value = 0;
    let mut index = 0;
    while index < Channel::ALL.len() {
        let channel = Channel::ALL[index];
        if scope.contains(channel) {
            mask |= 0b11 << channel.field_shift();
            value |= code << channel.field_shift();
        }
        index += 1;
    }
    (mask, value)
}
