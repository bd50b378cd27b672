//! Pattern execution status: one-shot reads and a time-bounded change
//! monitor.

use embassy_time::{Duration, Instant};
use embedded_hal::i2c::I2c;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::driver::Is31fl3197;
use crate::error::Error;
use crate::pattern::ColorSlot;
use crate::registers as reg;

/// Decoded contents of the pattern state register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStatus {
    /// Color slot currently rendered, if any.
    pub active_slot: Option<ColorSlot>,
    /// Timing phase the engine is in (TS0..TS7).
    pub phase: u8,
}

impl PatternStatus {
    /// Decode one raw status byte.
    ///
    /// The slot bits (6..4) are at-most-one-hot in practice; should several
    /// be set, the highest slot wins. The phase sits in bits 2..0.
    pub const fn from_raw(raw: u8) -> Self {
        let active_slot = if raw & 0b0100_0000 != 0 {
            Some(ColorSlot::Three)
        } else if raw & 0b0010_0000 != 0 {
            Some(ColorSlot::Two)
        } else if raw & 0b0001_0000 != 0 {
            Some(ColorSlot::One)
        } else {
            None
        };
        Self {
            active_slot,
            phase: raw & 0b0000_0111,
        }
    }
}

impl<I2C: I2c> Is31fl3197<I2C> {
    /// Read and decode the pattern state register once.
    pub fn read_status(&mut self) -> Result<PatternStatus, Error<I2C::Error>> {
        Ok(PatternStatus::from_raw(self.read_register(reg::PATTERN_STATE)?))
    }

    /// Poll the pattern state for `duration`, yielding decoded changes.
    ///
    /// A diagnostic stream, not a control path: use it to familiarize
    /// yourself with the pattern generator or to debug a configuration.
    /// Dropping the monitor and calling this again restarts a fresh window.
    pub fn monitor(&mut self, duration: Duration) -> StatusMonitor<'_, I2C> {
        StatusMonitor {
            driver: self,
            deadline: Instant::now() + duration,
            previous: None,
        }
    }
}

/// Time-bounded status poller returned by [`Is31fl3197::monitor`].
///
/// Polls as fast as the bus allows and reports each decoded change from the
/// previous poll (the first poll always reports). The window ends at the
/// deadline only; callers needing earlier cancellation should stop calling
/// [`Self::next_change`].
pub struct StatusMonitor<'d, I2C> {
    driver: &'d mut Is31fl3197<I2C>,
    deadline: Instant,
    previous: Option<PatternStatus>,
}

impl<I2C: I2c> StatusMonitor<'_, I2C> {
    /// Block until the decoded status changes or the deadline passes.
    ///
    /// Returns `Ok(None)` once the deadline has passed.
    pub fn next_change(&mut self) -> Result<Option<PatternStatus>, Error<I2C::Error>> {
        while Instant::now() < self.deadline {
            let status = self.driver.read_status()?;
            if self.previous != Some(status) {
                self.previous = Some(status);
                #[cfg(feature = "esp32-log")]
                println!("pattern slot {:?} phase TS{}", status.active_slot, status.phase);
                return Ok(Some(status));
            }
        }
        Ok(None)
    }

    /// Collect change events until the deadline passes or `N` are gathered.
    pub fn collect<const N: usize>(
        &mut self,
    ) -> Result<heapless::Vec<PatternStatus, N>, Error<I2C::Error>> {
        let mut events = heapless::Vec::new();
        while let Some(status) = self.next_change()? {
            if events.push(status).is_err() {
                break;
            }
        }
        Ok(events)
    }
}
