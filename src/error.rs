//! Driver error types.

/// Errors reported by the driver.
///
/// `E` is the error type of the underlying bus implementation. Errors are
/// fatal to the in-flight call only; the driver stays usable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A parameter lies outside its documented domain.
    InvalidParameter,
    /// The requested mode/channel combination is undefined for the chip.
    UnsupportedOperation,
    /// A bus transaction failed.
    Bus(E),
    /// The chip did not answer at the expected address during `init`.
    DeviceNotFound,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Bus(err)
    }
}
