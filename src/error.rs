//! Errors returned by [`Lcd`](crate::lcd::Lcd)

/// Errors that can occur when driving the LCD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The sender failed to drive the bus, usually a pin error
    Bus(E),
    /// An operation was called before [`Lcd::init()`](crate::lcd::Lcd::init) completed
    NotInitialized,
}

impl<E> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(_) => f.write_str("bus error"),
            Error::NotInitialized => f.write_str("LCD is not initialized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Bus(_e) => defmt::write!(fmt, "bus error"),
            Error::NotInitialized => defmt::write!(fmt, "LCD is not initialized"),
        }
    }
}
