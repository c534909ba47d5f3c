//! Built-in sender
//! If you want to drive the controller through something other than plain GPIO,
//! you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::command::Command;

mod parallel_sender;

pub use parallel_sender::{EnableTiming, ParallelSender};

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
pub trait SendCommand<Delayer: DelayNs> {
    /// Error raised by the underlying bus
    type Error;

    /// Put the control lines into their idle level, before the first transfer
    ///
    /// Note:
    /// If a driver has nothing to prepare, just silently bypass it
    fn idle(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Frame a [`Command`] onto the bus, return once the controller latched it
    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
    ) -> Result<(), Self::Error>;

    /// Wait specific duration, and send command
    fn delay_and_send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        delayer.delay_us(delay_us);
        self.send(command, delayer)
    }

    /// Send command, then wait specific duration for a slow instruction to finish
    fn send_and_delay(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        self.send(command, delayer)?;
        delayer.delay_us(delay_us);
        Ok(())
    }
}
