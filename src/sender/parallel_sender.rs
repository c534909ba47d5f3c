use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    command::{Bits, Command, RegisterSelection},
    sender::SendCommand,
    utils::{BitOps, BitState},
};

/// Delays around one pulse of the EN line
///
/// Defaults are rounded up from the datasheet: EN high for at least 450 ns,
/// and most instructions finish within 37 us.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnableTiming {
    /// EN low, before rising edge
    pub setup_ns: u32,
    /// EN high
    pub pulse_ns: u32,
    /// after falling edge, for the controller to execute the transfer
    pub execution_us: u32,
}

impl Default for EnableTiming {
    fn default() -> Self {
        Self {
            setup_ns: 1_000,
            pulse_ns: 1_000,
            execution_us: 100,
        }
    }
}

/// Write-only 4 pin parallel sender, R/W line is expected to be tied low
pub struct ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
{
    rs_pin: ControlPin,
    en_pin: ControlPin,
    db_pins: [DBPin; 4],
    timing: EnableTiming,
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
{
    /// Create a sender from RS, EN and DB4~DB7
    pub fn new_4pin(
        rs: ControlPin,
        en: ControlPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            en_pin: en,
            db_pins: [db4, db5, db6, db7],
            timing: EnableTiming::default(),
        }
    }

    #[allow(missing_docs)]
    pub fn get_enable_timing(&self) -> EnableTiming {
        self.timing
    }

    #[allow(missing_docs)]
    pub fn set_enable_timing(&mut self, timing: EnableTiming) {
        self.timing = timing;
    }

    /// Select a register, then transfer `value` high nibble first
    pub fn send_byte(
        &mut self,
        value: u8,
        rs: RegisterSelection,
        delayer: &mut impl DelayNs,
    ) -> Result<(), ControlPin::Error> {
        log::trace!("sending {:08b}, rs: {:?}", value, rs);

        self.select_register(rs)?;
        self.send_nibble(value >> 4, delayer)?;
        self.send_nibble(value & 0b1111, delayer)
    }

    /// Put the lower 4 bits of `nibble` on DB4~DB7 and latch them
    pub fn send_nibble(
        &mut self,
        nibble: u8,
        delayer: &mut impl DelayNs,
    ) -> Result<(), ControlPin::Error> {
        self.push_bits(nibble)?;
        self.pulse_enable(delayer)
    }

    fn select_register(&mut self, rs: RegisterSelection) -> Result<(), ControlPin::Error> {
        match rs {
            RegisterSelection::Command => self.rs_pin.set_low(),
            RegisterSelection::Data => self.rs_pin.set_high(),
        }
    }

    // bit 0 goes to DB4, bit 3 goes to DB7
    fn push_bits(&mut self, raw_bits: u8) -> Result<(), ControlPin::Error> {
        for (index, pin) in self.db_pins.iter_mut().enumerate() {
            match raw_bits.check_bit(index as u8) {
                BitState::Set => pin.set_high()?,
                BitState::Clear => pin.set_low()?,
            }
        }
        Ok(())
    }

    fn pulse_enable(&mut self, delayer: &mut impl DelayNs) -> Result<(), ControlPin::Error> {
        self.en_pin.set_low()?;
        delayer.delay_ns(self.timing.setup_ns);
        self.en_pin.set_high()?;
        delayer.delay_ns(self.timing.pulse_ns);
        self.en_pin.set_low()?;
        delayer.delay_us(self.timing.execution_us);
        Ok(())
    }
}

impl<ControlPin, DBPin, Delayer> SendCommand<Delayer> for ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
    Delayer: DelayNs,
{
    type Error = ControlPin::Error;

    fn idle(&mut self) -> Result<(), Self::Error> {
        self.rs_pin.set_low()?;
        self.en_pin.set_low()
    }

    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
    ) -> Result<(), Self::Error> {
        let command = command.into();

        match command.get_data() {
            Bits::Bit4(raw_bits) => {
                log::trace!("sending nibble {:04b}", raw_bits);
                self.select_register(command.get_register_selection())?;
                self.send_nibble(raw_bits, delayer)
            }
            Bits::Bit8(raw_bits) => {
                self.send_byte(raw_bits, command.get_register_selection(), delayer)
            }
        }
    }
}
