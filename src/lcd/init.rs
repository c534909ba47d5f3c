use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, DataWidth, Font, MoveDirection, ShiftType, State},
    error::Error,
    lcd::{InitState, Lcd},
    sender::SendCommand,
};

/// Delays of the slow steps, all values are minimums the driver waits for.
///
/// Defaults follow the datasheet with some margin: 40 ms after power rises,
/// 4.1 ms / 4.1 ms / 100 us between the reset nibbles, 1.52 ms for clear and home.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// wait before the first transfer, for the supply to settle
    pub power_on_delay_ms: u32,
    /// wait after each of the three `0x3` reset nibbles
    pub reset_delays_us: [u32; 3],
    #[allow(missing_docs)]
    pub clear_delay_us: u32,
    #[allow(missing_docs)]
    pub home_delay_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            power_on_delay_ms: 50,
            reset_delays_us: [4_500, 4_500, 150],
            clear_delay_us: 2_000,
            home_delay_us: 2_000,
        }
    }
}

/// [`Config`] is the init config of a [`Lcd`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    columns: u8,
    rows: u8,
    font: Font,
    timing: Timing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 2,
            font: Font::Font5x8,
            timing: Timing::default(),
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_columns(&self) -> u8 {
        self.columns
    }

    pub fn set_columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    pub fn get_rows(&self) -> u8 {
        self.rows
    }

    /// 1 to 4 rows, other values are clamped at init
    pub fn set_rows(mut self, rows: u8) -> Self {
        self.rows = rows;
        self
    }

    pub fn get_font(&self) -> Font {
        self.font
    }

    /// [`Font::Font5x10`] only takes effect on one row displays
    pub fn set_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn get_timing(&self) -> Timing {
        self.timing
    }

    pub fn set_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Shortcut for [`Lcd::init()`] with default timing
    pub fn begin(
        &mut self,
        columns: u8,
        rows: u8,
        font: Font,
    ) -> Result<(), Error<Sender::Error>> {
        self.init(
            Config::default()
                .set_columns(columns)
                .set_rows(rows)
                .set_font(font),
        )
    }

    /// Bring the controller from an unknown state into 4 bit mode, display on, cursor off,
    /// left to right, and clear it.
    ///
    /// Resetting the MCU doesn't reset the display, so this always runs the full
    /// "initializing by instruction" sequence from the datasheet. Calling it again is safe.
    pub fn init(&mut self, config: Config) -> Result<(), Error<Sender::Error>> {
        log::debug!(
            "initializing {}x{} display",
            config.get_columns(),
            config.get_rows()
        );

        self.state.set_init_state(InitState::Initializing);
        self.state
            .configure(config.get_columns(), config.get_rows(), config.get_font());
        self.timing = config.get_timing();

        self.delayer.delay_ms(self.timing.power_on_delay_ms);

        self.sender.idle().map_err(Error::Bus)?;

        // the controller may be in 8 bit mode, or halfway through a 4 bit transfer,
        // three 0x3 nibbles bring it into 8 bit mode whatever it was doing
        for delay_us in self.timing.reset_delays_us {
            self.send_and_delay(CommandSet::HalfFunctionSet(DataWidth::Bit8), delay_us)?;
        }

        // from now on every byte goes as two nibbles
        self.send(CommandSet::HalfFunctionSet(DataWidth::Bit4))?;

        self.send(CommandSet::FunctionSet(
            DataWidth::Bit4,
            self.state.get_line_mode(),
            self.state.get_font(),
        ))?;

        self.state.set_display_state(State::On);
        self.state.set_cursor_state(State::Off);
        self.state.set_cursor_blink(State::Off);
        self.send_display_control()?;

        self.send_and_delay(CommandSet::ClearDisplay, self.timing.clear_delay_us)?;

        self.state.set_direction(MoveDirection::LeftToRight);
        self.state.set_shift_type(ShiftType::CursorOnly);
        self.send_entry_mode()?;

        self.state.set_init_state(InitState::Ready);
        log::debug!("display ready");

        Ok(())
    }
}
