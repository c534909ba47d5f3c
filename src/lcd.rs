//! The [`Lcd`] driver and its high level API

use embedded_hal::delay::DelayNs;

use crate::{
    command::{Command, CommandSet, Font, LineMode, MoveDirection, RAMType, ShiftType, State},
    error::Error,
    sender::SendCommand,
    state::{LcdState, MAX_LINES},
};

mod init;
mod text;

pub use crate::state::InitState;
pub use init::{Config, Timing};

/// Driver of one HD44780 display
///
/// Create it with [`Lcd::new()`], then call [`Lcd::init()`] (or [`Lcd::begin()`])
/// before anything else, every other operation returns [`Error::NotInitialized`] until then.
pub struct Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    state: LcdState,
    timing: Timing,
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Wrap a sender and a delayer, without touching the hardware
    pub fn new(sender: &'a mut Sender, delayer: &'b mut Delayer) -> Self {
        Self {
            sender,
            delayer,
            state: LcdState::default(),
            timing: Timing::default(),
        }
    }

    fn ensure_ready(&self) -> Result<(), Error<Sender::Error>> {
        match self.state.get_init_state() {
            InitState::Ready => Ok(()),
            InitState::Uninitialized | InitState::Initializing => Err(Error::NotInitialized),
        }
    }

    fn send(&mut self, command: impl Into<Command>) -> Result<(), Error<Sender::Error>> {
        self.sender.send(command, self.delayer).map_err(Error::Bus)
    }

    fn send_and_delay(
        &mut self,
        command: impl Into<Command>,
        delay_us: u32,
    ) -> Result<(), Error<Sender::Error>> {
        self.sender
            .send_and_delay(command, self.delayer, delay_us)
            .map_err(Error::Bus)
    }

    fn send_display_control(&mut self) -> Result<(), Error<Sender::Error>> {
        self.send(CommandSet::DisplayOnOff {
            display: self.state.get_display_state(),
            cursor: self.state.get_cursor_state(),
            cursor_blink: self.state.get_cursor_blink(),
        })
    }

    fn send_entry_mode(&mut self) -> Result<(), Error<Sender::Error>> {
        self.send(CommandSet::EntryModeSet(
            self.state.get_direction(),
            self.state.get_shift_type(),
        ))
    }

    /// Send a raw instruction byte (RS low)
    pub fn command(&mut self, byte: u8) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.send(Command::command(byte))
    }

    /// Send a raw data byte (RS high) to the RAM the address counter points to
    pub fn write_byte(&mut self, byte: u8) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.send(CommandSet::WriteDataToRAM(byte))
    }

    /// Clear the display and move the cursor to the top left corner
    pub fn clear(&mut self) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_ram_type(RAMType::DDRam);
        self.send_and_delay(CommandSet::ClearDisplay, self.timing.clear_delay_us)
    }

    /// Move the cursor to the top left corner and undo any display shift, keep DDRAM content
    pub fn home(&mut self) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_ram_type(RAMType::DDRam);
        self.send_and_delay(CommandSet::ReturnHome, self.timing.home_delay_us)
    }

    /// Move the cursor to `(col, row)`.
    ///
    /// `row` past the last configured row is clamped to the last row,
    /// `col` is not checked, the controller wraps the address on its own.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_ram_type(RAMType::DDRam);

        let addr = self.state.ddram_addr(col, row);
        self.send(CommandSet::SetDDRAM(addr))
    }

    #[allow(missing_docs)]
    pub fn set_display_state(&mut self, display: State) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_display_state(display);
        self.send_display_control()
    }

    #[allow(missing_docs)]
    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    #[allow(missing_docs)]
    pub fn set_cursor_state(&mut self, cursor: State) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_cursor_state(cursor);
        self.send_display_control()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    #[allow(missing_docs)]
    pub fn set_cursor_blink_state(&mut self, blink: State) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_cursor_blink(blink);
        self.send_display_control()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_blink_state(&self) -> State {
        self.state.get_cursor_blink()
    }

    /// Turn the display on, cursor and blink settings are kept
    pub fn display(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_display_state(State::On)
    }

    /// Turn the display off, DDRAM content is kept
    pub fn no_display(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_display_state(State::Off)
    }

    /// toggle entire display on and off
    pub fn toggle_display(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_display_state(self.get_display_state().toggled())
    }

    /// Show the underline cursor
    pub fn cursor(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_cursor_state(State::On)
    }

    #[allow(missing_docs)]
    pub fn no_cursor(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_cursor_state(State::Off)
    }

    /// Blink a block on the cursor position
    pub fn blink(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_cursor_blink_state(State::On)
    }

    #[allow(missing_docs)]
    pub fn no_blink(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_cursor_blink_state(State::Off)
    }

    #[allow(missing_docs)]
    pub fn set_direction(&mut self, dir: MoveDirection) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_direction(dir);
        self.send_entry_mode()
    }

    #[allow(missing_docs)]
    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    /// [`ShiftType::CursorAndDisplay`] makes the display follow every write (autoscroll)
    pub fn set_shift_type(&mut self, shift: ShiftType) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_shift_type(shift);
        self.send_entry_mode()
    }

    #[allow(missing_docs)]
    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    /// Text flows left to right
    pub fn left_to_right(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_direction(MoveDirection::LeftToRight)
    }

    /// Text flows right to left
    pub fn right_to_left(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_direction(MoveDirection::RightToLeft)
    }

    /// Shift the display on every write, so text appears to grow from the cursor
    pub fn autoscroll(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_shift_type(ShiftType::CursorAndDisplay)
    }

    #[allow(missing_docs)]
    pub fn no_autoscroll(&mut self) -> Result<(), Error<Sender::Error>> {
        self.set_shift_type(ShiftType::CursorOnly)
    }

    /// Move the cursor or the whole display by one position, RAM is untouched
    pub fn shift_cursor_or_display(
        &mut self,
        shift_type: ShiftType,
        dir: MoveDirection,
    ) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.send(CommandSet::CursorOrDisplayShift(shift_type, dir))
    }

    #[allow(missing_docs)]
    pub fn scroll_display_left(&mut self) -> Result<(), Error<Sender::Error>> {
        self.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::RightToLeft)
    }

    #[allow(missing_docs)]
    pub fn scroll_display_right(&mut self) -> Result<(), Error<Sender::Error>> {
        self.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::LeftToRight)
    }

    #[allow(missing_docs)]
    pub fn move_cursor_left(&mut self) -> Result<(), Error<Sender::Error>> {
        self.shift_cursor_or_display(ShiftType::CursorOnly, MoveDirection::RightToLeft)
    }

    #[allow(missing_docs)]
    pub fn move_cursor_right(&mut self) -> Result<(), Error<Sender::Error>> {
        self.shift_cursor_or_display(ShiftType::CursorOnly, MoveDirection::LeftToRight)
    }

    /// Override the DDRAM base address of each row,
    /// for panels whose rows are not laid out the usual way
    pub fn set_row_offsets(
        &mut self,
        offsets: [u8; MAX_LINES as usize],
    ) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_row_offsets(offsets);
        Ok(())
    }

    /// DDRAM base address of each configured row
    pub fn get_row_offsets(&self) -> &[u8] {
        self.state.get_row_offsets()
    }

    #[allow(missing_docs)]
    pub fn get_num_lines(&self) -> u8 {
        self.state.get_num_lines()
    }

    #[allow(missing_docs)]
    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    #[allow(missing_docs)]
    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    /// Whether data writes currently land in DDRAM or CGRAM
    pub fn get_ram_type(&self) -> RAMType {
        self.state.get_ram_type()
    }

    #[allow(missing_docs)]
    pub fn get_init_state(&self) -> InitState {
        self.state.get_init_state()
    }

    #[allow(missing_docs)]
    pub fn get_timing(&self) -> Timing {
        self.timing
    }

    /// Block with the delayer the driver holds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    #[allow(missing_docs)]
    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us);
    }
}
