use crate::command::{Font, LineMode, MoveDirection, RAMType, ShiftType, State};

/// The controller has at most 4 rows worth of DDRAM base addresses
pub(crate) const MAX_LINES: u8 = 4;

/// Where the driver is in its life cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
    /// [`Lcd::init()`](crate::lcd::Lcd::init) was never called
    #[default]
    Uninitialized,
    /// Initialization started but did not finish
    Initializing,
    /// Ready for every operation
    Ready,
}

/// Driver side mirror of the controller registers
#[derive(Clone, Debug)]
pub(crate) struct LcdState {
    init_state: InitState,
    line: LineMode,
    font: Font,
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
    num_lines: u8,
    row_offsets: [u8; MAX_LINES as usize],
    ram_type: RAMType,
}

impl Default for LcdState {
    fn default() -> Self {
        Self {
            init_state: InitState::Uninitialized,
            line: LineMode::OneLine,
            font: Font::Font5x8,
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            shift_type: ShiftType::CursorOnly,
            num_lines: 1,
            row_offsets: [0x00, 0x40, 0x00, 0x40],
            ram_type: RAMType::DDRam,
        }
    }
}

impl LcdState {
    /// Reset every register to its power-on default, then apply the geometry.
    ///
    /// `rows` is clamped into `1..=4`, and 5x10 font falls back to 5x8 on multi line displays.
    pub(crate) fn configure(&mut self, columns: u8, rows: u8, font: Font) {
        let init_state = self.init_state;
        *self = Self {
            init_state,
            ..Self::default()
        };

        let num_lines = rows.clamp(1, MAX_LINES);
        if num_lines != rows {
            log::warn!("{} rows is not supported, using {}", rows, num_lines);
        }
        self.num_lines = num_lines;

        self.line = match num_lines {
            1 => LineMode::OneLine,
            _ => LineMode::TwoLine,
        };

        self.font = match (font, self.line) {
            (Font::Font5x10, LineMode::TwoLine) => {
                log::warn!("5x10 font needs a one line display, using 5x8");
                Font::Font5x8
            }
            (font, _) => font,
        };

        self.row_offsets = [
            0x00,
            0x40,
            0x00u8.wrapping_add(columns),
            0x40u8.wrapping_add(columns),
        ];
    }

    pub(crate) fn get_init_state(&self) -> InitState {
        self.init_state
    }

    pub(crate) fn set_init_state(&mut self, init_state: InitState) {
        self.init_state = init_state;
    }

    pub(crate) fn get_line_mode(&self) -> LineMode {
        self.line
    }

    pub(crate) fn get_font(&self) -> Font {
        self.font
    }

    pub(crate) fn get_num_lines(&self) -> u8 {
        self.num_lines
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub(crate) fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub(crate) fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub(crate) fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_shift_type(&mut self, shift: ShiftType) {
        self.shift_type = shift;
    }

    pub(crate) fn get_ram_type(&self) -> RAMType {
        self.ram_type
    }

    pub(crate) fn set_ram_type(&mut self, ram_type: RAMType) {
        self.ram_type = ram_type;
    }

    /// Base addresses of the configured rows only
    pub(crate) fn get_row_offsets(&self) -> &[u8] {
        &self.row_offsets[..self.num_lines as usize]
    }

    pub(crate) fn set_row_offsets(&mut self, offsets: [u8; MAX_LINES as usize]) {
        self.row_offsets = offsets;
    }

    /// DDRAM address of `(col, row)`, with `row` clamped to the last configured row
    pub(crate) fn ddram_addr(&self, col: u8, row: u8) -> u8 {
        let mut row = row;
        if row >= MAX_LINES {
            row = MAX_LINES - 1;
        }
        if row >= self.num_lines {
            row = self.num_lines - 1;
        }

        col.wrapping_add(self.row_offsets[row as usize]) & 0b0111_1111
    }
}
