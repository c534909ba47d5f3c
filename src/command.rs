//! Instruction set of the HD44780 controller
//!
//! High level code only deals with [`CommandSet`] and the register enums.
//! The conversion into a [`Command`] is the single place where register
//! fields are serialized into the controller's bit layout.

use crate::utils::BitOps;

/// Every instruction this driver sends to the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandSet {
    /// Clear DDRAM and move the cursor to address 0
    ClearDisplay,
    /// Move the cursor to address 0 and undo any display shift
    ReturnHome,
    /// Write direction of the address counter, and whether the display follows it
    EntryModeSet(MoveDirection, ShiftType),
    /// Display, cursor and cursor blink switches
    DisplayOnOff {
        /// whole display
        display: State,
        /// underline cursor
        cursor: State,
        /// blinking block on cursor position
        cursor_blink: State,
    },
    /// Move the cursor, or shift the whole display, without touching RAM
    CursorOrDisplayShift(ShiftType, MoveDirection),
    // this is not a command from datasheet,
    // it's the upper half of a function set, sent as a lone nibble
    // while the controller may still listen in 8 bit mode
    /// Upper nibble of a function set, sent alone during initialization
    HalfFunctionSet(DataWidth),
    /// Bus width, line mode and font
    FunctionSet(DataWidth, LineMode, Font),
    /// Point the address counter into CGRAM (6 bit address)
    SetCGRAM(u8),
    /// Point the address counter into DDRAM (7 bit address)
    SetDDRAM(u8),
    /// Write one byte to the RAM the address counter points to
    WriteDataToRAM(u8),
}

/// Direction the address counter moves after a write
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    #[allow(missing_docs)]
    RightToLeft,
    #[allow(missing_docs)]
    #[default]
    LeftToRight,
}

/// What moves on a shift: only the cursor, or the cursor with the whole display
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftType {
    #[allow(missing_docs)]
    #[default]
    CursorOnly,
    #[allow(missing_docs)]
    CursorAndDisplay,
}

/// On/off switch of a register field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[allow(missing_docs)]
    Off,
    #[allow(missing_docs)]
    #[default]
    On,
}

impl State {
    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            State::Off => State::On,
            State::On => State::Off,
        }
    }
}

/// Bus width. Only [`DataWidth::Bit4`] is used after initialization,
/// [`DataWidth::Bit8`] exists for the reset nibble
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    #[allow(missing_docs)]
    #[default]
    Bit4,
    #[allow(missing_docs)]
    Bit8,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    OneLine,
    #[default]
    TwoLine,
}

/// Character font, 5x10 is only available on one line displays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    #[allow(missing_docs)]
    #[default]
    Font5x8,
    #[allow(missing_docs)]
    Font5x10,
}

/// The type of memory the address counter points to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RAMType {
    /// Display Data RAM
    #[default]
    DDRam,
    /// Character Generator RAM
    CGRam,
}

/// Level of the RS line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelection {
    /// RS low, instruction register
    Command,
    /// RS high, data register
    Data,
}

/// Payload of a [`Command`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bits {
    /// A lone nibble, in the lower 4 bits
    Bit4(u8),
    /// A full byte, transferred as two nibbles on a 4 pin bus
    Bit8(u8),
}

/// A framed transfer: register selection plus payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

impl Command {
    #[allow(missing_docs)]
    pub fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    /// A raw instruction byte
    pub fn command(byte: u8) -> Self {
        Self::new(RegisterSelection::Command, Bits::Bit8(byte))
    }

    /// A raw data byte
    pub fn data(byte: u8) -> Self {
        Self::new(RegisterSelection::Data, Bits::Bit8(byte))
    }

    #[allow(missing_docs)]
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    #[allow(missing_docs)]
    pub fn get_data(&self) -> Bits {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::command(0b0000_0001),

            CommandSet::ReturnHome => Self::command(0b0000_0010),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                raw_bits.put_bit(1, dir == MoveDirection::LeftToRight);
                raw_bits.put_bit(0, st == ShiftType::CursorAndDisplay);

                Self::command(raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                raw_bits.put_bit(2, display);
                raw_bits.put_bit(1, cursor);
                raw_bits.put_bit(0, cursor_blink);

                Self::command(raw_bits)
            }

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits: u8 = 0b0001_0000;

                raw_bits.put_bit(3, st == ShiftType::CursorAndDisplay);
                raw_bits.put_bit(2, dir == MoveDirection::LeftToRight);

                Self::command(raw_bits)
            }

            CommandSet::HalfFunctionSet(width) => {
                let mut raw_bits: u8 = 0b0010;

                raw_bits.put_bit(0, width == DataWidth::Bit8);

                Self::new(RegisterSelection::Command, Bits::Bit4(raw_bits))
            }

            CommandSet::FunctionSet(width, line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                raw_bits.put_bit(4, width == DataWidth::Bit8);
                raw_bits.put_bit(3, line == LineMode::TwoLine);
                raw_bits.put_bit(2, font == Font::Font5x10);

                Self::command(raw_bits)
            }

            CommandSet::SetCGRAM(addr) => Self::command(0b0100_0000 | (addr & 0b0011_1111)),

            CommandSet::SetDDRAM(addr) => Self::command(0b1000_0000 | (addr & 0b0111_1111)),

            CommandSet::WriteDataToRAM(data) => Self::data(data),
        }
    }
}
