use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, MoveDirection, RAMType},
    error::Error,
    lcd::Lcd,
    sender::SendCommand,
};

/// Glyph index of the full block in the character ROM,
/// used for every char the ROM can't show
const FULL_BLOCK: u8 = 0xFF;

/// 8 CGRAM slots, 8 bytes each
const CGRAM_SLOT_MASK: u8 = 0b111;

fn char_to_byte(char: char) -> u8 {
    match char.is_ascii() {
        true => char as u8,
        false => FULL_BLOCK,
    }
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn warn_if_cgram(&self) {
        if self.state.get_ram_type() == RAMType::CGRam {
            log::warn!("writing text while the address counter points into CGRAM");
        }
    }

    /// write [char] to current position,
    /// non-ASCII characters are shown as a full block
    pub fn write_char(&mut self, char: char) -> Result<(), Error<Sender::Error>> {
        self.warn_if_cgram();
        self.write_byte(char_to_byte(char))
    }

    /// write string to current position, stop at the first `'\0'`
    ///
    /// The cursor moves after each character according to the entry mode,
    /// there is no wrapping to the next row.
    pub fn write_text(&mut self, text: &str) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.warn_if_cgram();

        for char in text.chars().take_while(|&char| char != '\0') {
            self.write_byte(char_to_byte(char))?;
        }
        Ok(())
    }

    /// Show the custom glyph stored in `slot` (0 to 7) at the cursor position
    pub fn write_custom_char(&mut self, slot: u8) -> Result<(), Error<Sender::Error>> {
        self.warn_if_cgram();
        self.write_byte(slot & CGRAM_SLOT_MASK)
    }

    /// Store a custom glyph in CGRAM `slot` (masked to 0~7), one byte per pixel row,
    /// the lower 5 bits of each row are used
    ///
    /// Note:
    /// After this call the address counter points into CGRAM, text written before
    /// [`Lcd::set_cursor()`], [`Lcd::home()`] or [`Lcd::clear()`] ends up in the glyphs
    /// (and logs a warning)
    pub fn create_char(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;

        // if DDRAM is written from right to left, CGRAM rows would be written from bottom to top,
        // so switch to left to right while writing the glyph
        let direction_flipped = self.get_direction() == MoveDirection::RightToLeft;
        if direction_flipped {
            self.set_direction(MoveDirection::LeftToRight)?;
        }

        let slot = slot & CGRAM_SLOT_MASK;
        self.state.set_ram_type(RAMType::CGRam);
        self.send(CommandSet::SetCGRAM(slot << 3))?;

        for &row in bitmap {
            self.send(CommandSet::WriteDataToRAM(row))?;
        }

        if direction_flipped {
            self.set_direction(MoveDirection::RightToLeft)?;
        }

        Ok(())
    }
}

impl<'a, 'b, Sender, Delayer> core::fmt::Write for Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_text(s).map_err(|_| core::fmt::Error)
    }
}
