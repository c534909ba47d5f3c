/*!
# HD44780 LCD Driver

Write-only driver for HD44780 compatible character LCDs (LCD1602, LCD2004, ...)
wired in 4 pin parallel mode, with R/W tied to ground.

Basic Usage:

1. Initialize a "sender" <br/>
    This crate includes [`sender::ParallelSender`], which drives RS, EN and DB4~DB7
    through [`embedded_hal::digital::OutputPin`]s.

    You can also use any driver implementing [`sender::SendCommand`].
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`], then [`lcd::Lcd::init()`] or
   [`lcd::Lcd::begin()`] to initialize the LCD hardware
<br/>
<br/>
3. use any methods provided by [`lcd::Lcd`] to control the LCD

Timing relies on fixed delays only, the busy flag is never read.
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod lcd;
pub mod sender;
mod state;
pub mod utils;

pub use error::Error;
