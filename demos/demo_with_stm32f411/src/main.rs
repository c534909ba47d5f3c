//! Drive a 16x2 HD44780 display with a STM32F411RET6 in 4 Pin Mode
//!
//! Wiring diagram
//!
//!  LCD <-> STM32F411RET6
//!  Vss <-> GND
//!  Vdd <-> 5V
//!   V0 <-> potentiometer <-> 5V & GND (to adjust the display contrast)
//!   RS <-> PA9
//!   RW <-> GND (the driver never reads)
//!   EN <-> PC7 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!   D4 <-> PB5
//!   D5 <-> PB4
//!   D6 <-> PB10
//!   D7 <-> PA8
//!    A <-> 5V
//!    K <-> GND

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{pac, prelude::*};

use lcd_hd44780::{
    command::{Font, State},
    lcd::{Config, Lcd},
    sender::ParallelSender,
};

// a heart shape
const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    let gpioa = dp.GPIOA.split();
    let gpiob = dp.GPIOB.split();
    let gpioc = dp.GPIOC.split();

    // R/W is tied low, so every line is a plain push-pull output
    let rs_pin = gpioa.pa9.into_push_pull_output().erase();
    let en_pin = gpioc.pc7.into_push_pull_output().erase();
    let db4_pin = gpiob.pb5.into_push_pull_output().erase();
    let db5_pin = gpiob.pb4.into_push_pull_output().erase();
    let db6_pin = gpiob.pb10.into_push_pull_output().erase();
    let db7_pin = gpioa.pa8.into_push_pull_output().erase();

    let mut sender = ParallelSender::new_4pin(rs_pin, en_pin, db4_pin, db5_pin, db6_pin, db7_pin);

    let mut lcd = Lcd::new(&mut sender, &mut delayer);

    let config = Config::default()
        .set_columns(16)
        .set_rows(2)
        .set_font(Font::Font5x8);

    if let Err(e) = lcd.init(config) {
        rprintln!("LCD init failed: {}", e);
        loop {}
    }
    rprintln!("LCD ready");

    lcd.create_char(1, &HEART).unwrap();

    lcd.set_cursor(1, 0).unwrap();
    lcd.write_text("hello,").unwrap();
    lcd.write_custom_char(1).unwrap();

    lcd.set_cursor(4, 1).unwrap();
    write!(lcd, "world {}!", 2024).unwrap();

    lcd.cursor().unwrap();
    lcd.blink().unwrap();
    lcd.delay_ms(2_000);
    lcd.set_cursor_blink_state(State::Off).unwrap();

    // scroll the whole text out to the right, then back
    for _ in 0..16 {
        lcd.delay_ms(250);
        lcd.scroll_display_right().unwrap();
    }
    for _ in 0..16 {
        lcd.delay_ms(250);
        lcd.scroll_display_left().unwrap();
    }

    // and blinking display 3 times
    for _ in 0..6 {
        lcd.delay_ms(500);
        lcd.toggle_display().unwrap();
    }

    rprintln!("demo done");

    loop {}
}
