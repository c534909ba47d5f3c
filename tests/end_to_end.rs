//! Drive `Lcd` + `ParallelSender` over recording pins, and replay the pin
//! activity into a minimal HD44780 model to see what the controller would do.

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};
use lcd_hd44780::{
    command::Font,
    lcd::Lcd,
    sender::{EnableTiming, ParallelSender},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Line {
    Rs,
    En,
    Db(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Set(Line, bool),
    DelayNs(u64),
}

type Wire = Rc<RefCell<Vec<Event>>>;

struct RecordingPin {
    line: Line,
    wire: Wire,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.wire.borrow_mut().push(Event::Set(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.wire.borrow_mut().push(Event::Set(self.line, true));
        Ok(())
    }
}

struct RecordingDelay {
    wire: Wire,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.wire.borrow_mut().push(Event::DelayNs(ns.into()));
    }

    fn delay_us(&mut self, us: u32) {
        self.wire
            .borrow_mut()
            .push(Event::DelayNs(u64::from(us) * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wire
            .borrow_mut()
            .push(Event::DelayNs(u64::from(ms) * 1_000_000));
    }
}

fn wired() -> (ParallelSender<RecordingPin, RecordingPin>, RecordingDelay, Wire) {
    let wire = Wire::default();
    let pin = |line| RecordingPin {
        line,
        wire: wire.clone(),
    };
    let sender = ParallelSender::new_4pin(
        pin(Line::Rs),
        pin(Line::En),
        pin(Line::Db(4)),
        pin(Line::Db(5)),
        pin(Line::Db(6)),
        pin(Line::Db(7)),
    );
    let delayer = RecordingDelay { wire: wire.clone() };
    (sender, delayer, wire)
}

/// Just enough of the controller: bus width, address counter, entry direction and RAM
struct Controller {
    rs: bool,
    en: bool,
    db: u8,
    eight_bit: bool,
    pending: Option<u8>,
    increment: bool,
    in_cgram: bool,
    ac: u8,
    ddram: [u8; 128],
    cgram: [u8; 64],
    /// every executed instruction, the ones received in 8 bit mode have a zero low nibble
    instructions: Vec<u8>,
    /// (in CGRAM, address, value) of every data write
    writes: Vec<(bool, u8, u8)>,
}

impl Controller {
    fn power_on() -> Self {
        Self {
            rs: false,
            en: false,
            db: 0,
            eight_bit: true,
            pending: None,
            increment: true,
            in_cgram: false,
            ac: 0,
            ddram: [b' '; 128],
            cgram: [0; 64],
            instructions: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// MCU was reset halfway through a 4 bit transfer
    fn stuck_in_4bit(pending: Option<u8>) -> Self {
        Self {
            eight_bit: false,
            pending,
            ..Self::power_on()
        }
    }

    fn replay(&mut self, wire: &Wire) {
        for event in wire.borrow().iter() {
            match *event {
                Event::Set(Line::Rs, level) => self.rs = level,
                Event::Set(Line::Db(n), level) => {
                    let bit = 1 << (n - 4);
                    match level {
                        true => self.db |= bit,
                        false => self.db &= !bit,
                    }
                }
                Event::Set(Line::En, level) => {
                    // the controller latches on the falling edge
                    if self.en && !level {
                        self.latch(self.db);
                    }
                    self.en = level;
                }
                Event::DelayNs(_) => {}
            }
        }
    }

    fn latch(&mut self, nibble: u8) {
        if self.eight_bit {
            // DB0~DB3 are not wired, they read as 0
            self.execute(nibble << 4);
            return;
        }

        match self.pending.take() {
            None => self.pending = Some(nibble),
            Some(high) => self.execute((high << 4) | nibble),
        }
    }

    fn execute(&mut self, byte: u8) {
        if self.rs {
            match self.in_cgram {
                true => self.cgram[usize::from(self.ac & 0x3F)] = byte,
                false => self.ddram[usize::from(self.ac & 0x7F)] = byte,
            }
            self.writes.push((self.in_cgram, self.ac, byte));
            self.ac = match self.increment {
                true => self.ac.wrapping_add(1),
                false => self.ac.wrapping_sub(1),
            };
            return;
        }

        self.instructions.push(byte);

        if byte & 0x80 != 0 {
            self.ac = byte & 0x7F;
            self.in_cgram = false;
        } else if byte & 0x40 != 0 {
            self.ac = byte & 0x3F;
            self.in_cgram = true;
        } else if byte & 0x20 != 0 {
            self.eight_bit = byte & 0x10 != 0;
        } else if byte & 0x10 != 0 || byte & 0x08 != 0 {
            // shift and display control don't touch RAM
        } else if byte & 0x04 != 0 {
            self.increment = byte & 0x02 != 0;
        } else if byte & 0x02 != 0 {
            self.ac = 0;
            self.in_cgram = false;
        } else if byte == 0x01 {
            self.ddram = [b' '; 128];
            self.ac = 0;
            self.in_cgram = false;
            self.increment = true;
        }
    }

    fn row(&self, base: u8, len: usize) -> &[u8] {
        &self.ddram[usize::from(base)..usize::from(base) + len]
    }
}

const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

#[test]
fn hi_lands_at_start_of_ddram() {
    let (mut sender, mut delayer, wire) = wired();
    let mut lcd = Lcd::new(&mut sender, &mut delayer);

    lcd.begin(16, 2, Font::Font5x8).unwrap();
    lcd.write_text("HI").unwrap();

    let mut controller = Controller::power_on();
    controller.replay(&wire);

    assert_eq!(
        controller.instructions,
        [0x30, 0x30, 0x30, 0x20, 0x28, 0x0C, 0x01, 0x06]
    );
    assert_eq!(controller.writes, [(false, 0x00, b'H'), (false, 0x01, b'I')]);
    assert_eq!(controller.row(0x00, 3), b"HI ");
    assert!(!controller.eight_bit);
}

#[test]
fn glyph_then_text_on_second_row() {
    let (mut sender, mut delayer, wire) = wired();
    let mut lcd = Lcd::new(&mut sender, &mut delayer);

    lcd.begin(16, 2, Font::Font5x8).unwrap();
    lcd.create_char(2, &HEART).unwrap();
    lcd.set_cursor(0, 1).unwrap();
    lcd.write_custom_char(2).unwrap();
    lcd.write_text("ok").unwrap();
    lcd.set_cursor(14, 0).unwrap();
    lcd.write_text("ab").unwrap();

    let mut controller = Controller::power_on();
    controller.replay(&wire);

    assert_eq!(&controller.cgram[16..24], &HEART);
    assert_eq!(controller.row(0x40, 3), &[2, b'o', b'k']);
    assert_eq!(controller.row(0x0E, 2), b"ab");
}

#[test]
fn right_to_left_writes_walk_backwards() {
    let (mut sender, mut delayer, wire) = wired();
    let mut lcd = Lcd::new(&mut sender, &mut delayer);

    lcd.begin(20, 4, Font::Font5x8).unwrap();
    lcd.right_to_left().unwrap();
    lcd.create_char(0, &HEART).unwrap();
    lcd.set_cursor(5, 2).unwrap();
    lcd.write_text("abc").unwrap();

    let mut controller = Controller::power_on();
    controller.replay(&wire);

    // glyph rows still go top to bottom
    assert_eq!(&controller.cgram[0..8], &HEART);
    // row 2 starts at 20
    assert_eq!(controller.row(20 + 3, 3), b"cba");
}

#[test]
fn init_recovers_from_interrupted_transfer() {
    for mut controller in [
        Controller::stuck_in_4bit(None),
        Controller::stuck_in_4bit(Some(0x0)),
    ] {
        let (mut sender, mut delayer, wire) = wired();
        let mut lcd = Lcd::new(&mut sender, &mut delayer);

        lcd.begin(16, 2, Font::Font5x8).unwrap();
        lcd.write_text("ok").unwrap();

        controller.replay(&wire);

        assert!(!controller.eight_bit);
        assert_eq!(controller.pending, None);
        assert_eq!(controller.row(0x00, 2), b"ok");
    }
}

/// Time in ns of every EN rising and falling edge
fn enable_edges(wire: &Wire) -> (Vec<u64>, Vec<u64>) {
    let mut now = 0;
    let mut rising = Vec::new();
    let mut falling = Vec::new();
    let mut en = false;

    for event in wire.borrow().iter() {
        match *event {
            Event::DelayNs(ns) => now += ns,
            Event::Set(Line::En, level) => {
                match (en, level) {
                    (false, true) => rising.push(now),
                    (true, false) => falling.push(now),
                    _ => {}
                }
                en = level;
            }
            Event::Set(..) => {}
        }
    }

    (rising, falling)
}

#[test]
fn timing_meets_datasheet_minimums() {
    let (mut sender, mut delayer, wire) = wired();
    let mut lcd = Lcd::new(&mut sender, &mut delayer);

    lcd.begin(16, 2, Font::Font5x8).unwrap();
    lcd.write_text("HI").unwrap();
    lcd.home().unwrap();

    let (rising, falling) = enable_edges(&wire);
    // 4 lone nibbles, then 4 init commands, 2 chars and home as nibble pairs
    assert_eq!(rising.len(), 4 + 2 * (4 + 2 + 1));
    assert_eq!(rising.len(), falling.len());

    // power supply settling
    assert!(rising[0] >= 40_000_000);

    for (rise, fall) in rising.iter().zip(&falling) {
        assert!(fall - rise >= 450, "EN pulse too short");
    }

    // gap between a falling edge and the next rising edge
    let gaps: Vec<u64> = falling
        .iter()
        .zip(&rising[1..])
        .map(|(fall, next_rise)| next_rise - fall)
        .collect();

    assert!(gaps[0] >= 4_100_000);
    assert!(gaps[1] >= 4_100_000);
    assert!(gaps[2] >= 100_000);
    assert!(gaps.iter().all(|&gap| gap >= 37_000));

    // clear display is the 3rd full command: its low nibble is the 10th pulse
    assert!(gaps[4 + 2 * 2 + 1] >= 1_520_000);

    // home is the last command, it must have been given time before returning
    let total: u64 = wire
        .borrow()
        .iter()
        .map(|event| match event {
            Event::DelayNs(ns) => *ns,
            Event::Set(..) => 0,
        })
        .sum();
    assert!(total - falling[falling.len() - 1] >= 1_520_000);
}

#[test]
fn enable_pulse_follows_custom_timing() {
    let (mut sender, mut delayer, wire) = wired();
    let timing = EnableTiming {
        setup_ns: 2_000,
        pulse_ns: 5_000,
        execution_us: 200,
    };
    sender.set_enable_timing(timing);
    assert_eq!(sender.get_enable_timing(), timing);

    let mut lcd = Lcd::new(&mut sender, &mut delayer);
    lcd.begin(16, 2, Font::Font5x8).unwrap();
    lcd.write_text("HI").unwrap();

    let (rising, falling) = enable_edges(&wire);
    assert_eq!(rising.len(), 4 + 2 * (4 + 2));

    for (rise, fall) in rising.iter().zip(&falling) {
        assert_eq!(fall - rise, 5_000);
    }

    // execution delay plus the next setup delay
    for (fall, next_rise) in falling.iter().zip(&rising[1..]) {
        assert!(next_rise - fall >= 200_000 + 2_000);
    }
}
