//! Main control loop and display-mode state machine.
//!
//! ```text
//! Warmup ──► Blank ──► NormalReadout ⇄ IdleDegreeScreen
//! ```
//!
//! - **Warmup**: prime the averaging filter, display untouched.
//! - **Blank**: both digits dark for one second.
//! - **NormalReadout**: the temperature, `READOUT_CYCLES` loop iterations.
//! - **IdleDegreeScreen**: "°C" until the cycle counter passes
//!   `IDLE_SCREEN_END`, then back to the readout.
//!
//! The loop never ends. Every display write waits for a fresh tick of
//! the multiplexer first, so the tick never renders a half-written pair.


use crate::button::ButtonDebouncer;
use crate::config::{
    BLANK_HOLD_MS, BUTTON_POLL_DELAYS_MS, DISPLAY_MAX, DISPLAY_MIN, IDLE_SCREEN_END,
    READOUT_CYCLES, SYNC_POLL_US, WARMUP_SAMPLES,
};
use crate::filter::{RingAverageFilter, Temperature, TemperatureSensor};
use crate::segment::{DisplayBuffer, Glyph};
use crate::shared::SharedState;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Controller states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    Warmup,
    Blank,
    NormalReadout,
    IdleDegreeScreen,
}

/// "°C", shown on the idle screen.
pub const DEGREE_C: DisplayBuffer = DisplayBuffer::from_glyphs(Glyph::Degree, Glyph::LetterC);

/// "HH", shown while the reading is above `DISPLAY_MAX`.
pub const OVERFLOW: DisplayBuffer = DisplayBuffer::from_glyphs(Glyph::LetterH, Glyph::LetterH);

/// "--", shown while the reading is below `DISPLAY_MIN`.
pub const UNDERFLOW: DisplayBuffer = DisplayBuffer::from_glyphs(Glyph::Minus, Glyph::Minus);

/// A temperature mapped onto two digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readout {
    /// Fits the display.
    Value(DisplayBuffer),
    Overflow,
    Underflow,
}

impl Readout {
    pub fn from_temperature(temperature: Temperature) -> Self {
        let t = temperature.degrees();
        if t > DISPLAY_MAX {
            Readout::Overflow
        } else if t < DISPLAY_MIN {
            Readout::Underflow
        } else if t < 0 {
            Readout::Value(DisplayBuffer::from_glyphs(Glyph::Minus, digit(-t)))
        } else {
            Readout::Value(DisplayBuffer::from_glyphs(digit(t / 10 % 10), digit(t % 10)))
        }
    }

    pub fn buffer(self) -> DisplayBuffer {
        match self {
            Readout::Value(buffer) => buffer,
            Readout::Overflow => OVERFLOW,
            Readout::Underflow => UNDERFLOW,
        }
    }

    /// Out-of-range indicators hold the cycle counter, so the idle
    /// screen never appears while they are shown.
    pub fn advances_cycle(self) -> bool {
        matches!(self, Readout::Value(_))
    }
}

fn digit(value: i16) -> Glyph {
    // Callers pass 0..=9.
    Glyph::digit(value as u8).unwrap_or(Glyph::Blank)
}

/// Readout / idle-screen alternation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayCycle {
    count: u8,
}

impl DisplayCycle {
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Pick what one loop iteration shows and move the counter.
    pub fn advance(&mut self, temperature: Temperature) -> (DisplayMode, DisplayBuffer) {
        if self.count < READOUT_CYCLES {
            let readout = Readout::from_temperature(temperature);
            if readout.advances_cycle() {
                self.count += 1;
            }
            (DisplayMode::NormalReadout, readout.buffer())
        } else {
            if self.count < IDLE_SCREEN_END {
                self.count += 1;
            } else {
                self.count = 0;
            }
            (DisplayMode::IdleDegreeScreen, DEGREE_C)
        }
    }
}

/// The cooperative main loop.
pub struct Controller<'a, S, B, D> {
    shared: &'a SharedState,
    sensor: S,
    filter: RingAverageFilter,
    button: ButtonDebouncer<B>,
    delay: D,
    mode: DisplayMode,
    cycle: DisplayCycle,
    temperature: Temperature,
}

impl<'a, S, B, D> Controller<'a, S, B, D>
where
    S: TemperatureSensor,
    S::Error: core::fmt::Debug,
    B: InputPin,
    D: DelayNs,
{
    pub fn new(shared: &'a SharedState, sensor: S, button: B, delay: D) -> Self {
        Self {
            shared,
            sensor,
            filter: RingAverageFilter::new(),
            button: ButtonDebouncer::new(button),
            delay,
            mode: DisplayMode::Warmup,
            cycle: DisplayCycle::new(),
            temperature: Temperature(0),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn cycle(&self) -> DisplayCycle {
        self.cycle
    }

    /// Last filtered reading.
    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Run forever.
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Execute the current state once.
    pub fn step(&mut self) {
        match self.mode {
            DisplayMode::Warmup => self.warm_up(),
            DisplayMode::Blank => self.blank(),
            DisplayMode::NormalReadout | DisplayMode::IdleDegreeScreen => self.readout(),
        }
    }

    fn warm_up(&mut self) {
        for _ in 0..WARMUP_SAMPLES {
            self.temperature = self.filter.sample(&mut self.sensor);
        }
        self.set_mode(DisplayMode::Blank);
    }

    fn blank(&mut self) {
        self.show(DisplayBuffer::BLANK);
        self.delay.delay_ms(BLANK_HOLD_MS);
        self.cycle.reset();
        self.set_mode(DisplayMode::NormalReadout);
    }

    fn readout(&mut self) {
        self.temperature = self.filter.sample(&mut self.sensor);
        let (mode, buffer) = self.cycle.advance(self.temperature);
        self.show(buffer);
        self.set_mode(mode);

        for ms in BUTTON_POLL_DELAYS_MS {
            self.button.poll(self.shared, &mut self.delay);
            self.delay.delay_ms(ms);
        }
    }

    /// Wait for a fresh tick, then write the display.
    fn show(&mut self, buffer: DisplayBuffer) {
        let delay = &mut self.delay;
        self.shared.wait_for_tick(|| delay.delay_us(SYNC_POLL_US));
        self.shared.store_display(buffer);
    }

    fn set_mode(&mut self, mode: DisplayMode) {
        if mode != self.mode {
            #[cfg(feature = "defmt")]
            defmt::info!("Mode: {} -> {} at {}", self.mode, mode, self.temperature);
            self.mode = mode;
        }
    }
}
