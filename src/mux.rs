//! Display multiplexer and software PWM, run from the 2 ms timer tick.
//!
//! Each tick lights the other digit than last time, so a full refresh
//! of both digits takes two ticks. The same tick steps a modulo-8 duty
//! counter that switches the dimming LED.

use crate::button::Brightness;
use crate::config::PWM_PERIOD;
use crate::segment::SegmentPattern;
use crate::shared::SharedState;
use embedded_hal::digital::{OutputPin, PinState};

/// Which digit's common anode is energized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Digit {
    Tens,
    Units,
}

impl Digit {
    pub const fn other(self) -> Self {
        match self {
            Digit::Tens => Digit::Units,
            Digit::Units => Digit::Tens,
        }
    }
}

/// Down-counter `PWM_PERIOD - 1 ..= 0`, wrapping back to the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DutyCounter(u8);

impl DutyCounter {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 = if self.0 == 0 { PWM_PERIOD - 1 } else { self.0 - 1 };
    }

    /// LED is on while the counter is below the brightness level.
    pub const fn led_on(self, brightness: Brightness) -> bool {
        self.0 < brightness.level()
    }
}

/// Physical outputs touched by the tick, in the order it touches them.
pub trait DigitDriver {
    /// De-energize both anodes.
    fn blank(&mut self);

    /// Put a pattern on the segment lines, including segment A.
    fn write_segments(&mut self, pattern: SegmentPattern);

    /// Energize one anode.
    fn energize(&mut self, digit: Digit);

    fn set_dimmer(&mut self, on: bool);
}

/// What one tick put on the outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub digit: Digit,
    pub pattern: SegmentPattern,
    pub led_on: bool,
}

/// Tick-side state. Lives in the interrupt context only.
pub struct DisplayMultiplexer {
    active: Digit,
    duty: DutyCounter,
}

impl DisplayMultiplexer {
    pub const fn new() -> Self {
        // First tick lights the units digit.
        Self {
            active: Digit::Tens,
            duty: DutyCounter::new(),
        }
    }

    pub fn active(&self) -> Digit {
        self.active
    }

    pub fn duty(&self) -> DutyCounter {
        self.duty
    }

    /// One timer tick. Must finish well inside the tick period.
    pub fn tick<D: DigitDriver>(&mut self, shared: &SharedState, driver: &mut D) -> TickReport {
        driver.blank();

        self.active = self.active.other();
        let buffer = shared.display();
        let pattern = match self.active {
            Digit::Tens => buffer.tens,
            Digit::Units => buffer.units,
        };
        driver.write_segments(pattern);
        driver.energize(self.active);

        self.duty.advance();
        let led_on = self.duty.led_on(shared.brightness());
        driver.set_dimmer(led_on);

        shared.tick_done();

        TickReport {
            digit: self.active,
            pattern,
            led_on,
        }
    }
}

impl Default for DisplayMultiplexer {
    fn default() -> Self {
        Self::new()
    }
}

/// [`DigitDriver`] over plain GPIO outputs.
///
/// `bus` carries pattern bits 0..=5 (segments B, C, G, F, E, D).
/// Pin errors are ignored; the next tick rewrites every line anyway.
pub struct GpioDigitDriver<P> {
    bus: [P; SegmentPattern::BUS_WIDTH],
    segment_a: P,
    tens_anode: P,
    units_anode: P,
    dimmer: P,
}

impl<P: OutputPin> GpioDigitDriver<P> {
    pub fn new(
        bus: [P; SegmentPattern::BUS_WIDTH],
        segment_a: P,
        tens_anode: P,
        units_anode: P,
        dimmer: P,
    ) -> Self {
        Self {
            bus,
            segment_a,
            tens_anode,
            units_anode,
            dimmer,
        }
    }
}

impl<P: OutputPin> DigitDriver for GpioDigitDriver<P> {
    fn blank(&mut self) {
        let _ = self.tens_anode.set_low();
        let _ = self.units_anode.set_low();
    }

    fn write_segments(&mut self, pattern: SegmentPattern) {
        let bits = pattern.bus_bits();
        for (i, pin) in self.bus.iter_mut().enumerate() {
            let _ = pin.set_state(PinState::from(bits & (1 << i) != 0));
        }
        let _ = self
            .segment_a
            .set_state(PinState::from(pattern.segment_a_high()));
    }

    fn energize(&mut self, digit: Digit) {
        let _ = match digit {
            Digit::Tens => self.tens_anode.set_high(),
            Digit::Units => self.units_anode.set_high(),
        };
    }

    fn set_dimmer(&mut self, on: bool) {
        let _ = self.dimmer.set_state(PinState::from(on));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{DisplayBuffer, Glyph};
    use core::cell::RefCell;
    use core::convert::Infallible;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Blank,
        Segments(SegmentPattern),
        Energize(Digit),
        Dimmer(bool),
    }

    #[derive(Default)]
    struct Recorder {
        ops: std::vec::Vec<Op>,
    }

    impl DigitDriver for Recorder {
        fn blank(&mut self) {
            self.ops.push(Op::Blank);
        }
        fn write_segments(&mut self, pattern: SegmentPattern) {
            self.ops.push(Op::Segments(pattern));
        }
        fn energize(&mut self, digit: Digit) {
            self.ops.push(Op::Energize(digit));
        }
        fn set_dimmer(&mut self, on: bool) {
            self.ops.push(Op::Dimmer(on));
        }
    }

    #[test]
    fn tick_runs_outputs_in_order() {
        let shared = SharedState::new();
        shared.store_display(DisplayBuffer::from_glyphs(Glyph::D4, Glyph::D2));
        let mut mux = DisplayMultiplexer::new();
        let mut rec = Recorder::default();

        mux.tick(&shared, &mut rec);

        assert_eq!(
            rec.ops,
            [
                Op::Blank,
                Op::Segments(Glyph::D2.pattern()),
                Op::Energize(Digit::Units),
                Op::Dimmer(false),
            ]
        );
    }

    #[test]
    fn digits_alternate_every_tick() {
        let shared = SharedState::new();
        shared.store_display(DisplayBuffer::from_glyphs(Glyph::D7, Glyph::D1));
        let mut mux = DisplayMultiplexer::new();
        let mut rec = Recorder::default();

        let shown: std::vec::Vec<_> = (0..6)
            .map(|_| {
                let r = mux.tick(&shared, &mut rec);
                (r.digit, r.pattern)
            })
            .collect();

        let units = (Digit::Units, Glyph::D1.pattern());
        let tens = (Digit::Tens, Glyph::D7.pattern());
        assert_eq!(shown, [units, tens, units, tens, units, tens]);
    }

    #[test]
    fn duty_counter_counts_down_and_wraps() {
        let mut duty = DutyCounter::new();
        let mut seen = [0u8; 10];
        for slot in seen.iter_mut() {
            duty.advance();
            *slot = duty.value();
        }
        assert_eq!(seen, [7, 6, 5, 4, 3, 2, 1, 0, 7, 6]);
    }

    fn on_ticks_per_period(level: u8) -> usize {
        let shared = SharedState::new();
        shared.set_brightness(Brightness::from_level(level));
        let mut mux = DisplayMultiplexer::new();
        let mut rec = Recorder::default();
        (0..PWM_PERIOD)
            .filter(|_| mux.tick(&shared, &mut rec).led_on)
            .count()
    }

    #[test]
    fn duty_cycle_matches_brightness() {
        assert_eq!(on_ticks_per_period(0), 0);
        assert_eq!(on_ticks_per_period(2), 2);
        assert_eq!(on_ticks_per_period(4), 4);
        assert_eq!(on_ticks_per_period(6), 6);
    }

    #[test]
    fn brightness_change_applies_on_next_tick() {
        let shared = SharedState::new();
        let mut mux = DisplayMultiplexer::new();
        let mut rec = Recorder::default();

        // Counter sits at 7 after the first tick, 6 after the second.
        assert!(!mux.tick(&shared, &mut rec).led_on);
        shared.set_brightness(Brightness::MAX);
        assert_eq!(mux.duty().value(), 7);
        assert!(!mux.tick(&shared, &mut rec).led_on); // 6 < 6 is false
        assert!(mux.tick(&shared, &mut rec).led_on); // 5 < 6
    }

    #[test]
    fn tick_clears_sync_bit() {
        let shared = SharedState::new();
        let mut mux = DisplayMultiplexer::new();
        let mut rec = Recorder::default();

        shared.request_sync();
        mux.tick(&shared, &mut rec);
        assert!(!shared.sync_pending());
    }

    // GPIO driver

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Bus(usize),
        SegA,
        Tens,
        Units,
        Dimmer,
    }

    struct Pin<'a> {
        line: Line,
        log: &'a RefCell<std::vec::Vec<(Line, bool)>>,
    }

    impl embedded_hal::digital::ErrorType for Pin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for Pin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.line, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.line, true));
            Ok(())
        }
    }

    fn gpio_driver(log: &RefCell<std::vec::Vec<(Line, bool)>>) -> GpioDigitDriver<Pin<'_>> {
        let pin = |line| Pin { line, log };
        GpioDigitDriver::new(
            [
                pin(Line::Bus(0)),
                pin(Line::Bus(1)),
                pin(Line::Bus(2)),
                pin(Line::Bus(3)),
                pin(Line::Bus(4)),
                pin(Line::Bus(5)),
            ],
            pin(Line::SegA),
            pin(Line::Tens),
            pin(Line::Units),
            pin(Line::Dimmer),
        )
    }

    #[test]
    fn gpio_driver_splits_segment_a_from_bus() {
        let log = RefCell::new(std::vec::Vec::new());
        let mut driver = gpio_driver(&log);

        // "1": only B and C lit (low); A dark so its line is high.
        driver.write_segments(Glyph::D1.pattern());

        assert_eq!(
            *log.borrow(),
            [
                (Line::Bus(0), false),
                (Line::Bus(1), false),
                (Line::Bus(2), true),
                (Line::Bus(3), true),
                (Line::Bus(4), true),
                (Line::Bus(5), true),
                (Line::SegA, true),
            ]
        );
    }

    #[test]
    fn gpio_driver_full_tick() {
        let log = RefCell::new(std::vec::Vec::new());
        let mut driver = gpio_driver(&log);
        let shared = SharedState::new();
        shared.store_display(DisplayBuffer::from_glyphs(Glyph::D7, Glyph::D8));
        let mut mux = DisplayMultiplexer::new();

        mux.tick(&shared, &mut driver);
        log.borrow_mut().clear();
        mux.tick(&shared, &mut driver);

        let log = log.borrow();
        assert_eq!(log[0], (Line::Tens, false));
        assert_eq!(log[1], (Line::Units, false));
        // "7" lights A, so segment A goes low.
        assert_eq!(log[8], (Line::SegA, false));
        assert_eq!(log[9], (Line::Tens, true));
        assert_eq!(log[10], (Line::Dimmer, false));
        assert_eq!(log.len(), 11);
    }
}
