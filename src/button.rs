//! Brightness button with blocking debounce.
//!
//! The button is active-low with a pull-up. A press advances the LED
//! brightness one step, then the caller is held until the button is
//! released and has settled, so holding it never repeat-fires.

use crate::config::{BRIGHTNESS_MAX, BRIGHTNESS_STEP, BUTTON_RELEASE_SETTLE_MS, SYNC_POLL_US};
use crate::shared::SharedState;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// LED brightness level, compared against the PWM duty counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    pub const OFF: Self = Self(0);
    pub const MAX: Self = Self(BRIGHTNESS_MAX);

    /// Clamp a raw level into range.
    pub const fn from_level(level: u8) -> Self {
        if level > BRIGHTNESS_MAX {
            Self::MAX
        } else {
            Self(level)
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    /// Next level in the 0 → 2 → 4 → 6 → 0 cycle.
    pub const fn next(self) -> Self {
        let level = self.0 + BRIGHTNESS_STEP;
        if level > BRIGHTNESS_MAX {
            Self::OFF
        } else {
            Self(level)
        }
    }
}

/// Owns the button input pin.
pub struct ButtonDebouncer<P> {
    pin: P,
}

impl<P: InputPin> ButtonDebouncer<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Button currently held down. A pin read failure counts as released.
    pub fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }

    /// Register one press: step the brightness, wait for release, settle.
    pub fn handle_press<D: DelayNs>(&mut self, shared: &SharedState, delay: &mut D) -> Brightness {
        let brightness = shared.brightness().next();
        shared.set_brightness(brightness);

        #[cfg(feature = "defmt")]
        defmt::info!("Button: brightness -> {}", brightness.level());

        // Wait for release to avoid repeat triggers.
        while self.is_pressed() {
            delay.delay_us(SYNC_POLL_US);
        }
        delay.delay_ms(BUTTON_RELEASE_SETTLE_MS);

        brightness
    }

    /// Check the button once and handle a press if it is down.
    pub fn poll<D: DelayNs>(&mut self, shared: &SharedState, delay: &mut D) -> Option<Brightness> {
        if self.is_pressed() {
            Some(self.handle_press(shared, delay))
        } else {
            None
        }
    }
}
