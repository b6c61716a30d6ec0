//! Control core of a two-digit LED thermometer.
//!
//! Everything that decides what the display shows lives here and runs
//! on the host as well as on the target:
//!
//! - [`filter`]: 16-sample moving average of the TMP36 reading.
//! - [`mux`]: the 2 ms tick - digit multiplexing and software PWM.
//! - [`button`]: brightness button with blocking debounce.
//! - [`controller`]: the main loop's display-mode state machine.
//! - [`shared`]: the state the tick and the main loop both touch.
//!
//! Usage: `cargo test --lib` for unit tests, `cargo test` for all.
//!
//! Note: The embedded binary (main.rs, board.rs) needs the `embedded`
//! feature and an nRF52840 target. It only wires these modules to
//! the peripherals.

#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod mux;
pub mod segment;
pub mod shared;

pub use button::{Brightness, ButtonDebouncer};
pub use controller::{Controller, DisplayCycle, DisplayMode, Readout};
pub use error::Error;
pub use filter::{RingAverageFilter, Temperature, TemperatureSensor};
pub use mux::{Digit, DigitDriver, DisplayMultiplexer, GpioDigitDriver};
pub use segment::{DisplayBuffer, Glyph, SegmentPattern};
pub use shared::SharedState;
