//! Error type for faults at the hardware boundary.
//!
//! The thermometer never stops on an error: the filter reuses the last
//! good sample and GPIO results are dropped. These variants exist so
//! the board layer can report what went wrong over defmt.

/// Faults raised by the board peripherals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The ADC returned a value outside `0..=ADC_MAX` after conversion.
    AdcOutOfRange(i32),
}
