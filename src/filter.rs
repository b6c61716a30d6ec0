//! Moving-average temperature filter.
//!
//! Keeps the last [`HISTORY_LEN`] sensor deviations (raw reading minus
//! the sensor's 0 °C offset) in a ring and converts their average to
//! whole degrees, rounded to nearest.

use crate::config::{
    ADC_MAX, HISTORY_LEN, SENSOR_DIVISOR, SENSOR_REFERENCE_MV,
    SENSOR_ROUNDING_BIAS, SENSOR_SCALE, SENSOR_ZERO_OFFSET,
};
use crate::error::Error;

/// Blocking source of raw 10-bit ADC samples (`0..=ADC_MAX`).
pub trait TemperatureSensor {
    type Error;

    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

/// Convert a 10-bit sample taken against `full_scale_mv` into the
/// 10-bit, `SENSOR_REFERENCE_MV` scale the filter constants assume.
pub fn rescale_sample(sample: i16, full_scale_mv: u32) -> Result<u16, Error> {
    let counts = i32::from(sample) * full_scale_mv as i32 / SENSOR_REFERENCE_MV as i32;
    if (0..=i32::from(ADC_MAX)).contains(&counts) {
        Ok(counts as u16)
    } else {
        Err(Error::AdcOutOfRange(counts))
    }
}

/// Temperature in whole degrees Celsius.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(pub i16);

impl Temperature {
    pub const fn degrees(self) -> i16 {
        self.0
    }
}

/// Ring of recent sensor deviations.
///
/// The ring starts zeroed, so the first [`HISTORY_LEN`] outputs are
/// biased toward 0 °C. Prime it with at least that many samples before
/// trusting the result.
pub struct RingAverageFilter {
    history: [i32; HISTORY_LEN],
    cursor: usize,
    last_raw: u16,
}

impl RingAverageFilter {
    pub const fn new() -> Self {
        Self {
            history: [0; HISTORY_LEN],
            cursor: 0,
            last_raw: SENSOR_ZERO_OFFSET as u16,
        }
    }

    /// Read the sensor once and return the updated average.
    ///
    /// A failed read reuses the previous raw value.
    pub fn sample<S: TemperatureSensor>(&mut self, sensor: &mut S) -> Temperature
    where
        S::Error: core::fmt::Debug,
    {
        let raw = match sensor.read_raw() {
            Ok(raw) => raw,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Sensor read failed: {}", defmt::Debug2Format(&_e));
                self.last_raw
            }
        };
        self.push(raw)
    }

    /// Store one raw reading and return the updated average.
    pub fn push(&mut self, raw: u16) -> Temperature {
        self.last_raw = raw;
        self.history[self.cursor] = i32::from(raw) - i32::from(SENSOR_ZERO_OFFSET);
        self.cursor = (self.cursor + 1) % HISTORY_LEN;
        self.current()
    }

    /// Average of the ring, without taking a new sample.
    ///
    /// The average truncates toward zero on both sides of 0 °C.
    pub fn current(&self) -> Temperature {
        let sum: i32 = self.history.iter().sum();
        let average = sum / HISTORY_LEN as i32;
        let scaled = average * SENSOR_SCALE + SENSOR_ROUNDING_BIAS;
        Temperature(scaled.div_euclid(SENSOR_DIVISOR) as i16)
    }
}

impl Default for RingAverageFilter {
    fn default() -> Self {
        Self::new()
    }
}
