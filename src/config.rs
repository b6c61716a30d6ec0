//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, sensor constants and display cycle lengths
//! live here so they can be tuned in one place. Pin assignments are
//! made in `board.rs`.

// Timer tick

/// Period of the multiplexer / PWM tick (ms). One full two-digit
/// refresh takes two ticks.
pub const TICK_PERIOD_MS: u64 = 2;

/// Poll interval while the controller waits for a fresh tick (µs).
pub const SYNC_POLL_US: u32 = 10;

// Sensor (TMP36: 500 mV @ 0 °C + 10 mV/°C)

/// Number of raw samples kept by the averaging filter.
pub const HISTORY_LEN: usize = 16;

/// ADC reading at 0 °C (500 mV with a 5.1 V reference, 10-bit).
pub const SENSOR_ZERO_OFFSET: i16 = 100;

/// Scale from averaged ADC counts to hundredths of a degree
/// (~4.98 mV/count over 10 mV/°C).
pub const SENSOR_SCALE: i32 = 50;

/// Added before the final division so results round to the nearest degree.
pub const SENSOR_ROUNDING_BIAS: i32 = 50;

/// Final divisor collapsing the scaled value to whole degrees.
pub const SENSOR_DIVISOR: i32 = 100;

/// Largest value the 10-bit ADC can report.
pub const ADC_MAX: u16 = 1023;

/// SAADC full-scale input with internal 0.6 V reference and gain 1/6 (mV).
pub const SAADC_FULL_SCALE_MV: u32 = 3600;

/// Reference the sensor constants above are expressed against (mV).
pub const SENSOR_REFERENCE_MV: u32 = 5100;

// Controller

/// Delay after power-on before the sensor is first read (ms).
pub const POWER_ON_SETTLE_MS: u32 = 3000;

/// Samples taken during warm-up. Anything >= HISTORY_LEN converges.
pub const WARMUP_SAMPLES: u8 = 35;

/// How long the blank screen is held after warm-up (ms).
pub const BLANK_HOLD_MS: u32 = 1000;

/// Loop iterations showing the numeric reading before the idle screen.
pub const READOUT_CYCLES: u8 = 20;

/// Cycle counter value at which the idle screen ends and the counter wraps.
pub const IDLE_SCREEN_END: u8 = 25;

/// Largest temperature the two digits can show (°C).
pub const DISPLAY_MAX: i16 = 99;

/// Most negative temperature shown as minus + one digit (°C).
pub const DISPLAY_MIN: i16 = -9;

/// Delays between the three button polls of one loop iteration (ms).
pub const BUTTON_POLL_DELAYS_MS: [u32; 3] = [100, 100, 50];

// Button / brightness

/// Settle time after the button is released (ms).
pub const BUTTON_RELEASE_SETTLE_MS: u32 = 100;

/// Brightness added per press.
pub const BRIGHTNESS_STEP: u8 = 2;

/// Highest brightness level before wrapping back to 0.
pub const BRIGHTNESS_MAX: u8 = 6;

/// Period of the software PWM duty counter (ticks).
pub const PWM_PERIOD: u8 = 8;
