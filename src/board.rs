//! nRF52840 board wiring.
//!
//! Pin assignment (nRF52840-DK headers):
//!
//!   Segment bus B, C, G, F, E, D → P0.03, P0.04, P0.28, P0.29, P0.30, P0.31
//!   Segment A                    → P1.01
//!   Anode tens / units           → P1.02 / P1.03 (high = digit on)
//!   Dimming LED                  → P1.04
//!   Button                       → P0.11 (active-low, internal pull-up)
//!   TMP36 Vout                   → P0.02 / AIN0
//!
//! The SAADC runs at 10 bits with the default gain of 1/6 against the
//! internal 0.6 V reference, i.e. 3.6 V full scale. Samples are
//! rescaled to the 5.1 V scale the sensor constants assume.

use embassy_futures::block_on;
use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pin as _, Pull};
use embassy_nrf::saadc::{self, ChannelConfig, Config, Resolution, Saadc};
use embassy_nrf::{bind_interrupts, Peripherals};
use ledtherm::config::SAADC_FULL_SCALE_MV;
use ledtherm::filter::rescale_sample;
use ledtherm::{Error, GpioDigitDriver, TemperatureSensor};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
});

/// Display outputs driven from the tick.
pub type Display = GpioDigitDriver<Output<'static>>;

/// TMP36 on AIN0.
pub struct SaadcSensor {
    adc: Saadc<'static, 1>,
}

impl TemperatureSensor for SaadcSensor {
    type Error = Error;

    fn read_raw(&mut self) -> Result<u16, Error> {
        let mut buf = [0i16; 1];
        block_on(self.adc.sample(&mut buf));
        rescale_sample(buf[0], SAADC_FULL_SCALE_MV)
    }
}

/// Peripherals split by the context that owns them.
pub struct Board {
    /// Tick interrupt.
    pub display: Display,
    /// Main loop.
    pub sensor: SaadcSensor,
    /// Main loop.
    pub button: Input<'static>,
}

impl Board {
    pub fn new(p: Peripherals) -> Self {
        let out = |pin: AnyPin| Output::new(pin, Level::Low, OutputDrive::Standard);

        let display = GpioDigitDriver::new(
            [
                out(p.P0_03.degrade()),
                out(p.P0_04.degrade()),
                out(p.P0_28.degrade()),
                out(p.P0_29.degrade()),
                out(p.P0_30.degrade()),
                out(p.P0_31.degrade()),
            ],
            out(p.P1_01.degrade()),
            out(p.P1_02.degrade()),
            out(p.P1_03.degrade()),
            out(p.P1_04.degrade()),
        );

        let mut config = Config::default();
        config.resolution = Resolution::_10BIT;
        let channel = ChannelConfig::single_ended(p.P0_02);
        let mut adc = Saadc::new(p.SAADC, Irqs, config, [channel]);
        block_on(adc.calibrate());

        let button = Input::new(p.P0_11, Pull::Up);

        Self {
            display,
            sensor: SaadcSensor { adc },
            button,
        }
    }
}
