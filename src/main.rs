//! ledtherm firmware entry point (nRF52840).
//!
//! Two execution contexts, as on the original single-core design:
//!
//! - **Tick** - an interrupt-mode executor on EGU1_SWI1 runs the
//!   multiplexer every 2 ms and preempts everything else.
//! - **Main loop** - thread mode, blocking. Runs the controller state
//!   machine forever.
//!
//! They share only [`SHARED`].

#![no_std]
#![no_main]

mod board;

use cortex_m_rt::entry;
use defmt::{info, unwrap};
use embassy_executor::InterruptExecutor;
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_time::{Delay, Duration, Ticker};
use embedded_hal::delay::DelayNs;
use ledtherm::config::{POWER_ON_SETTLE_MS, TICK_PERIOD_MS};
use ledtherm::{Controller, DisplayMultiplexer, SharedState};
use {defmt_rtt as _, panic_probe as _};

static SHARED: SharedState = SharedState::new();

static TICK_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    TICK_EXECUTOR.on_interrupt()
}

/// Timer tick: multiplex one digit, update the PWM output.
#[embassy_executor::task]
async fn tick_task(mut display: board::Display) {
    let mut mux = DisplayMultiplexer::new();
    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));

    loop {
        mux.tick(&SHARED, &mut display);
        ticker.next().await;
    }
}

#[entry]
fn main() -> ! {
    let p = embassy_nrf::init(Default::default());
    info!("ledtherm starting");

    let board = board::Board::new(p);

    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    let spawner = TICK_EXECUTOR.start(interrupt::EGU1_SWI1);
    unwrap!(spawner.spawn(tick_task(board.display)));

    let mut delay = Delay;
    delay.delay_ms(POWER_ON_SETTLE_MS);

    info!("Tick running, entering control loop");
    Controller::new(&SHARED, board.sensor, board.button, delay).run()
}
