//! State shared between the controller loop and the tick interrupt.
//!
//! Ownership per field:
//!
//! | field        | writer     | reader     |
//! |--------------|------------|------------|
//! | tens, units  | controller | tick       |
//! | brightness   | controller | tick       |
//! | sync_pending | both (set by controller, cleared by tick) | controller |
//!
//! Nothing here blocks. The tick runs to completion before the
//! controller resumes, so a display write placed right after the tick
//! clears `sync_pending` cannot be observed half-done by the next tick.

use crate::button::Brightness;
use crate::segment::{DisplayBuffer, SegmentPattern};
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

pub struct SharedState {
    tens: AtomicU8,
    units: AtomicU8,
    brightness: AtomicU8,
    sync_pending: AtomicBool,
}

impl SharedState {
    /// Power-on state: lamp test on both digits, LED dark.
    pub const fn new() -> Self {
        Self {
            tens: AtomicU8::new(DisplayBuffer::LAMP_TEST.tens.bits()),
            units: AtomicU8::new(DisplayBuffer::LAMP_TEST.units.bits()),
            brightness: AtomicU8::new(Brightness::OFF.level()),
            sync_pending: AtomicBool::new(false),
        }
    }

    /// Current display contents. Called from the tick.
    pub fn display(&self) -> DisplayBuffer {
        DisplayBuffer {
            tens: SegmentPattern::from_bits(self.tens.load(Ordering::Acquire)),
            units: SegmentPattern::from_bits(self.units.load(Ordering::Acquire)),
        }
    }

    /// Replace the display contents. Controller only, and only right
    /// after [`wait_for_tick`](Self::wait_for_tick) returned.
    pub fn store_display(&self, buffer: DisplayBuffer) {
        self.tens.store(buffer.tens.bits(), Ordering::Release);
        self.units.store(buffer.units.bits(), Ordering::Release);
    }

    pub fn brightness(&self) -> Brightness {
        Brightness::from_level(self.brightness.load(Ordering::Acquire))
    }

    pub fn set_brightness(&self, brightness: Brightness) {
        self.brightness.store(brightness.level(), Ordering::Release);
    }

    /// Mark the display as stale; the next tick will clear the mark.
    pub fn request_sync(&self) {
        self.sync_pending.store(true, Ordering::Release);
    }

    /// `true` until a tick has run since the last [`request_sync`](Self::request_sync).
    pub fn sync_pending(&self) -> bool {
        self.sync_pending.load(Ordering::Acquire)
    }

    /// Called once at the end of every tick.
    pub fn tick_done(&self) {
        self.sync_pending.store(false, Ordering::Release);
    }

    /// Rendezvous with the tick: set the sync bit and spin until the
    /// interrupt clears it. `poll` runs between checks.
    pub fn wait_for_tick(&self, mut poll: impl FnMut()) {
        self.request_sync();
        while self.sync_pending() {
            poll();
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
