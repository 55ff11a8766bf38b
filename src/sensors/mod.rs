//! Sensor subsystem — the two interrupt handlers and the ambient light
//! reader.
//!
//! The handlers are plain functions that take a [`SensorBus`] by
//! reference.  On target, `drivers::hw_init` leaks one bus at boot and
//! passes its address to the GPIO ISR service as the callback argument;
//! tests build a bus on the stack.

pub mod door;
pub mod light;
pub mod motion;

use crate::events::EventQueue;
use crate::state::AlarmState;

/// Everything an interrupt handler is allowed to touch.
#[derive(Clone, Copy)]
pub struct SensorBus<'a> {
    pub alarm: &'a AlarmState,
    pub events: &'a EventQueue,
}

impl<'a> SensorBus<'a> {
    pub const fn new(alarm: &'a AlarmState, events: &'a EventQueue) -> Self {
        Self { alarm, events }
    }
}
