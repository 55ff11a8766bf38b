//! PIR motion sensor handler.
//!
//! Invoked on every rising edge of the motion input.  Latches
//! `motion_active`; there is no debounce, so a chattering sensor simply
//! re-sets a flag that is already true.

use crate::events::Event;

use super::SensorBus;

/// Rising-edge handler.  Interrupt-safe: one critical section plus one
/// queue push, no allocation.
pub fn on_rising_edge(bus: &SensorBus<'_>) {
    bus.alarm.set_motion();
    // Dropped diagnostics are counted by the queue; nothing to do here.
    let _ = bus.events.push(Event::MotionDetected);
}
