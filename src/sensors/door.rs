//! Door reed-switch handler.
//!
//! The switch is wired to a pulled-up input that the closed contact pulls
//! LOW, so HIGH means open.  The handler runs on every transition and
//! re-samples the live level instead of counting edges; if contact bounce
//! delivers several interrupts, whichever handler runs last wins.

use embedded_hal::digital::InputPin;

use crate::events::Event;

use super::SensorBus;

/// Any-edge handler.  Returns the door state it recorded, or `None` if the
/// pin could not be read (state left untouched).
pub fn on_transition(bus: &SensorBus<'_>, pin: &mut impl InputPin) -> Option<bool> {
    let open = pin.is_high().ok()?;
    bus.alarm.set_door(open);
    let _ = bus.events.push(if open {
        Event::DoorOpened
    } else {
        Event::DoorClosed
    });
    Some(open)
}
