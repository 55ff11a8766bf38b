//! Outbound application events.
//!
//! The [`AlarmCoordinator`](super::service::AlarmCoordinator) emits these
//! through the [`EventSink`](super::ports::EventSink) port, one per
//! logical event.

use crate::events::Event;
use crate::siren::SirenStatus;

/// Structured events emitted by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The coordinator has started.
    Started,

    /// A sensor handler ran (forwarded from the interrupt queue).
    Sensor(Event),

    /// Diagnostic events were lost to a full queue since the last cycle.
    EventsDropped(u16),

    /// Status published this cycle.
    Status(StatusData),

    /// Periodic telemetry line (slower than `Status`).
    Telemetry(StatusData),

    /// Both inputs went quiet after an active alarm; siren forced off.
    AlarmCleared,
}

/// The published state surface.  Read-only to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusData {
    pub motion_active: bool,
    pub door_open: bool,
    /// Raw LDR reading (12-bit), passed through for display only.
    pub ambient_light_raw: u16,
    pub siren: SirenStatus,
}
