//! Port traits — the hexagonal boundary between the coordinator and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmCoordinator
//! ```
//!
//! Interrupt-context code (sensor handlers, siren tick) does not go
//! through these ports; it talks to `AlarmState` and `SharedSiren`
//! directly.  Ports are for the main loop only.

use crate::error::DisplayError;
use crate::siren::SirenStatus;

use super::events::{AppEvent, StatusData};

// ───────────────────────────────────────────────────────────────
// Light port (driven adapter: ADC → coordinator)
// ───────────────────────────────────────────────────────────────

/// Ambient light sampling.  Read once per cycle for the published status.
pub trait LightPort {
    /// Raw 12-bit ADC count.
    fn read_light(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Siren port (driven adapter: coordinator → siren)
// ───────────────────────────────────────────────────────────────

/// Main-loop access to the siren.  The timer keeps stepping it
/// independently; this port only silences and observes.
pub trait SirenPort {
    /// Drive the siren pin low now, without waiting for the next tick.
    fn force_off(&mut self);

    /// Current frequency, direction and pin level.
    fn siren_status(&self) -> SirenStatus;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: coordinator → logger)
// ───────────────────────────────────────────────────────────────

/// The coordinator emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go (serial log, test recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Status display port (passive observer)
// ───────────────────────────────────────────────────────────────

/// Refreshed once per cycle with the latest status.  A failing display
/// must never stall the coordinator; errors are logged and dropped.
pub trait StatusDisplay {
    fn render(&mut self, status: &StatusData) -> Result<(), DisplayError>;
}
