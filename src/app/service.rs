//! Alarm coordinator — the main-loop half of the system.
//!
//! [`AlarmCoordinator`] never sets an alarm flag.  It observes the shared
//! [`AlarmState`], forwards interrupt diagnostics, publishes status, and
//! resets the flags once both inputs are quiet.
//!
//! ```text
//!  EventQueue ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  AlarmState ◀──▶│    AlarmCoordinator    │ ──▶ StatusDisplay
//!   LightPort ──▶ │ drain · publish · clear│ ──▶ SirenPort
//!                 └────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::AlarmConfig;
use crate::events::EventQueue;
use crate::state::{AlarmSnapshot, AlarmState};

use super::events::{AppEvent, StatusData};
use super::ports::{EventSink, LightPort, SirenPort, StatusDisplay};

/// Outcome of one coordinator cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Flags as read at the start of the cycle.
    pub snapshot: AlarmSnapshot,
    /// Whether `clear_all` ran this cycle.
    pub cleared: bool,
}

// ───────────────────────────────────────────────────────────────
// AlarmCoordinator
// ───────────────────────────────────────────────────────────────

pub struct AlarmCoordinator<'a> {
    alarm: &'a AlarmState,
    events: &'a EventQueue,
    telemetry_every: u32,
    cycles_since_telemetry: u32,
    cycle_count: u64,
    was_triggered: bool,
    last_status: Option<StatusData>,
}

impl<'a> AlarmCoordinator<'a> {
    pub fn new(alarm: &'a AlarmState, events: &'a EventQueue, config: &AlarmConfig) -> Self {
        Self {
            alarm,
            events,
            telemetry_every: config.telemetry_every_cycles(),
            cycles_since_telemetry: 0,
            cycle_count: 0,
            was_triggered: false,
            last_status: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!(
            "AlarmCoordinator started (telemetry every {} cycles)",
            self.telemetry_every
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cycle: drain diagnostics → snapshot → publish → clear.
    ///
    /// `hw` satisfies both [`LightPort`] and [`SirenPort`] so a single
    /// hardware adapter can be passed without a double mutable borrow.
    pub fn cycle(
        &mut self,
        hw: &mut (impl LightPort + SirenPort),
        display: &mut impl StatusDisplay,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;

        // 1. Forward whatever the sensor handlers queued since last cycle
        self.events.drain(|event| sink.emit(&AppEvent::Sensor(event)));
        let dropped = self.events.take_dropped();
        if dropped > 0 {
            warn!("{} sensor events dropped (queue full)", dropped);
            sink.emit(&AppEvent::EventsDropped(dropped));
        }

        // 2. Snapshot the shared flags
        let snapshot = self.alarm.snapshot();

        // 3. Publish
        let status = StatusData {
            motion_active: snapshot.motion_active,
            door_open: snapshot.door_open,
            ambient_light_raw: hw.read_light(),
            siren: hw.siren_status(),
        };
        if let Err(e) = display.render(&status) {
            warn!("Status display refresh failed: {}", e);
        }
        sink.emit(&AppEvent::Status(status));

        self.cycles_since_telemetry += 1;
        if self.cycles_since_telemetry >= self.telemetry_every {
            self.cycles_since_telemetry = 0;
            sink.emit(&AppEvent::Telemetry(status));
        }
        self.last_status = Some(status);

        // 4. Clear only when the snapshot shows both inputs quiet.  An edge
        //    landing between the snapshot and this point is overwritten.
        let cleared = snapshot.is_quiet();
        if cleared {
            self.alarm.clear_all();
            hw.force_off();
            if self.was_triggered {
                info!("Alarm cleared");
                sink.emit(&AppEvent::AlarmCleared);
            }
        }
        self.was_triggered = snapshot.is_triggered();

        CycleReport { snapshot, cleared }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Status published by the most recent cycle.
    pub fn last_status(&self) -> Option<StatusData> {
        self.last_status
    }
}
