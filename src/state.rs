//! Shared alarm state — the only data touched by more than one execution
//! context.
//!
//! ```text
//!  motion ISR ──set_motion()──┐
//!                             ▼
//!  door ISR ────set_door()──▶ AlarmState ◀──snapshot_in(cs)── siren timer
//!                             ▲
//!  coordinator ─snapshot()/clear_all()
//! ```
//!
//! Every access runs inside a `critical_section::with` block, so each field
//! update is atomic with respect to all readers and a reader can never see
//! a half-written pair.  On ESP-IDF the critical section masks interrupts;
//! on the host it is a global lock provided by the `std` implementation.

use core::cell::Cell;

use critical_section::{CriticalSection, Mutex};

/// Point-in-time copy of the two alarm flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmSnapshot {
    /// Latched by the motion handler; cleared only by the coordinator.
    pub motion_active: bool,
    /// Live door level as of the last door transition.
    pub door_open: bool,
}

impl AlarmSnapshot {
    /// The combined condition that gates the siren.
    pub const fn is_triggered(self) -> bool {
        self.motion_active || self.door_open
    }

    /// Both inputs quiet — the only state in which the coordinator clears.
    pub const fn is_quiet(self) -> bool {
        !self.motion_active && !self.door_open
    }
}

/// Process-wide alarm flags guarded by a critical section.
///
/// `const`-constructible so it can live in a `static` or be leaked once at
/// boot and handed to interrupt callbacks by reference.
pub struct AlarmState {
    flags: Mutex<Cell<AlarmSnapshot>>,
}

impl Default for AlarmState {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmState {
    pub const fn new() -> Self {
        Self {
            flags: Mutex::new(Cell::new(AlarmSnapshot {
                motion_active: false,
                door_open: false,
            })),
        }
    }

    /// Latch motion.  Idempotent.
    pub fn set_motion(&self) {
        critical_section::with(|cs| self.update(cs, |f| f.motion_active = true));
    }

    /// Record the current door level.
    pub fn set_door(&self, open: bool) {
        critical_section::with(|cs| self.update(cs, |f| f.door_open = open));
    }

    /// Copy both flags out under the lock.
    pub fn snapshot(&self) -> AlarmSnapshot {
        critical_section::with(|cs| self.snapshot_in(cs))
    }

    /// Read both flags from inside a critical section the caller already
    /// holds.  Used by the siren tick so the condition read and the
    /// oscillator step share one section.
    pub fn snapshot_in(&self, cs: CriticalSection<'_>) -> AlarmSnapshot {
        self.flags.borrow(cs).get()
    }

    /// Reset both flags.  Coordinator only.
    pub fn clear_all(&self) {
        critical_section::with(|cs| self.flags.borrow(cs).set(AlarmSnapshot::default()));
    }

    fn update(&self, cs: CriticalSection<'_>, f: impl FnOnce(&mut AlarmSnapshot)) {
        let cell = self.flags.borrow(cs);
        let mut flags = cell.get();
        f(&mut flags);
        cell.set(flags);
    }
}
