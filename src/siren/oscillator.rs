//! Frequency-sweeping square-wave oscillator.
//!
//! Pure arithmetic, no I/O: [`SweepOscillator::advance`] is called once per
//! sounding tick and reports when the output level should flip.  The sweep
//! steps by [`SWEEP_STEP_HZ`] on every flip and bounces between
//! [`SWEEP_MIN_HZ`] and [`SWEEP_MAX_HZ`] (both inclusive).

/// Lower sweep bound.
pub const SWEEP_MIN_HZ: u16 = 1_000;
/// Upper sweep bound.
pub const SWEEP_MAX_HZ: u16 = 2_000;
/// Frequency change applied at every phase flip.
pub const SWEEP_STEP_HZ: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Ascending,
    Descending,
}

/// Oscillator memory.  Survives silent periods; only
/// [`reset`](Self::reset) returns it to the boot state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOscillator {
    frequency_hz: u16,
    direction: SweepDirection,
    phase_high: bool,
    tick_counter: u32,
}

impl Default for SweepOscillator {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepOscillator {
    /// Boot state: lowest frequency, ascending, output low.
    pub const fn new() -> Self {
        Self {
            frequency_hz: SWEEP_MIN_HZ,
            direction: SweepDirection::Ascending,
            phase_high: false,
            tick_counter: 0,
        }
    }

    pub fn frequency_hz(&self) -> u16 {
        self.frequency_hz
    }

    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    pub fn phase_high(&self) -> bool {
        self.phase_high
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Ticks per half-period at the current frequency (integer division).
    pub fn half_period_ticks(&self, half_period_base: u32) -> u32 {
        half_period_base / u32::from(self.frequency_hz)
    }

    /// Count one sounding tick.
    ///
    /// Returns `Some(level)` when the threshold is reached: the phase has
    /// flipped to `level`, the counter is back at zero and the sweep has
    /// moved one step.  Returns `None` while the current half-period runs.
    pub fn advance(&mut self, half_period_base: u32) -> Option<bool> {
        self.tick_counter = self.tick_counter.saturating_add(1);
        if self.tick_counter < self.half_period_ticks(half_period_base) {
            return None;
        }

        self.phase_high = !self.phase_high;
        self.tick_counter = 0;
        self.step_sweep();
        Some(self.phase_high)
    }

    /// Drop the output low without touching frequency or direction.
    ///
    /// The half-period counter is kept: a sounding tick after a short
    /// silence continues the half-period that was running.
    pub fn silence(&mut self) {
        self.phase_high = false;
    }

    /// Back to the boot state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn step_sweep(&mut self) {
        match self.direction {
            SweepDirection::Ascending => {
                self.frequency_hz = (self.frequency_hz + SWEEP_STEP_HZ).min(SWEEP_MAX_HZ);
                if self.frequency_hz >= SWEEP_MAX_HZ {
                    self.direction = SweepDirection::Descending;
                }
            }
            SweepDirection::Descending => {
                self.frequency_hz = (self.frequency_hz - SWEEP_STEP_HZ).max(SWEEP_MIN_HZ);
                if self.frequency_hz <= SWEEP_MIN_HZ {
                    self.direction = SweepDirection::Ascending;
                }
            }
        }
    }
}
