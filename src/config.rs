//! System configuration parameters
//!
//! All tunable parameters for the Sentinel node.  Sweep bounds and step
//! size are fixed policy and live in [`crate::siren::oscillator`]; only
//! timing is configurable.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::siren::SWEEP_MAX_HZ;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmConfig {
    // --- Siren ---
    /// Siren timer period (microseconds)
    pub siren_tick_period_us: u32,
    /// Numerator of the half-period threshold: a half-cycle at `f` Hz lasts
    /// `half_period_base / f` ticks
    pub half_period_base: u32,
    /// Restart the sweep at the lower bound on every new alarm episode
    pub reset_sweep_on_activation: bool,

    // --- Timing ---
    /// Coordinator cycle (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Telemetry line interval (milliseconds)
    pub telemetry_interval_ms: u32,
    /// Boot splash hold on the status display (milliseconds)
    pub splash_duration_ms: u32,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            // Siren
            siren_tick_period_us: 500,
            half_period_base: 800_000, // 800 ticks per half-cycle at 1 kHz
            reset_sweep_on_activation: false,

            // Timing
            control_loop_interval_ms: 200, // 5 Hz
            telemetry_interval_ms: 1_000,  // 1 Hz
            splash_duration_ms: 2_000,
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl AlarmConfig {
    /// Range-check every field.  Rejects rather than clamps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.siren_tick_period_us == 0 {
            return Err(ConfigError::ValidationFailed("siren_tick_period_us must be > 0"));
        }
        if self.half_period_base < u32::from(SWEEP_MAX_HZ) {
            return Err(ConfigError::ValidationFailed(
                "half_period_base gives a zero-tick half-period at the upper sweep bound",
            ));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("control_loop_interval_ms must be > 0"));
        }
        if self.telemetry_interval_ms < self.control_loop_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_ms shorter than control loop",
            ));
        }
        if self.watchdog_timeout_ms <= self.control_loop_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "watchdog_timeout_ms must exceed the control loop",
            ));
        }
        Ok(())
    }

    /// Coordinator cycles between telemetry lines (at least 1).
    pub fn telemetry_every_cycles(&self) -> u32 {
        (self.telemetry_interval_ms / self.control_loop_interval_ms.max(1)).max(1)
    }
}
