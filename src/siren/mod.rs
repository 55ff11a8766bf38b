//! Siren waveform generation.
//!
//! ```text
//!  esp_timer (500 µs) ──▶ SharedSiren::tick(&AlarmState)
//!                           │  critical section
//!                           ├─ read combined condition
//!                           └─ SirenGenerator::step ──▶ SweepOscillator
//!                                                  └──▶ siren GPIO
//! ```
//!
//! The oscillator turns a fixed high-rate tick into a variable-frequency
//! square wave by counting ticks up to a per-frequency threshold, so the
//! hardware timer period never has to be reprogrammed.

pub mod generator;
pub mod oscillator;

pub use generator::{SharedSiren, SirenGenerator, SirenTick};
pub use oscillator::{SWEEP_MAX_HZ, SWEEP_MIN_HZ, SWEEP_STEP_HZ, SweepDirection, SweepOscillator};

/// Observable siren state, published with every status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SirenStatus {
    /// Current sweep frequency (held while silent).
    pub frequency_hz: u16,
    /// Current sweep direction.
    pub direction: SweepDirection,
    /// Level currently driven on the siren pin.
    pub pin_high: bool,
    /// Whether the last tick saw the combined condition true.
    pub sounding: bool,
}
