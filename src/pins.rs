//! GPIO / peripheral pin assignments for the Sentinel node (ESP32 AI-Thinker
//! camera board).
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors — Digital (interrupt-driven)
// ---------------------------------------------------------------------------

/// PIR motion sensor output.  No pull resistor; interrupt on rising edge.
pub const MOTION_GPIO: i32 = 13;

/// Door reed switch.  Internal pull-up; the closed switch pulls the line LOW,
/// so HIGH = door open.  Interrupt on any edge.
pub const DOOR_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Light-dependent resistor divider.  ADC1 channel 6 (GPIO 34, input-only).
pub const LIGHT_ADC_GPIO: i32 = 34;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Siren driver transistor.  Plain GPIO square wave, toggled from the
/// siren timer callback.
pub const SIREN_GPIO: i32 = 12;
