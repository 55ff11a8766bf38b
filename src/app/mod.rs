//! Application core — the alarm coordinator and its port boundary.
//!
//! The coordinator is the main-loop half of the system: it forwards
//! interrupt diagnostics, publishes status, and clears the alarm once both
//! inputs are quiet.  All interaction with hardware and collaborators
//! happens through the **port traits** in [`ports`], so the whole loop is
//! testable on the host.

pub mod events;
pub mod ports;
pub mod service;
