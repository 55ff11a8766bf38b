//! Sentinel firmware library.
//!
//! Exposes the alarm core, the coordinator and the adapters for
//! integration testing. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod pins;
pub mod siren;
pub mod state;

// Hardware-facing modules compile on the host against simulation stubs.
pub mod adapters;
pub mod drivers;
pub mod sensors;
