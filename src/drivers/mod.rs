//! Hardware initialisation, interrupt/timer glue and pin wrappers.

pub mod gpio;
pub mod hw_init;
pub mod hw_timer;
pub mod watchdog;
