//! Hardware adapter — bridges the light sensor and the shared siren to the
//! coordinator's port traits.
//!
//! The siren itself is stepped by the timer callback; this adapter only
//! holds a shared reference so the main loop can silence and observe it.
//! On non-espidf targets the light sensor reads its simulation input.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{LightPort, SirenPort};
use crate::sensors::light::LightSensor;
use crate::siren::{SharedSiren, SirenStatus};

/// Concrete adapter that combines the main-loop hardware behind port traits.
pub struct HardwareAdapter<P: 'static> {
    light: LightSensor,
    siren: &'static SharedSiren<P>,
}

impl<P: OutputPin> HardwareAdapter<P> {
    pub fn new(light: LightSensor, siren: &'static SharedSiren<P>) -> Self {
        Self { light, siren }
    }
}

// ── LightPort implementation ──────────────────────────────────

impl<P: OutputPin> LightPort for HardwareAdapter<P> {
    fn read_light(&mut self) -> u16 {
        self.light.read()
    }
}

// ── SirenPort implementation ──────────────────────────────────

impl<P: OutputPin> SirenPort for HardwareAdapter<P> {
    fn force_off(&mut self) {
        self.siren.force_off();
    }

    fn siren_status(&self) -> SirenStatus {
        self.siren.status()
    }
}
