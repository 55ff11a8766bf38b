//! Light-dependent resistor on ADC1.
//!
//! Only sampled for the published status; nothing in the alarm path
//! depends on it.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH6 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_LIGHT_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_light_adc(raw: u16) {
    SIM_LIGHT_ADC.store(raw, Ordering::Relaxed);
}

/// Full-scale value of the 12-bit ADC.
pub const LIGHT_ADC_MAX: u16 = 4095;

pub struct LightSensor {
    last_raw: u16,
    _adc_gpio: i32,
}

impl LightSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            last_raw: 0,
            _adc_gpio: adc_gpio,
        }
    }

    /// Sample the ADC.  Returns the raw 12-bit count (0–4095).
    pub fn read(&mut self) -> u16 {
        self.last_raw = self.read_adc().min(LIGHT_ADC_MAX);
        self.last_raw
    }

    /// Value from the most recent [`read`](Self::read).
    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_LIGHT)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_LIGHT_ADC.load(Ordering::Relaxed)
    }
}
