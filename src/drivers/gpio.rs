//! `embedded-hal` pin wrappers over raw ESP-IDF GPIO.
//!
//! The alarm core is written against `embedded_hal::digital` so tests can
//! substitute recording pins; these are the production implementations.
//! Both are `Copy`-cheap and can be constructed inside an ISR.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::drivers::hw_init;

/// Push-pull output configured by `hw_init`.
pub struct GpioOutput {
    pin: i32,
    high: bool,
}

impl GpioOutput {
    pub fn new(pin: i32) -> Self {
        Self { pin, high: false }
    }

    /// Level last written through this handle.
    pub fn is_driven_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, false);
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, true);
        self.high = true;
        Ok(())
    }
}

/// Input configured by `hw_init`; reads the live level.
pub struct GpioInput {
    pin: i32,
}

impl GpioInput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}
