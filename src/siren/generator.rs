//! Timer-driven siren generator.
//!
//! [`SirenGenerator`] owns the siren pin and the [`SweepOscillator`]; it is
//! stepped once per timer tick with the combined alarm condition.
//! [`SharedSiren`] wraps it in a critical-section mutex so the timer
//! callback and the coordinator (which forces the pin low when the alarm
//! clears) can both reach it.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

use crate::config::AlarmConfig;
use crate::state::AlarmState;

use super::SirenStatus;
use super::oscillator::SweepOscillator;

/// What a single tick did to the pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SirenTick {
    /// Condition false: pin driven low, sweep frozen.
    Silent,
    /// Sounding, mid half-period: pin untouched.
    Held,
    /// Sounding, half-period elapsed: pin driven to `high`, sweep moved
    /// on to `frequency_hz`.
    Toggled { high: bool, frequency_hz: u16 },
}

/// Owns the siren pin and its oscillator.
///
/// The production pin (`GpioOutput`) is `Infallible`.  With any other
/// `OutputPin`, a failed write leaves the pin out of step with
/// [`SirenStatus::pin_high`]; such writes are counted in
/// [`write_faults`](Self::write_faults) and the next write retries.
pub struct SirenGenerator<P> {
    pin: P,
    osc: SweepOscillator,
    half_period_base: u32,
    reset_on_activation: bool,
    sounding: bool,
    write_faults: u32,
}

impl<P: OutputPin> SirenGenerator<P> {
    /// Take ownership of the siren pin and drive it low.
    pub fn new(pin: P, config: &AlarmConfig) -> Self {
        let mut generator = Self {
            pin,
            osc: SweepOscillator::new(),
            half_period_base: config.half_period_base,
            reset_on_activation: config.reset_sweep_on_activation,
            sounding: false,
            write_faults: 0,
        };
        generator.drive(false);
        generator
    }

    /// One timer tick.  Bounded work: a counter compare and at most one
    /// pin write.
    pub fn step(&mut self, triggered: bool) -> SirenTick {
        if !triggered {
            self.force_silent();
            return SirenTick::Silent;
        }

        if !self.sounding {
            self.sounding = true;
            if self.reset_on_activation {
                self.osc.reset();
            }
        }

        match self.osc.advance(self.half_period_base) {
            Some(high) => {
                self.drive(high);
                SirenTick::Toggled {
                    high,
                    frequency_hz: self.osc.frequency_hz(),
                }
            }
            None => SirenTick::Held,
        }
    }

    /// Pin low, oscillator phase low.  Frequency and direction are kept.
    pub fn force_silent(&mut self) {
        self.osc.silence();
        self.sounding = false;
        self.drive(false);
    }

    pub fn status(&self) -> SirenStatus {
        SirenStatus {
            frequency_hz: self.osc.frequency_hz(),
            direction: self.osc.direction(),
            pin_high: self.osc.phase_high(),
            sounding: self.sounding,
        }
    }

    pub fn oscillator(&self) -> &SweepOscillator {
        &self.osc
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Pin writes that returned an error since construction.
    pub fn write_faults(&self) -> u32 {
        self.write_faults
    }

    fn drive(&mut self, high: bool) {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            self.write_faults = self.write_faults.saturating_add(1);
        }
    }
}

/// [`SirenGenerator`] behind a critical-section mutex.
pub struct SharedSiren<P> {
    inner: Mutex<RefCell<SirenGenerator<P>>>,
}

impl<P: OutputPin> SharedSiren<P> {
    pub fn new(generator: SirenGenerator<P>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(generator)),
        }
    }

    /// Timer callback body.  Reads the combined condition and steps the
    /// generator inside one critical section, so an edge handled before
    /// this tick is always visible to it.
    pub fn tick(&self, alarm: &AlarmState) -> SirenTick {
        critical_section::with(|cs| {
            let triggered = alarm.snapshot_in(cs).is_triggered();
            self.inner.borrow_ref_mut(cs).step(triggered)
        })
    }

    /// Silence from outside timer context.
    pub fn force_off(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).force_silent());
    }

    pub fn status(&self) -> SirenStatus {
        critical_section::with(|cs| self.inner.borrow_ref(cs).status())
    }

    /// Run `f` against the generator under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&SirenGenerator<P>) -> R) -> R {
        critical_section::with(|cs| f(&self.inner.borrow_ref(cs)))
    }
}
