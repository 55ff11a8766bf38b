//! Mock hardware for integration tests.
//!
//! Pins record every level written, the hardware adapter records every
//! port call, and the sink/display keep everything they were handed, so
//! tests can assert on full histories without touching real GPIO.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use sentinel::app::events::{AppEvent, StatusData};
use sentinel::app::ports::{EventSink, LightPort, SirenPort, StatusDisplay};
use sentinel::config::AlarmConfig;
use sentinel::error::DisplayError;
use sentinel::siren::{SharedSiren, SirenGenerator, SirenStatus};

// ── Pins ──────────────────────────────────────────────────────

/// Output pin that keeps the full write history.
#[derive(Default)]
pub struct RecordingPin {
    pub writes: Vec<bool>,
}

#[allow(dead_code)]
impl RecordingPin {
    pub fn level(&self) -> bool {
        self.writes.last().copied().unwrap_or(false)
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes.push(true);
        Ok(())
    }
}

/// Input pin with a settable level.
pub struct MockInputPin(pub bool);

impl ErrorType for MockInputPin {
    type Error = Infallible;
}

impl InputPin for MockInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0)
    }
}

pub type TestSiren = SharedSiren<RecordingPin>;

pub fn make_siren(config: &AlarmConfig) -> TestSiren {
    SharedSiren::new(SirenGenerator::new(RecordingPin::default(), config))
}

/// Level currently on the siren pin.
#[allow(dead_code)]
pub fn siren_level(siren: &TestSiren) -> bool {
    siren.with(|g| g.pin().level())
}

// ── Hardware adapter ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    ReadLight,
    ForceOff,
}

/// Light + siren ports over a real [`SharedSiren`] with a recording pin.
pub struct MockHw<'a> {
    pub light: u16,
    pub siren: &'a TestSiren,
    pub calls: Vec<HwCall>,
}

#[allow(dead_code)]
impl<'a> MockHw<'a> {
    pub fn new(siren: &'a TestSiren) -> Self {
        Self {
            light: 0,
            siren,
            calls: Vec::new(),
        }
    }

    pub fn force_off_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == HwCall::ForceOff).count()
    }
}

impl LightPort for MockHw<'_> {
    fn read_light(&mut self) -> u16 {
        self.calls.push(HwCall::ReadLight);
        self.light
    }
}

impl SirenPort for MockHw<'_> {
    fn force_off(&mut self) {
        self.calls.push(HwCall::ForceOff);
        self.siren.force_off();
    }

    fn siren_status(&self) -> SirenStatus {
        self.siren.status()
    }
}

// ── Event sink ────────────────────────────────────────────────

/// Sink that keeps every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Display ───────────────────────────────────────────────────

/// Display that records renders and can be told to fail.
#[derive(Default)]
pub struct MockDisplay {
    pub fail: bool,
    pub renders: Vec<StatusData>,
}

impl StatusDisplay for MockDisplay {
    fn render(&mut self, status: &StatusData) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::NotResponding);
        }
        self.renders.push(*status);
        Ok(())
    }
}
