//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (UART in production).  Per-cycle status goes out at debug level;
//! the once-a-second telemetry line is the one meant for the console.

use log::{debug, info, warn};

use crate::app::events::{AppEvent, StatusData};
use crate::app::ports::EventSink;
use crate::events::Event;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn flag(on: bool) -> &'static str {
    if on { "YES" } else { "NO" }
}

fn log_status(tag: &str, s: &StatusData) {
    info!(
        "{} | motion={} | door_open={} | light={} | siren={}Hz {:?} pin={}",
        tag,
        flag(s.motion_active),
        flag(s.door_open),
        s.ambient_light_raw,
        s.siren.frequency_hz,
        s.siren.direction,
        if s.siren.pin_high { "H" } else { "L" },
    );
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | alarm coordinator running");
            }
            AppEvent::Sensor(Event::MotionDetected) => {
                info!("EVENT | motion detected");
            }
            AppEvent::Sensor(Event::DoorOpened) => {
                info!("EVENT | door opened");
            }
            AppEvent::Sensor(Event::DoorClosed) => {
                info!("EVENT | door closed");
            }
            AppEvent::EventsDropped(n) => {
                warn!("EVENT | {} diagnostic events dropped", n);
            }
            AppEvent::Status(s) => {
                debug!(
                    "STATUS | motion={} door_open={} light={}",
                    s.motion_active, s.door_open, s.ambient_light_raw
                );
            }
            AppEvent::Telemetry(s) => log_status("TELEM", s),
            AppEvent::AlarmCleared => {
                info!("ALARM | cleared, siren off");
            }
        }
    }
}
