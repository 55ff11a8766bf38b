//! Integration tests for the sensor handlers → AlarmState → AlarmCoordinator
//! pipeline.
//!
//! The coordinator runs against a real `SharedSiren` with a recording pin,
//! so clearing behaviour is checked all the way down to the pin level.

use crate::mock_hw::{
    MockDisplay, MockHw, MockInputPin, RecordingSink, TestSiren, make_siren, siren_level,
};

use sentinel::app::events::AppEvent;
use sentinel::app::service::AlarmCoordinator;
use sentinel::config::AlarmConfig;
use sentinel::events::{Event, EventQueue};
use sentinel::sensors::{SensorBus, door, motion};
use sentinel::siren::SirenTick;
use sentinel::state::AlarmState;

struct Rig {
    alarm: AlarmState,
    events: EventQueue,
    siren: TestSiren,
    config: AlarmConfig,
}

impl Rig {
    fn new() -> Self {
        let config = AlarmConfig::default();
        Self {
            alarm: AlarmState::new(),
            events: EventQueue::new(),
            siren: make_siren(&config),
            config,
        }
    }

    fn bus(&self) -> SensorBus<'_> {
        SensorBus::new(&self.alarm, &self.events)
    }

    fn coordinator(&self) -> AlarmCoordinator<'_> {
        AlarmCoordinator::new(&self.alarm, &self.events, &self.config)
    }

    fn tick_until_toggle(&self) -> SirenTick {
        loop {
            let t = self.siren.tick(&self.alarm);
            if t != SirenTick::Held {
                return t;
            }
        }
    }
}

// ── Clearing ──────────────────────────────────────────────────

#[test]
fn quiet_cycle_clears_and_forces_siren_off() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    let mut display = MockDisplay::default();
    let mut sink = RecordingSink::new();

    let report = coord.cycle(&mut hw, &mut display, &mut sink);

    assert!(report.cleared);
    assert_eq!(hw.force_off_count(), 1);
    assert!(!siren_level(&rig.siren));
    assert_eq!(sink.count(|e| *e == AppEvent::AlarmCleared), 0);
}

#[test]
fn motion_stays_latched_across_cycles() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    let mut display = MockDisplay::default();
    let mut sink = RecordingSink::new();

    motion::on_rising_edge(&rig.bus());

    for _ in 0..20 {
        let report = coord.cycle(&mut hw, &mut display, &mut sink);
        assert!(!report.cleared);
        assert!(report.snapshot.motion_active);
    }
    assert_eq!(hw.force_off_count(), 0);
    assert!(rig.alarm.snapshot().motion_active);
    assert_eq!(sink.count(|e| *e == AppEvent::AlarmCleared), 0);
}

#[test]
fn door_episode_clears_once_after_close() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    let mut display = MockDisplay::default();
    let mut sink = RecordingSink::new();

    door::on_transition(&rig.bus(), &mut MockInputPin(true));
    assert!(!coord.cycle(&mut hw, &mut display, &mut sink).cleared);
    assert!(!coord.cycle(&mut hw, &mut display, &mut sink).cleared);

    door::on_transition(&rig.bus(), &mut MockInputPin(false));
    assert!(coord.cycle(&mut hw, &mut display, &mut sink).cleared);
    assert!(coord.cycle(&mut hw, &mut display, &mut sink).cleared);

    assert_eq!(sink.count(|e| *e == AppEvent::AlarmCleared), 1);
}

#[test]
fn door_close_does_not_clear_latched_motion() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    let mut display = MockDisplay::default();
    let mut sink = RecordingSink::new();

    motion::on_rising_edge(&rig.bus());
    door::on_transition(&rig.bus(), &mut MockInputPin(true));
    door::on_transition(&rig.bus(), &mut MockInputPin(false));

    let report = coord.cycle(&mut hw, &mut display, &mut sink);
    assert!(!report.cleared);
    assert!(report.snapshot.motion_active);
    assert!(!report.snapshot.door_open);
}

// ── Clear holds the siren low until the next edge ──────────

#[test]
fn siren_stays_low_after_clear_until_next_edge() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    let mut display = MockDisplay::default();
    let mut sink = RecordingSink::new();

    door::on_transition(&rig.bus(), &mut MockInputPin(true));
    assert_eq!(
        rig.tick_until_toggle(),
        SirenTick::Toggled {
            high: true,
            frequency_hz: 1_020
        }
    );
    assert!(siren_level(&rig.siren));

    // Door closes; coordinator runs before the next timer tick.
    door::on_transition(&rig.bus(), &mut MockInputPin(false));
    assert!(coord.cycle(&mut hw, &mut display, &mut sink).cleared);
    assert!(!siren_level(&rig.siren));

    for _ in 0..2_000 {
        assert_eq!(rig.siren.tick(&rig.alarm), SirenTick::Silent);
    }
    assert!(!siren_level(&rig.siren));

    // Next edge brings it back, resuming the sweep where it left off.
    motion::on_rising_edge(&rig.bus());
    assert_eq!(
        rig.tick_until_toggle(),
        SirenTick::Toggled {
            high: true,
            frequency_hz: 1_040
        }
    );
}

// ── Diagnostics forwarding ────────────────────────────────────

#[test]
fn handler_events_are_forwarded_in_order() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    let mut display = MockDisplay::default();
    let mut sink = RecordingSink::new();

    coord.start(&mut sink);
    motion::on_rising_edge(&rig.bus());
    door::on_transition(&rig.bus(), &mut MockInputPin(true));
    door::on_transition(&rig.bus(), &mut MockInputPin(false));
    coord.cycle(&mut hw, &mut display, &mut sink);

    assert_eq!(
        &sink.events[..4],
        &[
            AppEvent::Started,
            AppEvent::Sensor(Event::MotionDetected),
            AppEvent::Sensor(Event::DoorOpened),
            AppEvent::Sensor(Event::DoorClosed),
        ]
    );
    assert!(rig.events.is_empty());
}

#[test]
fn queue_overflow_is_reported_once() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    let mut display = MockDisplay::default();
    let mut sink = RecordingSink::new();

    for _ in 0..40 {
        motion::on_rising_edge(&rig.bus());
    }
    coord.cycle(&mut hw, &mut display, &mut sink);

    assert_eq!(
        sink.count(|e| *e == AppEvent::Sensor(Event::MotionDetected)),
        31
    );
    assert!(sink.events.contains(&AppEvent::EventsDropped(9)));

    sink.clear();
    coord.cycle(&mut hw, &mut display, &mut sink);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::EventsDropped(_))), 0);
}

// ── Publishing ────────────────────────────────────────────────

#[test]
fn status_every_cycle_telemetry_every_second() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    let mut display = MockDisplay::default();
    let mut sink = RecordingSink::new();

    for _ in 0..10 {
        coord.cycle(&mut hw, &mut display, &mut sink);
    }

    assert_eq!(coord.cycle_count(), 10);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Status(_))), 10);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 2);
    assert_eq!(display.renders.len(), 10);
}

#[test]
fn status_carries_light_and_siren() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    hw.light = 3_100;
    let mut display = MockDisplay::default();
    let mut sink = RecordingSink::new();

    door::on_transition(&rig.bus(), &mut MockInputPin(true));
    rig.tick_until_toggle();
    coord.cycle(&mut hw, &mut display, &mut sink);

    let status = coord.last_status().expect("status published");
    assert!(status.door_open);
    assert!(!status.motion_active);
    assert_eq!(status.ambient_light_raw, 3_100);
    assert_eq!(status.siren.frequency_hz, 1_020);
    assert!(status.siren.pin_high);
    assert_eq!(display.renders.last(), Some(&status));
}

#[test]
fn display_failure_does_not_stop_cycle() {
    let rig = Rig::new();
    let mut coord = rig.coordinator();
    let mut hw = MockHw::new(&rig.siren);
    let mut display = MockDisplay {
        fail: true,
        ..MockDisplay::default()
    };
    let mut sink = RecordingSink::new();

    let report = coord.cycle(&mut hw, &mut display, &mut sink);

    assert!(report.cleared);
    assert!(display.renders.is_empty());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Status(_))), 1);
    assert_eq!(hw.force_off_count(), 1);
}
