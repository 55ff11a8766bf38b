//! Integration tests for the handlers → AlarmState → SharedSiren tick path.
//!
//! These drive the siren exactly the way the timer callback does, one
//! `tick` at a time, with the sensor handlers injecting edges in between.

use crate::mock_hw::{MockInputPin, make_siren, siren_level};

use sentinel::config::AlarmConfig;
use sentinel::events::EventQueue;
use sentinel::sensors::{SensorBus, door, motion};
use sentinel::siren::{SirenTick, SweepDirection};
use sentinel::state::AlarmState;

#[test]
fn first_flip_after_eight_hundred_ticks_at_boot_frequency() {
    let alarm = AlarmState::new();
    let events = EventQueue::new();
    let siren = make_siren(&AlarmConfig::default());

    motion::on_rising_edge(&SensorBus::new(&alarm, &events));

    for _ in 0..799 {
        assert_eq!(siren.tick(&alarm), SirenTick::Held);
    }
    assert!(!siren_level(&siren));
    assert_eq!(
        siren.tick(&alarm),
        SirenTick::Toggled {
            high: true,
            frequency_hz: 1_020
        }
    );
    assert!(siren_level(&siren));
}

#[test]
fn repeated_motion_edges_do_not_restart_sweep() {
    let alarm = AlarmState::new();
    let events = EventQueue::new();
    let bus = SensorBus::new(&alarm, &events);
    let siren = make_siren(&AlarmConfig::default());

    motion::on_rising_edge(&bus);
    let mut flips = 0;
    while flips < 5 {
        if let SirenTick::Toggled { .. } = siren.tick(&alarm) {
            flips += 1;
        }
        // Extra edges land mid-sweep.
        if flips == 2 {
            motion::on_rising_edge(&bus);
        }
    }

    let status = siren.status();
    assert!(alarm.snapshot().motion_active);
    assert_eq!(status.frequency_hz, 1_100);
    assert_eq!(status.direction, SweepDirection::Ascending);
}

#[test]
fn tick_after_condition_drops_goes_low() {
    let alarm = AlarmState::new();
    let events = EventQueue::new();
    let bus = SensorBus::new(&alarm, &events);
    let siren = make_siren(&AlarmConfig::default());

    door::on_transition(&bus, &mut MockInputPin(true));
    while siren.tick(&alarm) == SirenTick::Held {}
    assert!(siren_level(&siren));

    door::on_transition(&bus, &mut MockInputPin(false));
    assert_eq!(siren.tick(&alarm), SirenTick::Silent);
    assert!(!siren_level(&siren));
    assert!(!siren.status().sounding);
}

#[test]
fn full_sweep_reverses_at_both_bounds() {
    let alarm = AlarmState::new();
    let events = EventQueue::new();
    let siren = make_siren(&AlarmConfig::default());
    motion::on_rising_edge(&SensorBus::new(&alarm, &events));

    let mut freqs = Vec::new();
    while freqs.len() < 101 {
        if let SirenTick::Toggled { frequency_hz, .. } = siren.tick(&alarm) {
            freqs.push(frequency_hz);
        }
    }

    // 50 steps up to the upper bound, then back down.
    assert_eq!(freqs[49], 2_000);
    assert_eq!(freqs[50], 1_980);
    assert_eq!(freqs[99], 1_000);
    assert_eq!(freqs[100], 1_020);
    assert!(freqs.iter().all(|f| (1_000..=2_000).contains(f)));
}

#[test]
fn reset_on_activation_restarts_each_episode() {
    let alarm = AlarmState::new();
    let events = EventQueue::new();
    let bus = SensorBus::new(&alarm, &events);
    let config = AlarmConfig {
        reset_sweep_on_activation: true,
        ..AlarmConfig::default()
    };
    let siren = make_siren(&config);

    door::on_transition(&bus, &mut MockInputPin(true));
    let mut flips = 0;
    while flips < 3 {
        if let SirenTick::Toggled { .. } = siren.tick(&alarm) {
            flips += 1;
        }
    }
    assert_eq!(siren.status().frequency_hz, 1_060);

    door::on_transition(&bus, &mut MockInputPin(false));
    siren.tick(&alarm);
    door::on_transition(&bus, &mut MockInputPin(true));
    while siren.tick(&alarm) == SirenTick::Held {}
    assert_eq!(siren.status().frequency_hz, 1_020);
}
