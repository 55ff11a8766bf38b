//! Sentinel Firmware — Main Entry Point
//!
//! Two interrupt-driven sensors feed one shared alarm state; a periodic
//! timer turns that state into a swept siren tone; the main loop only
//! observes, publishes, and clears.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Interrupt side                                                │
//! │    GPIO13 ↑ ──▶ motion::on_rising_edge ─┐                      │
//! │    GPIO14 ↕ ──▶ door::on_transition ────┼──▶ AlarmState        │
//! │                                         └──▶ EventQueue        │
//! │    esp_timer 500 µs ──▶ SharedSiren::tick(&AlarmState) ──▶ GPIO12
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   AlarmCoordinator (main loop, 200 ms)                 │    │
//! │  │   drain · snapshot · publish · clear                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │  HardwareAdapter   LogEventSink   TextStatusPanel              │
//! │  (Light+Siren)     (EventSink)    (StatusDisplay)              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info, warn};

use sentinel::adapters::display::TextStatusPanel;
use sentinel::adapters::hardware::HardwareAdapter;
use sentinel::adapters::log_sink::LogEventSink;
use sentinel::app::service::AlarmCoordinator;
use sentinel::config::AlarmConfig;
use sentinel::drivers::gpio::GpioOutput;
use sentinel::drivers::hw_init;
use sentinel::drivers::hw_timer::{self, SirenTimer, SirenTimerArgs};
use sentinel::drivers::watchdog::Watchdog;
use sentinel::error::Error;
use sentinel::events::EventQueue;
use sentinel::pins;
use sentinel::sensors::SensorBus;
use sentinel::sensors::light::LightSensor;
use sentinel::siren::{SharedSiren, SirenGenerator};
use sentinel::state::AlarmState;

/// Everything brought up at boot that the control loop needs.
struct Node {
    alarm: &'static AlarmState,
    events: &'static EventQueue,
    siren: &'static SharedSiren<GpioOutput>,
    _siren_timer: SirenTimer,
    display: TextStatusPanel,
}

/// Stop the main task without returning from `main`.  Interrupts and the
/// siren timer (if started) keep running.
fn park(err: Error) -> ! {
    error!("Boot failed: {} — main task parked", err);
    loop {
        FreeRtos::delay_ms(1_000);
    }
}

/// Boot steps 2–6.  Any failure is fatal to forward progress.
fn bring_up(config: &AlarmConfig) -> sentinel::error::Result<Node> {
    // ── 2. Configuration ──────────────────────────────────────
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()?;

    // ── 4. Shared state + sensor interrupts ───────────────────
    //
    // Leaked once: interrupt and timer callbacks receive these by
    // pointer and must be able to reach them for the life of the device.
    let alarm: &'static AlarmState = Box::leak(Box::new(AlarmState::new()));
    let events: &'static EventQueue = Box::leak(Box::new(EventQueue::new()));
    let bus: &'static SensorBus<'static> = Box::leak(Box::new(SensorBus::new(alarm, events)));

    hw_init::init_isr_service(bus)?;

    // ── 5. Siren generator + tick timer ───────────────────────
    let siren: &'static SharedSiren<GpioOutput> = Box::leak(Box::new(SharedSiren::new(
        SirenGenerator::new(GpioOutput::new(pins::SIREN_GPIO), config),
    )));
    let timer_args: &'static SirenTimerArgs =
        Box::leak(Box::new(SirenTimerArgs { alarm, siren }));
    let siren_timer = hw_timer::start_siren_timer(timer_args, config.siren_tick_period_us)?;

    // ── 6. Status display ─────────────────────────────────────
    let mut display = TextStatusPanel::new();
    display.init()?;
    if let Err(e) = display.show_splash() {
        warn!("Splash render failed: {}", e);
    }
    FreeRtos::delay_ms(config.splash_duration_ms);

    Ok(Node {
        alarm,
        events,
        siren,
        _siren_timer: siren_timer,
        display,
    })
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Sentinel v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = AlarmConfig::default();
    info!("Config: {}", serde_json::to_string(&config)?);

    let mut node = match bring_up(&config) {
        Ok(node) => node,
        Err(e) => park(e),
    };

    // ── 7. Coordinator ────────────────────────────────────────
    let mut hw = HardwareAdapter::new(LightSensor::new(pins::LIGHT_ADC_GPIO), node.siren);
    let mut sink = LogEventSink::new();
    let mut coordinator = AlarmCoordinator::new(node.alarm, node.events, &config);
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);

    coordinator.start(&mut sink);
    info!("System ready. Entering control loop.");

    loop {
        coordinator.cycle(&mut hw, &mut node.display, &mut sink);
        watchdog.feed();
        FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}
