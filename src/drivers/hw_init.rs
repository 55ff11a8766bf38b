//! One-shot hardware peripheral initialization and GPIO ISR registration.
//!
//! Configures the ADC channel, GPIO directions and pulls using raw ESP-IDF
//! sys calls.  Called once from `main()` before the control loop starts.
//! Interrupt handlers receive their [`SensorBus`] through the ISR `arg`
//! pointer rather than through globals.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::sensors::SensorBus;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrHandlerAddFailed(i32),
    TimerCreateFailed(i32),
    TimerStartFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)       => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc)    => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc)    => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerAddFailed(rc) => write!(f, "GPIO ISR handler add failed (rc={})", rc),
            Self::TimerCreateFailed(rc)   => write!(f, "esp_timer create failed (rc={})", rc),
            Self::TimerStartFailed(rc)    => write!(f, "esp_timer start failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

pub const ADC1_CH_LIGHT: u32 = 6;

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_LIGHT, &chan_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 configured (CH6=light)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // PIR output is push-pull; no pull resistor.
    let motion_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::MOTION_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_POSEDGE,
    };
    let ret = unsafe { gpio_config(&motion_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    // Reed switch to ground; closed door pulls LOW.
    let door_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DOOR_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };
    let ret = unsafe { gpio_config(&door_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    info!("hw_init: GPIO inputs configured (motion=GPIO{}, door=GPIO{})", pins::MOTION_GPIO, pins::DOOR_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe from ISR and task context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::SIREN_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    unsafe { gpio_set_level(pins::SIREN_GPIO, 0) };

    info!("hw_init: siren output configured (GPIO{})", pins::SIREN_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    // Callers serialise through the siren's critical section.
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn motion_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: arg is the `&'static SensorBus` registered in init_isr_service().
    let bus = unsafe { &*(arg as *const SensorBus<'static>) };
    crate::sensors::motion::on_rising_edge(bus);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn door_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: as for motion_gpio_isr.
    let bus = unsafe { &*(arg as *const SensorBus<'static>) };
    // GpioInput reads are Infallible, so the handler always records a level.
    let mut pin = crate::drivers::gpio::GpioInput::new(pins::DOOR_GPIO);
    let _ = crate::sensors::door::on_transition(bus, &mut pin);
}

/// Install the per-pin GPIO ISR service and register the motion and door
/// handlers.  Call after init_peripherals().
#[cfg(target_os = "espidf")]
pub fn init_isr_service(bus: &'static SensorBus<'static>) -> Result<(), HwInitError> {
    let arg = bus as *const SensorBus<'static> as *mut core::ffi::c_void;

    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable).  `arg` points at a
    // leaked bus that outlives every interrupt.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Motion: rising edge
        gpio_set_intr_type(pins::MOTION_GPIO, gpio_int_type_t_GPIO_INTR_POSEDGE);
        let ret = gpio_isr_handler_add(pins::MOTION_GPIO, Some(motion_gpio_isr), arg);
        if ret != ESP_OK as i32 { return Err(HwInitError::IsrHandlerAddFailed(ret)); }
        gpio_intr_enable(pins::MOTION_GPIO);

        // Door: any edge (open or close)
        gpio_set_intr_type(pins::DOOR_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE);
        let ret = gpio_isr_handler_add(pins::DOOR_GPIO, Some(door_gpio_isr), arg);
        if ret != ESP_OK as i32 { return Err(HwInitError::IsrHandlerAddFailed(ret)); }
        gpio_intr_enable(pins::DOOR_GPIO);
    }

    info!("hw_init: ISR service installed (motion, door)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service(_bus: &'static SensorBus<'static>) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
