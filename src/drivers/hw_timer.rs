//! Siren tick timer using ESP-IDF's esp_timer API.
//!
//! A single periodic timer (500 µs by default) steps the
//! [`SharedSiren`] generator.  The callback receives its
//! [`SirenTimerArgs`] through the esp_timer `arg` pointer.
//!
//! Timer callbacks execute in the ESP timer task context.  The tick body
//! runs under `critical_section::with`, which on ESP-IDF masks interrupts,
//! so the GPIO handlers cannot interleave with a tick.

use crate::drivers::gpio::GpioOutput;
use crate::drivers::hw_init::HwInitError;
use crate::siren::SharedSiren;
use crate::state::AlarmState;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

/// What the siren timer callback needs.  Leaked once at boot.
pub struct SirenTimerArgs {
    pub alarm: &'static AlarmState,
    pub siren: &'static SharedSiren<GpioOutput>,
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn siren_tick_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: arg is the `&'static SirenTimerArgs` passed to start_siren_timer().
    let args = unsafe { &*(arg as *const SirenTimerArgs) };
    args.siren.tick(args.alarm);
}

/// Handle to the running siren timer.  The timer runs for the life of the
/// device; dropping the handle does not stop it.
pub struct SirenTimer {
    #[cfg(target_os = "espidf")]
    #[allow(dead_code)]
    handle: esp_timer_handle_t,
}

/// Create and start the periodic siren timer.
#[cfg(target_os = "espidf")]
pub fn start_siren_timer(
    args: &'static SirenTimerArgs,
    period_us: u32,
) -> Result<SirenTimer, HwInitError> {
    let mut handle: esp_timer_handle_t = core::ptr::null_mut();
    let timer_args = esp_timer_create_args_t {
        callback: Some(siren_tick_cb),
        arg: args as *const SirenTimerArgs as *mut core::ffi::c_void,
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: b"siren\0".as_ptr() as *const _,
        skip_unhandled_events: true,
    };

    // SAFETY: `timer_args.arg` points at leaked, immutable-for-life args;
    // `handle` is a valid out-pointer for the duration of the call.
    unsafe {
        let ret = esp_timer_create(&timer_args, &mut handle);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerCreateFailed(ret));
        }
        let ret = esp_timer_start_periodic(handle, u64::from(period_us));
        if ret != ESP_OK as i32 {
            esp_timer_delete(handle);
            return Err(HwInitError::TimerStartFailed(ret));
        }
    }

    info!("hw_timer: siren tick started ({}us period)", period_us);
    Ok(SirenTimer { handle })
}

#[cfg(not(target_os = "espidf"))]
pub fn start_siren_timer(
    _args: &'static SirenTimerArgs,
    period_us: u32,
) -> Result<SirenTimer, HwInitError> {
    log::info!("hw_timer(sim): siren timer not started ({}us period requested)", period_us);
    Ok(SirenTimer {})
}
