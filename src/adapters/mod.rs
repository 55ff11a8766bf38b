//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                  |
//! |------------|---------------|------------------------------|
//! | `hardware` | LightPort     | ESP32 ADC1 (LDR)             |
//! |            | SirenPort     | Shared siren generator       |
//! | `log_sink` | EventSink     | Serial log output            |
//! | `display`  | StatusDisplay | Text status panel            |

pub mod display;
pub mod hardware;
pub mod log_sink;
