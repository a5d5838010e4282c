//! pH probe monitor: averages a PH-4502C probe through the ADC, converts
//! the voltage with a linear calibration and publishes it over MQTT.

pub mod config;
pub mod connectivity;
pub mod monitor;
pub mod reading;
pub mod sensors;
pub mod string_error;
pub mod traits;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use config::Configuration;
pub use connectivity::{ConnectionState, Connectivity, PublishOutcome};
pub use monitor::{PhMonitor, Tick};
pub use reading::{DeviceStatus, Reading};
