//! ESP-IDF implementations of the monitor's hardware capabilities.

pub mod adc_helper;
pub mod mqtt_helper;
pub mod nvs_configuration;
pub mod wifi_helper;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::sys::esp_timer_get_time;

use crate::traits::{Clock, Delay};

#[derive(Debug, Clone, Copy, Default)]
pub struct FreeRtosDelay;

impl Delay for FreeRtosDelay {
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}

/// High resolution timer started by the bootloader.
#[derive(Debug, Clone, Copy, Default)]
pub struct EspTimerClock;

impl Clock for EspTimerClock {
    fn millis(&self) -> u64 {
        let micros = unsafe { esp_timer_get_time() };
        micros.max(0) as u64 / 1000
    }
}
