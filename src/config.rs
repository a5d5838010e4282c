use log::warn;

use crate::sensors::ph_sensor::Calibration;
use crate::string_error::StringError;

const fn env_or(value: Option<&'static str>, default: &'static str) -> &'static str {
    match value {
        Some(v) => v,
        None => default,
    }
}

pub const DEFAULT_WIFI_SSID: &str = env_or(option_env!("PH_WIFI_SSID"), "YOUR_WIFI_SSID");
pub const DEFAULT_WIFI_PASS: &str = env_or(option_env!("PH_WIFI_PASS"), "YOUR_WIFI_PASSWORD");
pub const DEFAULT_MQTT_HOST: &str = env_or(option_env!("PH_MQTT_HOST"), "192.168.1.173");
pub const DEFAULT_MQTT_PORT: u16 = 1883;
pub const DEFAULT_CLIENT_ID: &str = "ESP32_pH_Sensor";
pub const DEFAULT_DEVICE_NAME: &str = "ESP32_pH_Sensor";

pub const TOPIC_PH_VALUE: &str = "sensor/ph/value";
pub const TOPIC_PH_STATUS: &str = "sensor/ph/status";

pub const DEFAULT_PUBLISH_INTERVAL_MS: u64 = 30_000;
pub const DEFAULT_SAMPLE_COUNT: u8 = 10;

/// Delay at the end of every control loop iteration.
pub const LOOP_DELAY_MS: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub wifi_ssid: String,
    pub wifi_passphrase: String,
    pub mqtt_host: String,
    pub mqtt_port: u16,
    pub client_id: String,
    pub device_name: String,
    pub publish_interval_ms: u64,
    pub sample_count: u8,
    pub calibration: Calibration,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            wifi_ssid: DEFAULT_WIFI_SSID.to_string(),
            wifi_passphrase: DEFAULT_WIFI_PASS.to_string(),
            mqtt_host: DEFAULT_MQTT_HOST.to_string(),
            mqtt_port: DEFAULT_MQTT_PORT,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            publish_interval_ms: DEFAULT_PUBLISH_INTERVAL_MS,
            sample_count: DEFAULT_SAMPLE_COUNT,
            calibration: Calibration::PH4502C_3V3,
        }
    }
}

impl Configuration {
    pub fn validate(&self) -> Result<(), StringError> {
        self.calibration.validate()?;

        if self.sample_count == 0 {
            return Err(StringError("Sample count must be at least 1"));
        }

        if self.publish_interval_ms == 0 {
            return Err(StringError("Publish interval must not be zero"));
        }

        Ok(())
    }

    /// Replaces every invalid field with its build-time default, so a bad
    /// stored override never keeps the device from sampling.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if let Err(e) = self.calibration.validate() {
            warn!("{e}, using default calibration");
            self.calibration = defaults.calibration;
        }

        if self.sample_count == 0 {
            warn!("Sample count of 0, using {}", defaults.sample_count);
            self.sample_count = defaults.sample_count;
        }

        if self.publish_interval_ms == 0 {
            warn!(
                "Publish interval of 0, using {} ms",
                defaults.publish_interval_ms
            );
            self.publish_interval_ms = defaults.publish_interval_ms;
        }

        self
    }

    pub fn mqtt_url(&self) -> String {
        format!("mqtt://{}:{}", self.mqtt_host, self.mqtt_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Configuration::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mqtt_port, 1883);
        assert_eq!(config.publish_interval_ms, 30_000);
        assert_eq!(config.sample_count, 10);
        assert_eq!(config.client_id, "ESP32_pH_Sensor");
    }

    #[test]
    fn zero_slope_is_rejected() {
        let mut config = Configuration::default();
        config.calibration.slope = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_samples_and_interval_are_rejected() {
        let mut config = Configuration::default();
        config.sample_count = 0;
        assert!(config.validate().is_err());

        let mut config = Configuration::default();
        config.publish_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn sanitized_drops_only_invalid_fields() {
        let config = Configuration {
            mqtt_host: "broker.local".to_string(),
            publish_interval_ms: 0,
            sample_count: 4,
            calibration: Calibration {
                acid_voltage: 1.9,
                slope: 0.0,
            },
            ..Default::default()
        }
        .sanitized();

        assert!(config.validate().is_ok());
        assert_eq!(config.calibration, Calibration::PH4502C_3V3);
        assert_eq!(config.publish_interval_ms, DEFAULT_PUBLISH_INTERVAL_MS);
        assert_eq!(config.sample_count, 4);
        assert_eq!(config.mqtt_host, "broker.local");
    }

    #[test]
    fn sanitized_replaces_zero_sample_count() {
        let config = Configuration {
            sample_count: 0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.sample_count, DEFAULT_SAMPLE_COUNT);
    }

    #[test]
    fn sanitized_keeps_valid_configuration() {
        let config = Configuration {
            publish_interval_ms: 10_000,
            calibration: Calibration {
                acid_voltage: 1.95,
                slope: 0.18,
            },
            ..Default::default()
        };

        assert_eq!(config.clone().sanitized(), config);
    }

    #[test]
    fn mqtt_url_uses_host_and_port() {
        let config = Configuration {
            mqtt_host: "broker.local".to_string(),
            mqtt_port: 1884,
            ..Default::default()
        };
        assert_eq!(config.mqtt_url(), "mqtt://broker.local:1884");
    }
}
