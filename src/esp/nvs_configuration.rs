use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};

use crate::config::Configuration;
use crate::sensors::ph_sensor::Calibration;
use crate::string_error::StringEspError;

const NAMESPACE: &str = "ph_config";

pub const KEY_SSID: &str = "SSID";
pub const KEY_PASSPHRASE: &str = "PASS";
pub const KEY_MQTT_HOST: &str = "MQTTHOST";
pub const KEY_MQTT_PORT: &str = "MQTTPORT";
pub const KEY_INTERVAL: &str = "INTERVAL";
pub const KEY_ACID_VOLTAGE: &str = "ACIDV";
pub const KEY_SLOPE: &str = "SLOPE";

/// Per-device overrides of the build-time defaults.
pub struct NvsConfiguration {
    nvs: EspNvs<NvsDefault>,
}

impl NvsConfiguration {
    pub fn new(partition: EspDefaultNvsPartition) -> Result<Self, StringEspError> {
        EspNvs::new(partition, NAMESPACE, true)
            .map(|nvs| Self { nvs })
            .map_err(|e| StringEspError("Failed to open NVS namespace", e))
    }

    /// Invalid stored values fall back to their defaults.
    pub fn load(&self, defaults: Configuration) -> Configuration {
        Configuration {
            wifi_ssid: self.read_string(KEY_SSID, &defaults.wifi_ssid),
            wifi_passphrase: self.read_string(KEY_PASSPHRASE, &defaults.wifi_passphrase),
            mqtt_host: self.read_string(KEY_MQTT_HOST, &defaults.mqtt_host),
            mqtt_port: self.read_u16(KEY_MQTT_PORT, defaults.mqtt_port),
            publish_interval_ms: self.read_u32(KEY_INTERVAL, defaults.publish_interval_ms as u32)
                as u64,
            calibration: Calibration {
                acid_voltage: self.read_float(KEY_ACID_VOLTAGE, defaults.calibration.acid_voltage),
                slope: self.read_float(KEY_SLOPE, defaults.calibration.slope),
            },
            ..defaults
        }
        .sanitized()
    }

    pub fn read_string(&self, key: &str, default: &str) -> String {
        let size = self.nvs.str_len(key).unwrap_or(None).unwrap_or(0);
        let mut buf = vec![0; size];

        if size == 0 {
            return default.to_string();
        }

        self.nvs
            .get_str(key, &mut buf)
            .unwrap_or(None)
            .unwrap_or(default)
            .to_string()
    }

    /// Floats are kept as their u32 bit pattern.
    pub fn read_float(&self, key: &str, default: f32) -> f32 {
        match self.nvs.get_u32(key).unwrap_or(None) {
            Some(value) => f32::from_bits(value),
            None => default,
        }
    }

    pub fn read_u16(&self, key: &str, default: u16) -> u16 {
        self.nvs.get_u16(key).unwrap_or(None).unwrap_or(default)
    }

    pub fn read_u32(&self, key: &str, default: u32) -> u32 {
        self.nvs.get_u32(key).unwrap_or(None).unwrap_or(default)
    }
}
