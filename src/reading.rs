use std::net::Ipv4Addr;

use serde_json::json;

use crate::sensors::ph_sensor::PhClass;

/// One measurement, built once per publish interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub voltage: f32,
    pub ph: f32,
    /// Seconds since boot.
    pub timestamp: u64,
}

impl Reading {
    pub fn new(voltage: f32, ph: f32, timestamp: u64) -> Self {
        Self {
            voltage,
            ph,
            timestamp,
        }
    }

    pub fn class(&self) -> PhClass {
        PhClass::from_ph(self.ph)
    }

    pub fn to_json(&self) -> String {
        json!({
            "pH": round_to(self.ph, 2),
            "voltage": round_to(self.voltage, 3),
            "timestamp": self.timestamp,
        })
        .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Online,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
        }
    }
}

pub fn status_json(status: DeviceStatus, device: &str, ip: Option<Ipv4Addr>) -> String {
    json!({
        "status": status.as_str(),
        "device": device,
        "ip": ip.unwrap_or(Ipv4Addr::UNSPECIFIED).to_string(),
    })
    .to_string()
}

fn round_to(value: f32, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value as f64 * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn value_payload_is_rounded() {
        let reading = Reading::new(2.498_168, 4.370_74, 42);
        let value: Value = serde_json::from_str(&reading.to_json()).unwrap();

        assert_eq!(value["pH"].as_f64(), Some(4.37));
        assert_eq!(value["voltage"].as_f64(), Some(2.498));
        assert_eq!(value["timestamp"].as_u64(), Some(42));
    }

    #[test]
    fn value_payload_is_compact_and_ordered() {
        let payload = Reading::new(2.032, 7.0, 30).to_json();
        assert_eq!(payload, r#"{"pH":7.0,"voltage":2.032,"timestamp":30}"#);
    }

    #[test]
    fn status_payload() {
        let payload = status_json(
            DeviceStatus::Online,
            "ESP32_pH_Sensor",
            Some(Ipv4Addr::new(192, 168, 1, 50)),
        );
        assert_eq!(
            payload,
            r#"{"status":"online","device":"ESP32_pH_Sensor","ip":"192.168.1.50"}"#
        );
    }

    #[test]
    fn status_without_address() {
        let value: Value =
            serde_json::from_str(&status_json(DeviceStatus::Online, "probe", None)).unwrap();
        assert_eq!(value["ip"], "0.0.0.0");
    }
}
