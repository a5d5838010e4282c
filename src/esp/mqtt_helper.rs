use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::anyhow;
use embedded_svc::mqtt::client::{EventPayload, QoS};
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::mqtt::client::{EspMqttClient, MqttClientConfiguration};
use log::{info, warn};

use crate::config::Configuration;
use crate::traits::Broker;

/// How long one connection attempt waits for the broker to acknowledge.
const CONNACK_WAIT_MS: u32 = 1000;
const CONNACK_POLL_MS: u32 = 50;

/// esp-mqtt client. The client runs its own task; the connection flag is
/// updated from its event callback.
pub struct EspBroker {
    url: String,
    client: Option<EspMqttClient<'static>>,
    connected: Arc<AtomicBool>,
}

impl EspBroker {
    pub fn new(config: &Configuration) -> Self {
        let url = config.mqtt_url();
        info!("MQTT broker: {url}");

        Self {
            url,
            client: None,
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    fn create_client(&self, client_id: &str) -> anyhow::Result<EspMqttClient<'static>> {
        let connected = self.connected.clone();
        let conf = MqttClientConfiguration {
            client_id: Some(client_id),
            ..Default::default()
        };

        let client = EspMqttClient::new_cb(&self.url, &conf, move |event| {
            match event.payload() {
                EventPayload::Connected(_) => connected.store(true, Ordering::Relaxed),
                EventPayload::Disconnected => connected.store(false, Ordering::Relaxed),
                EventPayload::Error(e) => warn!("MQTT error: {e:?}"),
                _ => (),
            }
        })?;

        Ok(client)
    }
}

impl Broker for EspBroker {
    fn connect(&mut self, client_id: &str) -> anyhow::Result<()> {
        // esp-mqtt keeps reconnecting on its own once created
        if self.client.is_none() {
            self.client = Some(self.create_client(client_id)?);
        }

        for _ in 0..(CONNACK_WAIT_MS / CONNACK_POLL_MS) {
            if self.is_connected() {
                return Ok(());
            }
            FreeRtos::delay_ms(CONNACK_POLL_MS);
        }

        Err(anyhow!("no answer from {}", self.url))
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn poll(&mut self) {}

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> anyhow::Result<()> {
        let client = self
            .client
            .as_mut()
            .ok_or_else(|| anyhow!("MQTT client not started"))?;

        client.publish(topic, QoS::AtMostOnce, retain, payload)?;
        Ok(())
    }
}
