use log::{error, info, warn};

use crate::config::{TOPIC_PH_STATUS, TOPIC_PH_VALUE};
use crate::reading::{status_json, DeviceStatus, Reading};
use crate::traits::{Broker, Delay, Network};

pub const WIFI_CONNECT_ATTEMPTS: u32 = 20;
pub const WIFI_POLL_DELAY_MS: u32 = 500;
pub const WIFI_RECONNECT_SETTLE_MS: u32 = 1000;

pub const MQTT_CONNECT_ATTEMPTS: u32 = 5;
pub const MQTT_RETRY_DELAY_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub wifi_connected: bool,
    pub broker_connected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    /// Broker was down, the message was dropped.
    Skipped,
    /// The client refused the message.
    Failed,
}

/// Owns the network and broker clients and the only copy of their state.
pub struct Connectivity<N: Network, B: Broker, D: Delay> {
    network: N,
    broker: B,
    delay: D,
    client_id: String,
    device_name: String,
    state: ConnectionState,
}

impl<N: Network, B: Broker, D: Delay> Connectivity<N, B, D> {
    pub fn new(network: N, broker: B, delay: D, client_id: &str, device_name: &str) -> Self {
        Self {
            network,
            broker,
            delay,
            client_id: client_id.to_string(),
            device_name: device_name.to_string(),
            state: ConnectionState::default(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn broker(&self) -> &B {
        &self.broker
    }

    /// First connection after boot. A successful broker connection
    /// announces the device.
    pub fn start(&mut self) -> ConnectionState {
        info!("Connecting to WiFi");
        self.state.wifi_connected = self.connect_wifi();
        self.log_wifi_result();

        if self.connect_broker() {
            self.publish_status(DeviceStatus::Online);
        }

        self.state
    }

    /// Called once per loop iteration: checks both links, reconnects what
    /// is down and services the broker client.
    pub fn service(&mut self) -> ConnectionState {
        if self.network.is_connected() {
            self.state.wifi_connected = true;
        } else {
            self.state.wifi_connected = false;
            self.reconnect_wifi();
        }

        let was_up = self.state.broker_connected;

        if self.broker.is_connected() {
            self.state.broker_connected = true;
            if !was_up {
                info!("Broker connection restored");
                self.publish_status(DeviceStatus::Online);
            }
        } else {
            self.state.broker_connected = false;
            if self.connect_broker() {
                self.publish_status(DeviceStatus::Online);
            }
        }

        self.broker.poll();

        self.state
    }

    pub fn publish_reading(&mut self, reading: &Reading) -> PublishOutcome {
        if !self.state.broker_connected {
            warn!("Broker not connected, skipping publish");
            return PublishOutcome::Skipped;
        }

        let payload = reading.to_json();

        match self.broker.publish(TOPIC_PH_VALUE, payload.as_bytes(), true) {
            Ok(()) => {
                info!("Published to {TOPIC_PH_VALUE}: {payload}");
                PublishOutcome::Published
            }
            Err(e) => {
                warn!("Failed to publish reading: {e:#}");
                PublishOutcome::Failed
            }
        }
    }

    pub fn publish_status(&mut self, status: DeviceStatus) -> PublishOutcome {
        if !self.state.broker_connected {
            return PublishOutcome::Skipped;
        }

        let payload = status_json(status, &self.device_name, self.network.local_ip());

        match self.broker.publish(TOPIC_PH_STATUS, payload.as_bytes(), true) {
            Ok(()) => {
                info!("Status published: {}", status.as_str());
                PublishOutcome::Published
            }
            Err(e) => {
                warn!("Failed to publish status: {e:#}");
                PublishOutcome::Failed
            }
        }
    }

    fn reconnect_wifi(&mut self) {
        info!("WiFi reconnecting");
        self.network.disconnect();
        self.delay.delay_ms(WIFI_RECONNECT_SETTLE_MS);

        self.state.wifi_connected = self.connect_wifi();
        self.log_wifi_result();
    }

    /// Starts association and polls the link up to `WIFI_CONNECT_ATTEMPTS` times.
    fn connect_wifi(&mut self) -> bool {
        if let Err(e) = self.network.begin() {
            warn!("WiFi start failed: {e:#}");
        }

        for _ in 0..WIFI_CONNECT_ATTEMPTS {
            if self.network.is_connected() {
                return true;
            }
            self.delay.delay_ms(WIFI_POLL_DELAY_MS);
        }

        self.network.is_connected()
    }

    fn log_wifi_result(&self) {
        if self.state.wifi_connected {
            match self.network.local_ip() {
                Some(ip) => info!("WiFi connected, IP address: {ip}"),
                None => info!("WiFi connected"),
            }
        } else {
            error!("WiFi connection failed after {WIFI_CONNECT_ATTEMPTS} attempts");
        }
    }

    /// Returns true when this call brought the broker up.
    fn connect_broker(&mut self) -> bool {
        if !self.state.wifi_connected {
            return false;
        }

        for attempt in 1..=MQTT_CONNECT_ATTEMPTS {
            if self.broker.is_connected() {
                break;
            }

            info!("Broker connection attempt {attempt}/{MQTT_CONNECT_ATTEMPTS}");

            match self.broker.connect(&self.client_id) {
                Ok(()) => info!("Connected to broker as {}", self.client_id),
                Err(e) => {
                    warn!("Broker connection failed: {e:#}, retrying in {MQTT_RETRY_DELAY_MS} ms");
                    self.delay.delay_ms(MQTT_RETRY_DELAY_MS);
                }
            }
        }

        self.state.broker_connected = self.broker.is_connected();

        if !self.state.broker_connected {
            error!("Broker unreachable after {MQTT_CONNECT_ATTEMPTS} attempts");
        }

        self.state.broker_connected
    }
}
