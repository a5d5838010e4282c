use std::net::Ipv4Addr;

use anyhow::anyhow;
use esp_idf_svc::hal::{modem::Modem, peripheral::Peripheral};
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    nvs::EspDefaultNvsPartition,
    wifi::{AuthMethod, ClientConfiguration, Configuration as WifiConfiguration, EspWifi},
};
use log::{info, warn};

use crate::config::Configuration;
use crate::traits::Network;

/// Station-mode WiFi. Connection is started here and polled by
/// `Connectivity`, nothing in this type blocks.
pub struct EspNetwork<'a> {
    wifi: EspWifi<'a>,
}

impl<'a> EspNetwork<'a> {
    pub fn new(
        config: &Configuration,
        modem: impl Peripheral<P = Modem> + 'a,
        sys_loop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
    ) -> anyhow::Result<Self> {
        let auth_method = if config.wifi_passphrase.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        let wifi_configuration = WifiConfiguration::Client(ClientConfiguration {
            ssid: config
                .wifi_ssid
                .as_str()
                .try_into()
                .map_err(|_| anyhow!("WiFi SSID too long"))?,
            bssid: None,
            auth_method,
            password: config
                .wifi_passphrase
                .as_str()
                .try_into()
                .map_err(|_| anyhow!("WiFi passphrase too long"))?,
            channel: None,
            ..Default::default()
        });

        let mut wifi = EspWifi::new(modem, sys_loop, Some(nvs))?;
        wifi.set_configuration(&wifi_configuration)?;
        info!("WiFi SSID: {}", config.wifi_ssid);

        Ok(Self { wifi })
    }
}

impl Network for EspNetwork<'_> {
    fn begin(&mut self) -> anyhow::Result<()> {
        if !self.wifi.is_started()? {
            self.wifi.start()?;
            info!("Wifi started");
        }

        self.wifi.connect()?;
        Ok(())
    }

    fn disconnect(&mut self) {
        if let Err(e) = self.wifi.disconnect() {
            warn!("WiFi disconnect failed: {e}");
        }
    }

    fn is_connected(&self) -> bool {
        self.wifi.is_up().unwrap_or(false)
    }

    fn local_ip(&self) -> Option<Ipv4Addr> {
        self.wifi
            .sta_netif()
            .get_ip_info()
            .ok()
            .map(|info| info.ip)
            .filter(|ip| !ip.is_unspecified())
    }
}
