#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::{delay::FreeRtos, peripherals::Peripherals};
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_ph_sensor::config::LOOP_DELAY_MS;
    use esp_ph_sensor::esp::{
        adc_helper::PhProbeAdc, mqtt_helper::EspBroker, nvs_configuration::NvsConfiguration,
        wifi_helper::EspNetwork, EspTimerClock, FreeRtosDelay,
    };
    use esp_ph_sensor::{Configuration, PhMonitor};
    use log::{info, warn};

    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    FreeRtos::delay_ms(1000);
    info!("ESP32 pH sensor monitor");

    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let config = match NvsConfiguration::new(nvs.clone()) {
        Ok(nvs_config) => nvs_config.load(Configuration::default()),
        Err(e) => {
            warn!("{e}, using build-time configuration");
            Configuration::default()
        }
    };

    let adc = PhProbeAdc::new(peripherals.adc1, peripherals.pins.gpio34)?;
    let network = EspNetwork::new(&config, peripherals.modem, sys_loop, nvs)?;
    let broker = EspBroker::new(&config);

    let mut monitor = PhMonitor::new(&config, adc, network, broker, FreeRtosDelay, EspTimerClock);
    monitor.setup();
    info!("System ready");

    loop {
        monitor.tick();
        FreeRtos::delay_ms(LOOP_DELAY_MS);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("esp-ph-sensor runs on the ESP32, build it for an espidf target");
}
