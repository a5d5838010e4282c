//! Probe bring-up: prints voltage and pH every two seconds, no WiFi or MQTT.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_svc::hal::{delay::FreeRtos, peripherals::Peripherals};
    use esp_ph_sensor::config::DEFAULT_SAMPLE_COUNT;
    use esp_ph_sensor::esp::{adc_helper::PhProbeAdc, FreeRtosDelay};
    use esp_ph_sensor::sensors::{
        ph_sensor::{Calibration, PhClass, PhSensor},
        sampler::VoltageSampler,
    };
    use log::info;

    const READ_INTERVAL_MS: u32 = 2000;

    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;
    let adc = PhProbeAdc::new(peripherals.adc1, peripherals.pins.gpio34)?;

    let mut sampler = VoltageSampler::new(adc, FreeRtosDelay, DEFAULT_SAMPLE_COUNT);
    let ph_sensor = PhSensor::new(Calibration::default());

    FreeRtos::delay_ms(2000);
    info!("Probe test running, dip the probe into a solution");

    loop {
        let raw = sampler.read_raw_value();
        let voltage = sampler.sample_voltage();
        let ph = ph_sensor.voltage_to_ph(voltage);

        info!(
            "Voltage: {voltage:6.3} V | pH: {ph:6.2} | {} (raw {raw})",
            PhClass::from_ph(ph).as_str()
        );

        FreeRtos::delay_ms(READ_INTERVAL_MS);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("ph-probe-test runs on the ESP32, build it for an espidf target");
}
