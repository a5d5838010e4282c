use esp_idf_svc::hal::{
    adc::{
        attenuation,
        oneshot::{config::AdcChannelConfig, AdcChannelDriver, AdcDriver},
        ADC1,
    },
    gpio::Gpio34,
    peripheral::Peripheral,
};

use crate::sensors::sampler::ADC_FULL_SCALE;
use crate::traits::AdcReader;

/// PH-4502C `Po` output wired to GPIO34 (ADC1 channel 6).
pub struct PhProbeAdc<'a> {
    channel: AdcChannelDriver<'a, Gpio34, AdcDriver<'a, ADC1>>,
}

impl<'a> PhProbeAdc<'a> {
    pub fn new(
        adc: impl Peripheral<P = ADC1> + 'a,
        pin: impl Peripheral<P = Gpio34> + 'a,
    ) -> anyhow::Result<Self> {
        let driver = AdcDriver::new(adc)?;

        // 11 dB gives the full 0..3.3 V range. Raw codes are converted
        // against the nominal reference, so eFuse calibration stays off.
        let channel = AdcChannelDriver::new(
            driver,
            pin,
            &AdcChannelConfig {
                attenuation: attenuation::DB_11,
                calibration: false,
                ..Default::default()
            },
        )?;

        Ok(Self { channel })
    }
}

impl AdcReader for PhProbeAdc<'_> {
    fn read_raw(&mut self) -> u16 {
        self.channel.read_raw().unwrap_or(0).min(ADC_FULL_SCALE)
    }
}
