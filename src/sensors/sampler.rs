use crate::traits::{AdcReader, Delay};

/// Full-scale code of the 12-bit ADC.
pub const ADC_FULL_SCALE: u16 = 4095;
/// Voltage at full scale with 11 dB attenuation.
pub const ADC_REFERENCE_VOLTAGE: f32 = 3.3;
/// Pause after each sample so consecutive reads don't pick up the same noise.
pub const SAMPLE_DELAY_MS: u32 = 10;

pub fn code_to_voltage(code: u16) -> f32 {
    (code.min(ADC_FULL_SCALE) as f32 / ADC_FULL_SCALE as f32) * ADC_REFERENCE_VOLTAGE
}

/// Averages `sample_count` conversions of one ADC channel into volts.
pub struct VoltageSampler<A: AdcReader, D: Delay> {
    adc: A,
    delay: D,
    sample_count: u8,
}

impl<A: AdcReader, D: Delay> VoltageSampler<A, D> {
    /// `sample_count` must be at least 1, see `Configuration::validate`.
    pub fn new(adc: A, delay: D, sample_count: u8) -> Self {
        Self {
            adc,
            delay,
            sample_count,
        }
    }

    /// Blocks for `sample_count * SAMPLE_DELAY_MS`.
    pub fn sample_voltage(&mut self) -> f32 {
        let mut sum = 0.0f32;

        for _ in 0..self.sample_count {
            sum += code_to_voltage(self.adc.read_raw());
            self.delay.delay_ms(SAMPLE_DELAY_MS);
        }

        sum / self.sample_count as f32
    }

    pub fn read_raw_value(&mut self) -> u16 {
        self.adc.read_raw()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    struct ScriptedAdc(VecDeque<u16>);

    impl AdcReader for ScriptedAdc {
        fn read_raw(&mut self) -> u16 {
            self.0.pop_front().unwrap_or(0)
        }
    }

    #[derive(Default)]
    struct RecordingDelay(Vec<u32>);

    impl Delay for RecordingDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.0.push(ms);
        }
    }

    #[test]
    fn code_to_voltage_bounds() {
        assert_eq!(code_to_voltage(0), 0.0);
        assert!((code_to_voltage(4095) - 3.3).abs() < 1e-6);
        assert!((code_to_voltage(2048) - 2048.0 / 4095.0 * 3.3).abs() < 1e-6);
    }

    #[test]
    fn code_to_voltage_stays_in_range() {
        for code in 0..=ADC_FULL_SCALE {
            let v = code_to_voltage(code);
            assert!((0.0..=ADC_REFERENCE_VOLTAGE).contains(&v), "code {code} -> {v}");
        }
    }

    #[test]
    fn average_of_ten_samples() {
        let codes = [2500, 2510, 2490, 2530, 2505, 2495, 2520, 2480, 2515, 2485];
        let mut sampler = VoltageSampler::new(
            ScriptedAdc(codes.iter().copied().collect()),
            RecordingDelay::default(),
            10,
        );

        let expected = codes.iter().map(|&c| code_to_voltage(c)).sum::<f32>() / 10.0;
        assert!((sampler.sample_voltage() - expected).abs() < 1e-6);
    }

    #[test]
    fn sampling_waits_between_reads() {
        let mut sampler = VoltageSampler::new(
            ScriptedAdc(VecDeque::from(vec![1000; 10])),
            RecordingDelay::default(),
            10,
        );
        sampler.sample_voltage();

        assert_eq!(sampler.delay.0, vec![SAMPLE_DELAY_MS; 10]);
        assert_eq!(sampler.delay.0.iter().sum::<u32>(), 100);
    }
}
