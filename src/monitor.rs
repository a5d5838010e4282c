use log::info;

use crate::config::Configuration;
use crate::connectivity::{ConnectionState, Connectivity, PublishOutcome};
use crate::reading::{DeviceStatus, Reading};
use crate::sensors::{ph_sensor::PhSensor, sampler::VoltageSampler};
use crate::traits::{AdcReader, Broker, Clock, Delay, Network};

/// Result of one control loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub state: ConnectionState,
    /// Present when the publish interval elapsed on this iteration.
    pub reading: Option<(Reading, PublishOutcome)>,
}

pub struct PhMonitor<A, N, B, D, C>
where
    A: AdcReader,
    N: Network,
    B: Broker,
    D: Delay + Clone,
    C: Clock,
{
    sampler: VoltageSampler<A, D>,
    ph_sensor: PhSensor,
    link: Connectivity<N, B, D>,
    clock: C,
    publish_interval_ms: u64,
    last_publish_ms: u64,
    last_reading: Option<Reading>,
}

impl<A, N, B, D, C> PhMonitor<A, N, B, D, C>
where
    A: AdcReader,
    N: Network,
    B: Broker,
    D: Delay + Clone,
    C: Clock,
{
    pub fn new(config: &Configuration, adc: A, network: N, broker: B, delay: D, clock: C) -> Self {
        Self {
            sampler: VoltageSampler::new(adc, delay.clone(), config.sample_count),
            ph_sensor: PhSensor::new(config.calibration),
            link: Connectivity::new(
                network,
                broker,
                delay,
                &config.client_id,
                &config.device_name,
            ),
            clock,
            publish_interval_ms: config.publish_interval_ms,
            last_publish_ms: 0,
            last_reading: None,
        }
    }

    pub fn setup(&mut self) -> ConnectionState {
        let state = self.link.start();
        self.link.publish_status(DeviceStatus::Online);
        state
    }

    pub fn tick(&mut self) -> Tick {
        let state = self.link.service();

        let now = self.clock.millis();
        if now.saturating_sub(self.last_publish_ms) < self.publish_interval_ms {
            return Tick {
                state,
                reading: None,
            };
        }
        self.last_publish_ms = now;

        let reading = self.measure();
        let outcome = self.link.publish_reading(&reading);

        Tick {
            state,
            reading: Some((reading, outcome)),
        }
    }

    /// Sample and convert, timestamped against the monitor clock.
    pub fn measure(&mut self) -> Reading {
        let voltage = self.sampler.sample_voltage();
        let ph = self.ph_sensor.voltage_to_ph(voltage);
        let reading = Reading::new(voltage, ph, self.clock.millis() / 1000);

        info!(
            "Voltage: {:.3} V, pH: {:.2} ({})",
            reading.voltage,
            reading.ph,
            reading.class().as_str()
        );

        self.last_reading = Some(reading);
        reading
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.last_reading
    }

    pub fn connectivity(&self) -> &Connectivity<N, B, D> {
        &self.link
    }
}
