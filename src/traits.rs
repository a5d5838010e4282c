//! Hardware capabilities the monitor is written against.
//!
//! The device implementations live in `crate::esp`; tests drive the same
//! logic with in-memory fakes.

use std::net::Ipv4Addr;

/// One analog input channel.
pub trait AdcReader {
    /// Single raw conversion, 0..=4095 on a 12-bit ADC.
    fn read_raw(&mut self) -> u16;
}

pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Monotonic milliseconds since boot.
pub trait Clock {
    fn millis(&self) -> u64;
}

/// WiFi station interface.
pub trait Network {
    /// Start associating with the configured access point. Does not wait
    /// for the link to come up.
    fn begin(&mut self) -> anyhow::Result<()>;

    fn disconnect(&mut self);

    /// True once associated and an address has been assigned.
    fn is_connected(&self) -> bool;

    fn local_ip(&self) -> Option<Ipv4Addr>;
}

/// Publish-only pub/sub client.
pub trait Broker {
    /// A single connection attempt.
    fn connect(&mut self, client_id: &str) -> anyhow::Result<()>;

    fn is_connected(&self) -> bool;

    /// Give the client a chance to run its keep-alive and I/O.
    fn poll(&mut self);

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> anyhow::Result<()>;
}
