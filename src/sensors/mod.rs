pub mod ph_sensor;
pub mod sampler;
