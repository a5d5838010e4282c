use crate::string_error::StringError;

pub const PH_NEUTRAL: f32 = 7.0;
pub const PH_MIN: f32 = 0.0;
pub const PH_MAX: f32 = 14.0;

/// Linear probe model: `pH = 7.0 - (v - acid_voltage) / slope`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Probe voltage the model maps to pH 7.0.
    pub acid_voltage: f32,
    /// Volts per pH unit.
    pub slope: f32,
}

impl Calibration {
    /// PH-4502C read through a 3.3 V ADC reference.
    pub const PH4502C_3V3: Self = Self {
        acid_voltage: 2.032,
        slope: 0.1773,
    };

    pub fn new(acid_voltage: f32, slope: f32) -> Result<Self, StringError> {
        let calibration = Self {
            acid_voltage,
            slope,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    pub fn validate(&self) -> Result<(), StringError> {
        if !self.acid_voltage.is_finite() {
            return Err(StringError("Calibration voltage must be finite"));
        }

        if self.slope == 0.0 || !self.slope.is_finite() {
            return Err(StringError("Calibration slope must be finite and non-zero"));
        }

        Ok(())
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::PH4502C_3V3
    }
}

pub struct PhSensor {
    calibration: Calibration,
}

impl PhSensor {
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }

    /// Out-of-range results are saturated to 0..=14, there is no fault signal.
    pub fn voltage_to_ph(&self, voltage: f32) -> f32 {
        let ph = PH_NEUTRAL - (voltage - self.calibration.acid_voltage) / self.calibration.slope;
        ph.clamp(PH_MIN, PH_MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhClass {
    Acidic,
    Neutral,
    Alkaline,
}

impl PhClass {
    pub fn from_ph(ph: f32) -> Self {
        if ph < 6.5 {
            PhClass::Acidic
        } else if ph > 7.5 {
            PhClass::Alkaline
        } else {
            PhClass::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhClass::Acidic => "acidic",
            PhClass::Neutral => "neutral",
            PhClass::Alkaline => "alkaline",
        }
    }
}
