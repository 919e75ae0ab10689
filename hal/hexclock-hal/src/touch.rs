//! Touch sensor abstraction
//!
//! Resistive touch controllers report raw ADC coordinates. Mapping those to
//! display pixels is the calibration layer's job, not the sensor's.

/// Raw touch controller reading (ADC units, not pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub x: u16,
    pub y: u16,
}

impl RawSample {
    /// Create a raw sample
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Touch sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus communication with the touch controller failed
    Communication,
    /// Controller has not finished a conversion
    NotReady,
}

/// Polled touch sensor
pub trait TouchSensor {
    /// Enable touch sampling
    ///
    /// Called before every poll; implementations may treat repeated calls
    /// as a no-op.
    fn enable(&mut self) -> Result<(), SensorError>;

    /// Check whether the panel is currently pressed
    fn is_touched(&mut self) -> Result<bool, SensorError>;

    /// Read the current raw coordinates
    fn read_raw(&mut self) -> Result<RawSample, SensorError>;
}
