//! Touch polling
//!
//! One press is sampled once. With [`DrainMode::WaitForRelease`] the poll
//! then keeps reading until the finger lifts, so a long press is not
//! reported again on the next poll. The drain is bounded: a sensor that
//! never reports release fails with [`TouchError::DrainTimeout`] instead of
//! hanging the control loop.

use hexclock_hal::{DelayNs, SensorError, TouchSensor};

use crate::calibration::{calibrate, CalibrationError, CalibrationMatrix, Point};
use crate::config::TouchConfig;

/// What to do after a press was sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainMode {
    /// Wait (bounded) until the panel is released
    #[default]
    WaitForRelease,
    /// Return straight after the first sample
    Immediate,
}

/// Touch polling errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// The touch controller failed
    Sensor(SensorError),
    /// The active matrix has never been calibrated
    UncalibratedTransform,
    /// The press was sampled but the panel never reported release
    DrainTimeout(Point),
    /// The calibrated point does not fit display coordinates
    Overflow,
    /// Any other calibration failure
    Calibration(CalibrationError),
}

impl From<SensorError> for TouchError {
    fn from(err: SensorError) -> Self {
        TouchError::Sensor(err)
    }
}

impl From<CalibrationError> for TouchError {
    fn from(err: CalibrationError) -> Self {
        match err {
            CalibrationError::UncalibratedTransform => TouchError::UncalibratedTransform,
            CalibrationError::Overflow => TouchError::Overflow,
            CalibrationError::DegenerateReference | CalibrationError::Storage(_) => {
                TouchError::Calibration(err)
            }
        }
    }
}

/// Poll the sensor once
///
/// Returns `Ok(None)` when the panel is not pressed and the calibrated
/// point of the press otherwise.
pub fn poll_touch<T, D>(
    sensor: &mut T,
    delay: &mut D,
    matrix: &CalibrationMatrix,
    config: &TouchConfig,
    mode: DrainMode,
) -> Result<Option<Point>, TouchError>
where
    T: TouchSensor + ?Sized,
    D: DelayNs + ?Sized,
{
    if !matrix.is_calibrated() {
        return Err(TouchError::UncalibratedTransform);
    }

    sensor.enable()?;
    if !sensor.is_touched()? {
        return Ok(None);
    }

    let raw = sensor.read_raw()?;
    let point = calibrate(raw, matrix)?;
    trace!("touch raw ({}, {}) -> ({}, {})", raw.x, raw.y, point.x, point.y);

    if mode == DrainMode::WaitForRelease {
        let mut polls = 0u32;
        while sensor.is_touched()? {
            if polls >= config.drain_poll_limit {
                warn!("touch release not seen after {} polls", polls);
                return Err(TouchError::DrainTimeout(point));
            }
            // Keep the controller's sample queue empty
            let _ = sensor.read_raw()?;
            delay.delay_us(config.drain_poll_interval_us);
            polls += 1;
        }
    }

    Ok(Some(point))
}
