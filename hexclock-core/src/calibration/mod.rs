//! Touch calibration
//!
//! Resistive panels report raw ADC coordinates that are offset, scaled and
//! slightly sheared relative to the pixels under them. A 3-point affine
//! solve yields six coefficients and a divider per screen orientation; they
//! are stored in EEPROM once and applied to every touch.

pub mod matrix;
pub mod persist;

use hexclock_hal::StorageError;

pub use matrix::{calibrate, resolve_widget, CalibrationMatrix, CalibrationSet, Point};
pub use persist::{
    clear_signature, is_calibrated, load_calibration, load_matrix, store_calibration, store_matrix,
    write_signature, CALIBRATION_ADDRESS, MATRIX_BYTES, SIGNATURE_ADDRESS, SIGNATURE_VALUE,
};

/// Calibration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Divider is zero; the panel must be calibrated before touches are used
    UncalibratedTransform,
    /// Result does not fit a 32-bit coordinate or coefficient
    Overflow,
    /// Reference samples are collinear
    DegenerateReference,
    /// Persistent storage failed
    Storage(StorageError),
}

impl From<StorageError> for CalibrationError {
    fn from(err: StorageError) -> Self {
        CalibrationError::Storage(err)
    }
}
