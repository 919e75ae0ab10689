//! Calibration persistence
//!
//! EEPROM layout:
//!
//! | Address | Content                                    |
//! |---------|--------------------------------------------|
//! | 10      | signature `0x30183018` once calibrated      |
//! | 100     | 0° matrix: a, b, c, d, e, f, divider        |
//! | 128     | 180° matrix, same order                     |
//!
//! Every value is a signed 32-bit long stored big-endian.

use hexclock_display::Rotation;
use hexclock_hal::{LongStorage, StorageError};

use super::matrix::{CalibrationMatrix, CalibrationSet};
use super::CalibrationError;

/// Address of the "panel is calibrated" signature
pub const SIGNATURE_ADDRESS: u16 = 10;
/// Signature value
pub const SIGNATURE_VALUE: u32 = 0x3018_3018;
/// First byte of the 0° matrix
pub const CALIBRATION_ADDRESS: u16 = 100;
/// Size of one stored matrix
pub const MATRIX_BYTES: u16 = 7 * 4;

const fn matrix_address(rotation: Rotation) -> u16 {
    match rotation {
        Rotation::Deg0 => CALIBRATION_ADDRESS,
        Rotation::Deg180 => CALIBRATION_ADDRESS + MATRIX_BYTES,
    }
}

/// Read one matrix starting at `address`
pub fn load_matrix<S: LongStorage + ?Sized>(
    storage: &mut S,
    address: u16,
) -> Result<CalibrationMatrix, StorageError> {
    let mut values = [0i32; 7];
    for (offset, value) in (0u16..).step_by(4).zip(values.iter_mut()) {
        let at = address.checked_add(offset).ok_or(StorageError::OutOfRange)?;
        *value = storage.read_signed_long(at)?;
    }
    Ok(CalibrationMatrix::from_array(values))
}

/// Write one matrix starting at `address`
pub fn store_matrix<S: LongStorage + ?Sized>(
    storage: &mut S,
    address: u16,
    matrix: &CalibrationMatrix,
) -> Result<(), StorageError> {
    for (offset, value) in (0u16..).step_by(4).zip(matrix.to_array()) {
        let at = address.checked_add(offset).ok_or(StorageError::OutOfRange)?;
        storage.write_long(at, u32::from_be_bytes(value.to_be_bytes()))?;
    }
    Ok(())
}

/// Load both matrices
///
/// Without the signature the stored words are not trusted and both
/// orientations come back as [`CalibrationMatrix::UNCALIBRATED`].
pub fn load_calibration<S: LongStorage + ?Sized>(
    storage: &mut S,
) -> Result<CalibrationSet, CalibrationError> {
    if !is_calibrated(storage)? {
        warn!("calibration signature missing");
        return Ok(CalibrationSet::new(
            CalibrationMatrix::UNCALIBRATED,
            CalibrationMatrix::UNCALIBRATED,
        ));
    }

    let deg0 = load_matrix(storage, matrix_address(Rotation::Deg0))?;
    let deg180 = load_matrix(storage, matrix_address(Rotation::Deg180))?;
    debug!(
        "calibration loaded (dividers {}, {})",
        deg0.divider,
        deg180.divider
    );
    Ok(CalibrationSet::new(deg0, deg180))
}

/// Store both matrices and mark the panel calibrated
pub fn store_calibration<S: LongStorage + ?Sized>(
    storage: &mut S,
    set: &CalibrationSet,
) -> Result<(), CalibrationError> {
    store_matrix(storage, matrix_address(Rotation::Deg0), &set.deg0)?;
    store_matrix(storage, matrix_address(Rotation::Deg180), &set.deg180)?;
    write_signature(storage)?;
    info!("calibration stored");
    Ok(())
}

/// Whether the calibration signature is present
pub fn is_calibrated<S: LongStorage + ?Sized>(storage: &mut S) -> Result<bool, StorageError> {
    Ok(storage.read_unsigned_long(SIGNATURE_ADDRESS)? == SIGNATURE_VALUE)
}

pub fn write_signature<S: LongStorage + ?Sized>(storage: &mut S) -> Result<(), StorageError> {
    storage.write_long(SIGNATURE_ADDRESS, SIGNATURE_VALUE)
}

/// Forget the signature so the panel is recalibrated on next boot
pub fn clear_signature<S: LongStorage + ?Sized>(storage: &mut S) -> Result<(), StorageError> {
    storage.write_long(SIGNATURE_ADDRESS, 0)
}
