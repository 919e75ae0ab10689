//! Persistent storage abstractions
//!
//! The panel keeps its touch calibration in a small byte-addressed
//! non-volatile memory (EEPROM on the original board). Chip HALs implement
//! [`ByteStorage`]; the 32-bit layer in [`LongStorage`] is provided for every
//! implementation.

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Address (or the last byte of a multi-byte value) is past the end of the device
    OutOfRange,
    /// The device reported a failure
    Device,
}

/// Byte-addressed persistent storage
///
/// Implementations should skip the physical write when the stored byte
/// already holds `value`, to limit wear.
pub trait ByteStorage {
    /// Number of addressable bytes
    fn capacity(&self) -> usize;

    /// Read the byte at `address`
    fn read_byte(&mut self, address: u16) -> Result<u8, StorageError>;

    /// Write `value` at `address` if it differs from the stored byte
    fn update_byte(&mut self, address: u16, value: u8) -> Result<(), StorageError>;
}

/// 32-bit values stored big-endian (most significant byte first) across
/// four consecutive addresses
pub trait LongStorage: ByteStorage {
    /// Write a 32-bit value at `address..address + 4`
    fn write_long(&mut self, address: u16, value: u32) -> Result<(), StorageError> {
        let addresses = long_addresses(address)?;
        for (address, byte) in addresses.into_iter().zip(value.to_be_bytes()) {
            self.update_byte(address, byte)?;
        }
        Ok(())
    }

    /// Read an unsigned 32-bit value from `address..address + 4`
    fn read_unsigned_long(&mut self, address: u16) -> Result<u32, StorageError> {
        let addresses = long_addresses(address)?;
        let mut bytes = [0u8; 4];
        for (slot, address) in bytes.iter_mut().zip(addresses) {
            *slot = self.read_byte(address)?;
        }
        Ok(u32::from_be_bytes(bytes))
    }

    /// Read a signed 32-bit value from `address..address + 4`
    fn read_signed_long(&mut self, address: u16) -> Result<i32, StorageError> {
        self.read_unsigned_long(address)
            .map(|value| i32::from_be_bytes(value.to_be_bytes()))
    }
}

// Blanket implementation for every byte store
impl<T: ByteStorage> LongStorage for T {}

fn long_addresses(address: u16) -> Result<[u16; 4], StorageError> {
    let last = address.checked_add(3).ok_or(StorageError::OutOfRange)?;
    Ok([address, address + 1, address + 2, last])
}
