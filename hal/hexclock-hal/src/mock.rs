//! Mock implementations for testing
//!
//! In-memory stand-ins for the HAL traits, used by unit and integration
//! tests on the host.

use crate::storage::{ByteStorage, StorageError};
use crate::touch::{RawSample, SensorError, TouchSensor};
use embedded_hal::delay::DelayNs;

/// EEPROM image held in RAM
///
/// Erased EEPROM reads back as `0xFF`, so that is the initial content.
#[derive(Debug, Clone)]
pub struct MemoryStorage<const N: usize> {
    bytes: [u8; N],
    physical_writes: usize,
}

impl<const N: usize> Default for MemoryStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MemoryStorage<N> {
    /// Create an erased storage image
    pub const fn new() -> Self {
        Self {
            bytes: [0xFF; N],
            physical_writes: 0,
        }
    }

    /// Raw contents
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes actually rewritten (unchanged updates are skipped)
    pub fn physical_writes(&self) -> usize {
        self.physical_writes
    }
}

impl<const N: usize> ByteStorage for MemoryStorage<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read_byte(&mut self, address: u16) -> Result<u8, StorageError> {
        self.bytes
            .get(address as usize)
            .copied()
            .ok_or(StorageError::OutOfRange)
    }

    fn update_byte(&mut self, address: u16, value: u8) -> Result<(), StorageError> {
        let slot = self
            .bytes
            .get_mut(address as usize)
            .ok_or(StorageError::OutOfRange)?;
        if *slot != value {
            *slot = value;
            self.physical_writes += 1;
        }
        Ok(())
    }
}

/// Touch sensor that replays a single scripted press
#[derive(Debug, Clone)]
pub struct ScriptedTouch {
    sample: RawSample,
    /// Remaining polls that report contact
    contact_polls: u32,
    /// Never releases
    stuck: bool,
    fail_reads: bool,
    enable_calls: u32,
    reads: u32,
}

impl ScriptedTouch {
    /// Sensor that never reports contact
    pub const fn idle() -> Self {
        Self {
            sample: RawSample::new(0, 0),
            contact_polls: 0,
            stuck: false,
            fail_reads: false,
            enable_calls: 0,
            reads: 0,
        }
    }

    /// One press at `sample` that stays down for `hold_polls` polls after
    /// it is first detected
    pub const fn press(sample: RawSample, hold_polls: u32) -> Self {
        Self {
            sample,
            contact_polls: hold_polls + 1,
            ..Self::idle()
        }
    }

    /// Press that never releases
    pub const fn stuck(sample: RawSample) -> Self {
        Self {
            sample,
            stuck: true,
            ..Self::idle()
        }
    }

    /// Make every `read_raw` fail with a bus error
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Number of `enable` calls seen
    pub fn enable_calls(&self) -> u32 {
        self.enable_calls
    }

    /// Number of raw reads served
    pub fn reads(&self) -> u32 {
        self.reads
    }

    /// Whether the scripted press has been released
    pub fn released(&self) -> bool {
        !self.stuck && self.contact_polls == 0
    }
}

impl TouchSensor for ScriptedTouch {
    fn enable(&mut self) -> Result<(), SensorError> {
        self.enable_calls += 1;
        Ok(())
    }

    fn is_touched(&mut self) -> Result<bool, SensorError> {
        if self.stuck {
            return Ok(true);
        }
        if self.contact_polls > 0 {
            self.contact_polls -= 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn read_raw(&mut self) -> Result<RawSample, SensorError> {
        if self.fail_reads {
            return Err(SensorError::Communication);
        }
        self.reads += 1;
        Ok(self.sample)
    }
}

/// Delay that returns immediately and totals the requested time
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingDelay {
    calls: u32,
    total_ns: u64,
}

impl CountingDelay {
    /// Create a new counting delay
    pub const fn new() -> Self {
        Self {
            calls: 0,
            total_ns: 0,
        }
    }

    /// Number of delay calls
    pub fn calls(&self) -> u32 {
        self.calls
    }

    /// Total requested delay in microseconds
    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }
}
