//! HexClock Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the display core talks to. Board
//! support code implements them against the real EEPROM and touch
//! controller; the `mock` feature provides in-memory stand-ins for host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Control loop / board support           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hexclock-core (session, calibration)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hexclock-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::ByteStorage`], [`storage::LongStorage`] - Persistent storage
//! - [`touch::TouchSensor`] - Resistive touch sampling
//! - [`DelayNs`] - Blocking delays (re-exported from `embedded-hal`)

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod storage;
pub mod touch;

// Re-export key traits at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use storage::{ByteStorage, LongStorage, StorageError};
pub use touch::{RawSample, SensorError, TouchSensor};
