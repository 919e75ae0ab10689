//! Board-agnostic display state model for the HexClock face
//!
//! This crate contains everything between the control loop and the panel
//! driver that does not depend on specific hardware:
//!
//! - Bit-field codec for packed widget storage
//! - Widgets, glyph cells and indicator dots with dirty tracking
//! - Touch calibration, its EEPROM layout and widget hit dispatch
//! - Bounded touch polling
//! - The display session sequencing minimal and full refreshes
//! - Configuration types

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod bitfield;
pub mod calibration;
pub mod config;
pub mod dot;
pub mod glyph;
pub mod layout;
pub mod session;
pub mod touch;
pub mod widget;

pub use calibration::{CalibrationError, CalibrationMatrix, CalibrationSet, Point};
pub use config::{ColorScheme, SessionConfig, TouchConfig};
pub use dot::IndicatorDot;
pub use glyph::{CellRole, GlyphCell};
pub use session::{
    DisplaySession, DrawScope, NumberBase, RefreshMode, SessionError, TouchOutcome,
};
pub use touch::{poll_touch, DrainMode, TouchError};
pub use widget::{Widget, WidgetSpec, WidgetStyle};
