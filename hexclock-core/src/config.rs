//! Session configuration
//!
//! Everything the control loop may want to persist or tweak lives here;
//! the calibration matrices are stored separately (see
//! [`crate::calibration::persist`]).

use hexclock_display::{Color, Rotation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::layout::AxisLabels;

/// Default number of drain polls before giving up on a release
pub const DEFAULT_DRAIN_POLL_LIMIT: u32 = 2000;
/// Default pause between drain polls
pub const DEFAULT_DRAIN_POLL_INTERVAL_US: u32 = 1000;

/// Foreground/background pair for the whole face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorScheme {
    pub fg: Color,
    pub bg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

/// Touch polling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// Polls while waiting for release before reporting a stuck panel
    pub drain_poll_limit: u32,
    /// Delay between drain polls
    pub drain_poll_interval_us: u32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            drain_poll_limit: DEFAULT_DRAIN_POLL_LIMIT,
            drain_poll_interval_us: DEFAULT_DRAIN_POLL_INTERVAL_US,
        }
    }
}

/// Initial session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    pub colors: ColorScheme,
    pub rotation: Rotation,
    pub touch: TouchConfig,
    /// Fixed strings; not persisted
    #[cfg_attr(feature = "serde", serde(skip))]
    pub axis_labels: AxisLabels,
}
