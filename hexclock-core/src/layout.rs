//! Screen layout constants
//!
//! Pixel positions of the binary rows on the 800x480 face. The large digit
//! positions are chosen by whoever wires up the cells.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// First column of the binary time block (hours, minutes, seconds)
pub const X_BIN_TIME: u16 = 131;
/// First column of the binary date block (month, day, year)
pub const X_BIN_DATE: u16 = 478;
/// Binary rows, top to bottom
pub const Y_BIN_ROWS: [u16; 3] = [280, 342, 404];
/// Column offset of the high nibble within a block
pub const X_BIN_OFFSET_HIGH: u16 = 0;
/// Column offset of the low nibble within a block
pub const X_BIN_OFFSET_LOW: u16 = 128;

/// Column of the "H:/M:/S:" labels
pub const X_BIN_TIME_LABEL: u16 = 68;
/// Column of the "M:/D:/Y:" labels
pub const X_BIN_DATE_LABEL: u16 = 415;

/// Scale of the large digit glyphs
pub const SYMBOL_FONT_SCALE: u8 = 2;
/// Scale of the binary rows and their labels
pub const BITS_FONT_SCALE: u8 = 3;

pub const WIDGET_CORNER_RADIUS: u16 = 5;

/// Pause between test pattern colours
pub const TEST_PATTERN_STEP_MS: u32 = 500;

/// Row labels printed left of the binary blocks on a full refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisLabels {
    pub time: [&'static str; 3],
    pub date: [&'static str; 3],
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            time: ["H:", "M:", "S:"],
            date: ["M:", "D:", "Y:"],
        }
    }
}

/// Which binary block a nibble belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Block {
    Time,
    Date,
}

/// High or low nibble of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Nibble {
    High,
    Low,
}

/// Top-left corner of a binary slot
pub const fn bits_slot(block: Block, row: usize, nibble: Nibble) -> (u16, u16) {
    let column = match block {
        Block::Time => X_BIN_TIME,
        Block::Date => X_BIN_DATE,
    };
    let offset = match nibble {
        Nibble::High => X_BIN_OFFSET_HIGH,
        Nibble::Low => X_BIN_OFFSET_LOW,
    };
    (column + offset, Y_BIN_ROWS[row])
}
