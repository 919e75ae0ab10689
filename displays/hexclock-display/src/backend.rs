//! Draw surface trait
//!
//! Defines the primitives the display core needs from a panel driver.

use crate::color::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel controller
    Communication,
    /// Coordinates or dimensions outside the panel
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Screen orientation
///
/// Only the two landscape orientations are supported; each has its own
/// touch calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Normal orientation
    #[default]
    Deg0,
    /// Upside down
    Deg180,
}

impl Rotation {
    /// The other orientation
    pub const fn flipped(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg0,
        }
    }
}

/// Text fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Controller's built-in font, used for labels and binary rows
    Internal,
    /// Large custom glyph font used for the digit cells
    ///
    /// Custom glyphs do not erase their background, so a replaced glyph has
    /// to be overpainted explicitly.
    Large,
}

/// Rectangle in panel pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    /// Create a rectangle
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Draw surface trait
///
/// Cursor-based text output in the style of TFT controller libraries: text
/// is printed at the current cursor with the current font, scale and colours.
pub trait DrawSurface {
    /// Fill the whole window with one colour
    fn fill_window(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Set the panel orientation
    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError>;

    /// Fill a rounded rectangle
    fn fill_round_rect(&mut self, bounds: Bounds, radius: u16, color: Color)
        -> Result<(), DisplayError>;

    /// Stroke a rounded rectangle outline
    fn draw_round_rect(&mut self, bounds: Bounds, radius: u16, color: Color)
        -> Result<(), DisplayError>;

    /// Fill a circle centred at (`x`, `y`)
    fn fill_circle(&mut self, x: u16, y: u16, radius: u16, color: Color)
        -> Result<(), DisplayError>;

    /// Stroke a circle outline centred at (`x`, `y`)
    fn draw_circle(&mut self, x: u16, y: u16, radius: u16, color: Color)
        -> Result<(), DisplayError>;

    /// Move the text cursor
    fn set_cursor(&mut self, x: u16, y: u16) -> Result<(), DisplayError>;

    /// Set text foreground and background colours
    ///
    /// A `Transparent` background leaves the pixels behind the glyphs untouched.
    fn set_text_color(&mut self, fg: Color, bg: Color) -> Result<(), DisplayError>;

    /// Select the text font
    fn set_font(&mut self, font: Font) -> Result<(), DisplayError>;

    /// Select the text scale (0 = native size)
    fn set_font_scale(&mut self, scale: u8) -> Result<(), DisplayError>;

    /// Print text at the cursor and advance it
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Print a single character at the cursor
    fn print_char(&mut self, ch: char) -> Result<(), DisplayError> {
        let mut buf = [0u8; 4];
        self.print(ch.encode_utf8(&mut buf))
    }
}
