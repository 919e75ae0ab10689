//! Colour palette
//!
//! Widgets store colours as 4-bit palette indices. The palette is closed:
//! 8 primaries plus a transparent sentinel meaning "do not paint".

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Palette colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Red = 2,
    Green = 3,
    Cyan = 4,
    Magenta = 5,
    Yellow = 6,
    White = 7,
    /// Not painted (transparent widget fill, border or text background)
    Transparent = 8,
}

/// Every palette colour, indexed by its 4-bit code
pub const PALETTE: [Color; 9] = [
    Color::Black,
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::White,
    Color::Transparent,
];

/// Panel colour per palette index
const PANEL: [Option<Rgb565>; 9] = [
    Some(Rgb565::BLACK),
    Some(Rgb565::BLUE),
    Some(Rgb565::RED),
    Some(Rgb565::GREEN),
    Some(Rgb565::CYAN),
    Some(Rgb565::MAGENTA),
    Some(Rgb565::YELLOW),
    Some(Rgb565::WHITE),
    None,
];

/// A panel colour with no palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnmappedColor(pub u16);

impl Color {
    /// 4-bit palette index
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Decode a 4-bit palette index
    ///
    /// Indices 9..=15 are never produced by [`Color::index`]; they decode to
    /// `Transparent` so a corrupted word paints nothing.
    pub fn from_index(index: u8) -> Self {
        PALETTE
            .get(usize::from(index))
            .copied()
            .unwrap_or(Color::Transparent)
    }

    /// Panel colour, or `None` for `Transparent`
    pub fn to_rgb565(self) -> Option<Rgb565> {
        PANEL.get(usize::from(self.index())).copied().flatten()
    }

    /// Map a panel colour back onto the palette
    pub fn from_rgb565(color: Rgb565) -> Result<Self, UnmappedColor> {
        PANEL
            .iter()
            .position(|entry| *entry == Some(color))
            .and_then(|index| PALETTE.get(index).copied())
            .ok_or(UnmappedColor(RawU16::from(color).into_inner()))
    }

    /// Map a raw RGB565 word onto the palette
    pub fn from_raw(raw: u16) -> Result<Self, UnmappedColor> {
        Self::from_rgb565(Rgb565::from(RawU16::new(raw)))
    }

    /// Whether this colour paints anything
    pub const fn is_transparent(self) -> bool {
        matches!(self, Color::Transparent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for color in PALETTE {
            assert_eq!(Color::from_index(color.index()), color);
        }
    }

    #[test]
    fn test_panel_round_trip() {
        for color in PALETTE.iter().copied().filter(|c| !c.is_transparent()) {
            let rgb = color.to_rgb565().unwrap();
            assert_eq!(Color::from_rgb565(rgb), Ok(color));
        }
        assert_eq!(Color::Transparent.to_rgb565(), None);
    }

    #[test]
    fn test_panel_values() {
        assert_eq!(Color::from_raw(0x0000), Ok(Color::Black));
        assert_eq!(Color::from_raw(0x001F), Ok(Color::Blue));
        assert_eq!(Color::from_raw(0xF800), Ok(Color::Red));
        assert_eq!(Color::from_raw(0x07E0), Ok(Color::Green));
        assert_eq!(Color::from_raw(0xFFFF), Ok(Color::White));
    }

    #[test]
    fn test_unmapped_raw_colour_is_rejected() {
        assert_eq!(Color::from_raw(0x1234), Err(UnmappedColor(0x1234)));
    }

    #[test]
    fn test_unused_index_fails_closed() {
        for index in 9..=15 {
            assert_eq!(Color::from_index(index), Color::Transparent);
        }
    }
}
