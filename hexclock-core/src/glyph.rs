//! Glyph cells
//!
//! One large character on the clock face plus, optionally, the 4-bit
//! pattern of its value in the binary rows below. The two are redrawn
//! independently: a digit can keep its glyph while its nibble changes
//! (hex `1` vs decimal `1` in a different position) and vice versa.

use hexclock_display::{Color, DisplayError, DrawSurface, Font};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::layout::{bits_slot, Block, Nibble, BITS_FONT_SCALE, SYMBOL_FONT_SCALE};

/// What a cell shows, which decides where its bit pattern goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellRole {
    HourHigh,
    HourLow,
    MinuteHigh,
    MinuteLow,
    SecondHigh,
    SecondLow,
    DayHigh,
    DayLow,
    MonthHigh,
    MonthLow,
    YearHigh,
    YearLow,
    /// Colon or slash; no binary slot
    Separator,
}

impl CellRole {
    /// Top-left corner of this role's binary slot
    pub const fn bits_slot(self) -> Option<(u16, u16)> {
        let (block, row, nibble) = match self {
            CellRole::HourHigh => (Block::Time, 0, Nibble::High),
            CellRole::HourLow => (Block::Time, 0, Nibble::Low),
            CellRole::MinuteHigh => (Block::Time, 1, Nibble::High),
            CellRole::MinuteLow => (Block::Time, 1, Nibble::Low),
            CellRole::SecondHigh => (Block::Time, 2, Nibble::High),
            CellRole::SecondLow => (Block::Time, 2, Nibble::Low),
            CellRole::MonthHigh => (Block::Date, 0, Nibble::High),
            CellRole::MonthLow => (Block::Date, 0, Nibble::Low),
            CellRole::DayHigh => (Block::Date, 1, Nibble::High),
            CellRole::DayLow => (Block::Date, 1, Nibble::Low),
            CellRole::YearHigh => (Block::Date, 2, Nibble::High),
            CellRole::YearLow => (Block::Date, 2, Nibble::Low),
            CellRole::Separator => return None,
        };
        Some(bits_slot(block, row, nibble))
    }
}

/// Binary rendering of every nibble, most significant bit first
const NIBBLE_BITS: [&str; 16] = [
    "0000", "0001", "0010", "0011", "0100", "0101", "0110", "0111", "1000", "1001", "1010",
    "1011", "1100", "1101", "1110", "1111",
];

/// Low nibble of `value` as `'0'`/`'1'` text
fn nibble_bits(value: u8) -> &'static str {
    NIBBLE_BITS[usize::from(value & 0x0F)]
}

/// A character slot with dirty tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphCell {
    x: u16,
    y: u16,
    current: char,
    /// Glyph still on screen that must be painted over before drawing
    previous: Option<char>,
    value: u8,
    symbol_dirty: bool,
    bits_dirty: bool,
    role: CellRole,
}

impl GlyphCell {
    /// New cell showing `ch` with value 0; both representations dirty
    pub const fn new(ch: char, x: u16, y: u16, role: CellRole) -> Self {
        Self {
            x,
            y,
            current: ch,
            previous: None,
            value: 0,
            symbol_dirty: true,
            bits_dirty: true,
            role,
        }
    }

    /// Update the cell
    ///
    /// Clears both dirty flags, then marks the symbol dirty if `ch` changed
    /// and the bits dirty if `value` changed. `force` marks both. Returns
    /// whether anything needs drawing.
    pub fn set_value(&mut self, value: u8, ch: char, force: bool) -> bool {
        self.symbol_dirty = false;
        self.bits_dirty = false;

        if ch == self.current && value == self.value && !force {
            return false;
        }

        if ch != self.current || force {
            self.previous = Some(self.current);
            self.current = ch;
            self.symbol_dirty = true;
        }

        if value != self.value || force {
            self.value = value;
            self.bits_dirty = true;
        }

        self.symbol_dirty || self.bits_dirty
    }

    /// Draw the glyph if it changed
    pub fn draw_symbol<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        fg: Color,
        bg: Color,
    ) -> Result<(), DisplayError> {
        if !self.symbol_dirty {
            return Ok(());
        }

        surface.set_font(Font::Large)?;
        surface.set_font_scale(SYMBOL_FONT_SCALE)?;

        // Large glyphs have no background; overprint the old one in bg
        if let Some(previous) = self.previous {
            surface.set_cursor(self.x, self.y)?;
            surface.set_text_color(bg, bg)?;
            surface.print_char(previous)?;
        }

        surface.set_cursor(self.x, self.y)?;
        surface.set_text_color(fg, bg)?;
        surface.print_char(self.current)?;

        self.symbol_dirty = false;
        Ok(())
    }

    /// Draw the 4-bit pattern if the value changed
    pub fn draw_bits<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        fg: Color,
        bg: Color,
    ) -> Result<(), DisplayError> {
        if !self.bits_dirty {
            return Ok(());
        }

        if let Some((x, y)) = self.role.bits_slot() {
            surface.set_font(Font::Internal)?;
            surface.set_font_scale(BITS_FONT_SCALE)?;
            surface.set_text_color(fg, bg)?;
            surface.set_cursor(x, y)?;
            surface.print(nibble_bits(self.value))?;
        }

        self.bits_dirty = false;
        Ok(())
    }

    pub fn mark_symbol_dirty(&mut self) {
        self.symbol_dirty = true;
    }

    pub fn mark_bits_dirty(&mut self) {
        self.bits_dirty = true;
    }

    /// The screen was cleared: redraw both, nothing left to erase
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.symbol_dirty = true;
        self.bits_dirty = true;
    }

    pub fn current(&self) -> char {
        self.current
    }

    pub fn previous(&self) -> Option<char> {
        self.previous
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn role(&self) -> CellRole {
        self.role
    }

    pub fn origin(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    pub fn is_symbol_dirty(&self) -> bool {
        self.symbol_dirty
    }

    pub fn is_bits_dirty(&self) -> bool {
        self.bits_dirty
    }
}
