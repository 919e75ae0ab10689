//! Indicator dots
//!
//! Small filled circles (AM/PM markers). Drawing is edge-triggered so a dot
//! that is already in the requested state costs no bus traffic.

use hexclock_display::{Color, DisplayError, DrawSurface};

/// Two-state circular marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorDot {
    x: u16,
    y: u16,
    radius: u16,
    on: bool,
}

impl IndicatorDot {
    /// New dot, initially off
    pub const fn new(x: u16, y: u16, radius: u16) -> Self {
        Self {
            x,
            y,
            radius,
            on: false,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Paint the dot in `color` unless it is already lit
    pub fn turn_on<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        color: Color,
    ) -> Result<(), DisplayError> {
        if self.on {
            return Ok(());
        }
        surface.fill_circle(self.x, self.y, self.radius, color)?;
        self.on = true;
        Ok(())
    }

    /// Paint over the dot in `erase` unless it is already dark
    pub fn turn_off<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        erase: Color,
    ) -> Result<(), DisplayError> {
        if !self.on {
            return Ok(());
        }
        surface.fill_circle(self.x, self.y, self.radius, erase)?;
        self.on = false;
        Ok(())
    }

    /// Redraw a lit dot after the screen under it was cleared
    pub fn force_repaint<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        color: Color,
    ) -> Result<(), DisplayError> {
        if self.on {
            surface.fill_circle(self.x, self.y, self.radius, color)?;
        }
        Ok(())
    }
}
