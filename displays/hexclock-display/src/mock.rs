//! Draw-call recorder for host tests
//!
//! `RecordingSurface` implements [`DrawSurface`] by appending every call to a
//! log, so a test can assert exactly what a refresh painted.

use heapless::{String, Vec};

use crate::backend::{Bounds, DisplayError, DrawSurface, Font, Rotation};
use crate::color::Color;

/// Maximum number of calls kept; later calls are dropped
pub const MAX_RECORDED_CALLS: usize = 1024;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    FillWindow(Color),
    SetRotation(Rotation),
    FillRoundRect {
        bounds: Bounds,
        radius: u16,
        color: Color,
    },
    DrawRoundRect {
        bounds: Bounds,
        radius: u16,
        color: Color,
    },
    FillCircle {
        x: u16,
        y: u16,
        radius: u16,
        color: Color,
    },
    DrawCircle {
        x: u16,
        y: u16,
        radius: u16,
        color: Color,
    },
    SetCursor {
        x: u16,
        y: u16,
    },
    SetTextColor {
        fg: Color,
        bg: Color,
    },
    SetFont(Font),
    SetFontScale(u8),
    Print(String<32>),
}

/// Recording draw surface
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall, MAX_RECORDED_CALLS>,
    failing: bool,
}

impl RecordingSurface {
    pub const fn new() -> Self {
        Self {
            calls: Vec::new(),
            failing: false,
        }
    }

    /// A surface whose every call fails with `Communication`
    pub const fn failing() -> Self {
        Self {
            calls: Vec::new(),
            failing: true,
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Every printed string, in order
    pub fn printed(&self) -> impl Iterator<Item = &str> + '_ {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Print(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of recorded calls matching `pred`
    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    fn record(&mut self, call: DrawCall) -> Result<(), DisplayError> {
        if self.failing {
            return Err(DisplayError::Communication);
        }
        let _ = self.calls.push(call);
        Ok(())
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_window(&mut self, color: Color) -> Result<(), DisplayError> {
        self.record(DrawCall::FillWindow(color))
    }

    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        self.record(DrawCall::SetRotation(rotation))
    }

    fn fill_round_rect(
        &mut self,
        bounds: Bounds,
        radius: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.record(DrawCall::FillRoundRect {
            bounds,
            radius,
            color,
        })
    }

    fn draw_round_rect(
        &mut self,
        bounds: Bounds,
        radius: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.record(DrawCall::DrawRoundRect {
            bounds,
            radius,
            color,
        })
    }

    fn fill_circle(&mut self, x: u16, y: u16, radius: u16, color: Color) -> Result<(), DisplayError> {
        self.record(DrawCall::FillCircle {
            x,
            y,
            radius,
            color,
        })
    }

    fn draw_circle(&mut self, x: u16, y: u16, radius: u16, color: Color) -> Result<(), DisplayError> {
        self.record(DrawCall::DrawCircle {
            x,
            y,
            radius,
            color,
        })
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<(), DisplayError> {
        self.record(DrawCall::SetCursor { x, y })
    }

    fn set_text_color(&mut self, fg: Color, bg: Color) -> Result<(), DisplayError> {
        self.record(DrawCall::SetTextColor { fg, bg })
    }

    fn set_font(&mut self, font: Font) -> Result<(), DisplayError> {
        self.record(DrawCall::SetFont(font))
    }

    fn set_font_scale(&mut self, scale: u8) -> Result<(), DisplayError> {
        self.record(DrawCall::SetFontScale(scale))
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        let mut owned = String::new();
        for ch in text.chars() {
            if owned.push(ch).is_err() {
                break;
            }
        }
        self.record(DrawCall::Print(owned))
    }
}
