//! `embedded-graphics` backed draw surface
//!
//! Lets the clock face render onto any `DrawTarget<Color = Rgb565>`: a
//! framebuffer, an SPI panel driver or a simulator window. Fonts map onto the
//! monospace ASCII fonts shipped with `embedded-graphics`.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_8X13, FONT_9X18};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::backend::{Bounds, DisplayError, DrawSurface, Font, Rotation};
use crate::color::Color;

/// Draw surface over an `embedded-graphics` target
///
/// Two limits against a real TFT controller:
///
/// - Rotation is applied by mirroring coordinates. At 180° every box, circle
///   and text cell lands where the panel would put it, but glyph bitmaps are
///   still drawn upright.
/// - The font scale only picks among the bundled `Internal` fonts (6x10,
///   8x13, 9x18, 10x20). `Font::Large` is always 10x20, the largest bundled
///   font, whatever scale is set.
pub struct GraphicsSurface<D> {
    target: D,
    rotation: Rotation,
    cursor: (u16, u16),
    font: Font,
    scale: u8,
    text_fg: Color,
    text_bg: Color,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a draw target
    pub fn new(target: D) -> Self {
        Self {
            target,
            rotation: Rotation::Deg0,
            cursor: (0, 0),
            font: Font::Internal,
            scale: 0,
            text_fg: Color::White,
            text_bg: Color::Transparent,
        }
    }

    /// Borrow the wrapped target
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Unwrap the target
    pub fn into_inner(self) -> D {
        self.target
    }

    /// Current text cursor in logical coordinates
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// Top-left corner of a `width` x `height` box placed at (`x`, `y`)
    fn place(&self, x: u16, y: u16, width: u32, height: u32) -> Point {
        let (x, y) = (i32::from(x), i32::from(y));
        match self.rotation {
            Rotation::Deg0 => Point::new(x, y),
            Rotation::Deg180 => {
                let size = self.target.bounding_box().size;
                Point::new(
                    size.width as i32 - x - width as i32,
                    size.height as i32 - y - height as i32,
                )
            }
        }
    }

    fn rounded(&self, bounds: Bounds, radius: u16) -> RoundedRectangle {
        let size = Size::new(u32::from(bounds.width), u32::from(bounds.height));
        let origin = self.place(bounds.x, bounds.y, size.width, size.height);
        RoundedRectangle::with_equal_corners(
            Rectangle::new(origin, size),
            Size::new(u32::from(radius), u32::from(radius)),
        )
    }

    fn circle(&self, x: u16, y: u16, radius: u16) -> Circle {
        let center = self.place(x, y, 1, 1);
        Circle::with_center(center, u32::from(radius) * 2 + 1)
    }

    fn draw_text(&mut self, text: &str, font: &MonoFont<'_>) -> Result<(), DisplayError> {
        let glyph = font.character_size;
        let width = glyph.width * text.chars().count() as u32;
        let (x, y) = self.cursor;

        if let Some(fg) = self.text_fg.to_rgb565() {
            let mut builder = MonoTextStyleBuilder::new().font(font).text_color(fg);
            if let Some(bg) = self.text_bg.to_rgb565() {
                builder = builder.background_color(bg);
            }
            let origin = self.place(x, y, width, glyph.height);
            Text::with_baseline(text, origin, builder.build(), Baseline::Top)
                .draw(&mut self.target)
                .map_err(|_| DisplayError::Communication)?;
        }

        let advance = u16::try_from(width).unwrap_or(u16::MAX);
        self.cursor = (x.saturating_add(advance), y);
        Ok(())
    }
}

impl<D> DrawSurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill_window(&mut self, color: Color) -> Result<(), DisplayError> {
        match color.to_rgb565() {
            Some(color) => self
                .target
                .clear(color)
                .map_err(|_| DisplayError::Communication),
            None => Ok(()),
        }
    }

    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        self.rotation = rotation;
        Ok(())
    }

    fn fill_round_rect(
        &mut self,
        bounds: Bounds,
        radius: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        let Some(color) = color.to_rgb565() else {
            return Ok(());
        };
        self.rounded(bounds, radius)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_round_rect(
        &mut self,
        bounds: Bounds,
        radius: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        let Some(color) = color.to_rgb565() else {
            return Ok(());
        };
        self.rounded(bounds, radius)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_circle(&mut self, x: u16, y: u16, radius: u16, color: Color) -> Result<(), DisplayError> {
        let Some(color) = color.to_rgb565() else {
            return Ok(());
        };
        self.circle(x, y, radius)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_circle(&mut self, x: u16, y: u16, radius: u16, color: Color) -> Result<(), DisplayError> {
        let Some(color) = color.to_rgb565() else {
            return Ok(());
        };
        self.circle(x, y, radius)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<(), DisplayError> {
        self.cursor = (x, y);
        Ok(())
    }

    fn set_text_color(&mut self, fg: Color, bg: Color) -> Result<(), DisplayError> {
        self.text_fg = fg;
        self.text_bg = bg;
        Ok(())
    }

    fn set_font(&mut self, font: Font) -> Result<(), DisplayError> {
        self.font = font;
        Ok(())
    }

    fn set_font_scale(&mut self, scale: u8) -> Result<(), DisplayError> {
        self.scale = scale;
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        match (self.font, self.scale) {
            (Font::Large, _) => self.draw_text(text, &FONT_10X20),
            (Font::Internal, 0) => self.draw_text(text, &FONT_6X10),
            (Font::Internal, 1) => self.draw_text(text, &FONT_8X13),
            (Font::Internal, 2) => self.draw_text(text, &FONT_9X18),
            (Font::Internal, _) => self.draw_text(text, &FONT_10X20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn surface() -> GraphicsSurface<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        GraphicsSurface::new(display)
    }

    #[test]
    fn test_fill_circle() {
        let mut surface = surface();
        surface.fill_circle(10, 10, 3, Color::Red).unwrap();

        let display = surface.target();
        assert_eq!(display.get_pixel(Point::new(10, 10)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(30, 30)), None);
    }

    #[test]
    fn test_transparent_paints_nothing() {
        let mut surface = surface();
        surface
            .fill_round_rect(Bounds::new(0, 0, 8, 8), 0, Color::Transparent)
            .unwrap();
        surface.fill_window(Color::Transparent).unwrap();

        assert_eq!(surface.target().get_pixel(Point::new(2, 2)), None);
    }

    #[test]
    fn test_rotation_mirrors_geometry() {
        let mut surface = surface();
        surface.set_rotation(Rotation::Deg180).unwrap();
        surface
            .fill_round_rect(Bounds::new(0, 0, 4, 4), 0, Color::Green)
            .unwrap();

        let display = surface.target();
        assert_eq!(display.get_pixel(Point::new(63, 63)), Some(Rgb565::GREEN));
        assert_eq!(display.get_pixel(Point::new(0, 0)), None);
    }

    #[test]
    fn test_print_advances_cursor() {
        let mut surface = surface();
        surface.set_text_color(Color::White, Color::Black).unwrap();
        surface.set_cursor(0, 0).unwrap();
        surface.print("10").unwrap();

        // Two 6x10 cells painted with fg or bg
        assert_eq!(surface.cursor(), (12, 0));
        assert!(surface.target().get_pixel(Point::new(0, 0)).is_some());
        assert!(surface.target().get_pixel(Point::new(11, 9)).is_some());
        assert_eq!(surface.target().get_pixel(Point::new(12, 0)), None);
    }

    #[test]
    fn test_large_font_ignores_scale() {
        let mut surface = surface();
        surface.set_text_color(Color::White, Color::Black).unwrap();
        surface.set_font(Font::Large).unwrap();

        for scale in [0, 2, 7] {
            surface.set_font_scale(scale).unwrap();
            surface.set_cursor(0, 0).unwrap();
            surface.print_char('7').unwrap();
            assert_eq!(surface.cursor(), (10, 0));
        }
    }

    #[test]
    fn test_rotated_text_cell_is_mirrored() {
        let mut surface = surface();
        surface.set_rotation(Rotation::Deg180).unwrap();
        surface.set_text_color(Color::White, Color::Black).unwrap();
        surface.set_cursor(0, 0).unwrap();
        surface.print("A").unwrap();

        // The 6x10 cell occupies the bottom-right corner
        let display = surface.target();
        assert!(display.get_pixel(Point::new(58, 54)).is_some());
        assert!(display.get_pixel(Point::new(63, 63)).is_some());
        assert_eq!(display.get_pixel(Point::new(57, 63)), None);
        assert_eq!(display.get_pixel(Point::new(0, 0)), None);
        // Logical cursor still advances left to right
        assert_eq!(surface.cursor(), (6, 0));
    }
}
