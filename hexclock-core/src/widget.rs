//! Touch widgets
//!
//! A widget is a rounded rectangle that can be pressed, optionally filled,
//! outlined and labelled. Geometry lives in one 64-bit word and colours in
//! one 16-bit word so the 33 widgets of the configuration screen stay small.
//!
//! Fully transparent widgets are invisible hit areas (the regions over the
//! digits that step a value up or down).

use hexclock_display::{Bounds, Color, DisplayError, DrawSurface};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bitfield::{disjoint16, disjoint64, Field16, Field64};
use crate::layout::WIDGET_CORNER_RADIUS;

/// Geometry word layout
pub mod geometry {
    use super::Field64;

    pub const X: Field64 = Field64::new(54, 10);
    pub const Y: Field64 = Field64::new(44, 10);
    pub const WIDTH: Field64 = Field64::new(34, 10);
    pub const HEIGHT: Field64 = Field64::new(24, 10);
    pub const LABEL_X: Field64 = Field64::new(14, 10);
    pub const LABEL_Y: Field64 = Field64::new(4, 10);
    pub const FONT_SIZE: Field64 = Field64::new(0, 4);

    pub const ALL: [Field64; 7] = [X, Y, WIDTH, HEIGHT, LABEL_X, LABEL_Y, FONT_SIZE];
}

/// Colour word layout
pub mod colors {
    use super::Field16;

    pub const FILL: Field16 = Field16::new(12, 4);
    pub const BORDER: Field16 = Field16::new(8, 4);
    pub const TEXT_FG: Field16 = Field16::new(4, 4);
    pub const TEXT_BG: Field16 = Field16::new(0, 4);

    pub const ALL: [Field16; 4] = [FILL, BORDER, TEXT_FG, TEXT_BG];
}

const _: () = assert!(disjoint64(&geometry::ALL));
const _: () = assert!(disjoint16(&colors::ALL));

/// Widget colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WidgetStyle {
    pub fill: Color,
    pub border: Color,
    /// `Transparent` means "use the session's text colours"
    pub text_fg: Color,
    pub text_bg: Color,
}

impl WidgetStyle {
    /// Invisible hit area
    pub const HIDDEN: Self = Self {
        fill: Color::Transparent,
        border: Color::Transparent,
        text_fg: Color::Transparent,
        text_bg: Color::Transparent,
    };

    /// Filled and outlined swatch with session text colours
    pub const fn swatch(fill: Color, border: Color) -> Self {
        Self {
            fill,
            border,
            text_fg: Color::Transparent,
            text_bg: Color::Transparent,
        }
    }

    /// Filled, outlined button with its own text colours
    pub const fn button(fill: Color, border: Color, text_fg: Color, text_bg: Color) -> Self {
        Self {
            fill,
            border,
            text_fg,
            text_bg,
        }
    }
}

impl Default for WidgetStyle {
    fn default() -> Self {
        Self::HIDDEN
    }
}

/// Unpacked widget description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WidgetSpec<'a> {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub label_x: u16,
    pub label_y: u16,
    /// Font scale for the label (0..=15)
    pub font_size: u8,
    pub style: WidgetStyle,
    pub label: Option<&'a str>,
}

impl<'a> WidgetSpec<'a> {
    /// Unlabelled widget covering `x, y, width, height`
    pub const fn area(x: u16, y: u16, width: u16, height: u16, style: WidgetStyle) -> Self {
        Self {
            x,
            y,
            width,
            height,
            label_x: 0,
            label_y: 0,
            font_size: 0,
            style,
            label: None,
        }
    }

    /// Attach a label drawn at `label_x, label_y` with `font_size`
    pub const fn with_label(mut self, label: &'a str, label_x: u16, label_y: u16, font_size: u8) -> Self {
        self.label = Some(label);
        self.label_x = label_x;
        self.label_y = label_y;
        self.font_size = font_size;
        self
    }
}

/// Packed widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Widget<'a> {
    geometry: u64,
    colors: u16,
    label: Option<&'a str>,
}

impl<'a> Widget<'a> {
    /// Zero-sized widget at the origin with no colours
    pub const fn empty() -> Self {
        Self {
            geometry: 0,
            colors: 0,
            label: None,
        }
    }

    /// Build a widget from `spec`
    pub fn new(spec: &WidgetSpec<'a>) -> Self {
        let mut widget = Self::empty();
        widget.setup(spec);
        widget
    }

    /// Pack `spec` into this widget
    ///
    /// Values wider than their field are truncated (logged at warn level).
    pub fn setup(&mut self, spec: &WidgetSpec<'a>) {
        let fields = [
            (geometry::X, spec.x),
            (geometry::Y, spec.y),
            (geometry::WIDTH, spec.width),
            (geometry::HEIGHT, spec.height),
            (geometry::LABEL_X, spec.label_x),
            (geometry::LABEL_Y, spec.label_y),
            (geometry::FONT_SIZE, u16::from(spec.font_size)),
        ];
        for (field, value) in fields {
            let value = u64::from(value);
            if !field.fits(value) {
                warn!(
                    "widget field at bit {} truncated: {} > {}",
                    field.shift(),
                    value,
                    field.add_mask()
                );
            }
            field.write(&mut self.geometry, value);
        }

        let style = spec.style;
        colors::FILL.write(&mut self.colors, u16::from(style.fill.index()));
        colors::BORDER.write(&mut self.colors, u16::from(style.border.index()));
        colors::TEXT_FG.write(&mut self.colors, u16::from(style.text_fg.index()));
        colors::TEXT_BG.write(&mut self.colors, u16::from(style.text_bg.index()));

        self.label = spec.label;
    }

    /// Replace the label text; geometry and colours are unchanged
    pub fn set_label(&mut self, label: Option<&'a str>) {
        self.label = label;
    }

    fn geometry_field(&self, field: Field64) -> u16 {
        // Every geometry field is at most 10 bits wide
        field.read(self.geometry) as u16
    }

    fn color_field(&self, field: Field16) -> Color {
        Color::from_index(field.read(self.colors) as u8)
    }

    pub fn x(&self) -> u16 {
        self.geometry_field(geometry::X)
    }

    pub fn y(&self) -> u16 {
        self.geometry_field(geometry::Y)
    }

    pub fn width(&self) -> u16 {
        self.geometry_field(geometry::WIDTH)
    }

    pub fn height(&self) -> u16 {
        self.geometry_field(geometry::HEIGHT)
    }

    pub fn label_x(&self) -> u16 {
        self.geometry_field(geometry::LABEL_X)
    }

    pub fn label_y(&self) -> u16 {
        self.geometry_field(geometry::LABEL_Y)
    }

    pub fn font_size(&self) -> u8 {
        self.geometry_field(geometry::FONT_SIZE) as u8
    }

    pub fn fill(&self) -> Color {
        self.color_field(colors::FILL)
    }

    pub fn border(&self) -> Color {
        self.color_field(colors::BORDER)
    }

    pub fn text_fg(&self) -> Color {
        self.color_field(colors::TEXT_FG)
    }

    pub fn text_bg(&self) -> Color {
        self.color_field(colors::TEXT_BG)
    }

    pub fn label(&self) -> Option<&'a str> {
        self.label
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x(), self.y(), self.width(), self.height())
    }

    pub fn style(&self) -> WidgetStyle {
        WidgetStyle {
            fill: self.fill(),
            border: self.border(),
            text_fg: self.text_fg(),
            text_bg: self.text_bg(),
        }
    }

    /// Decode back to a spec
    pub fn spec(&self) -> WidgetSpec<'a> {
        WidgetSpec {
            x: self.x(),
            y: self.y(),
            width: self.width(),
            height: self.height(),
            label_x: self.label_x(),
            label_y: self.label_y(),
            font_size: self.font_size(),
            style: self.style(),
            label: self.label,
        }
    }

    /// Raw packed words (geometry, colours)
    pub fn packed(&self) -> (u64, u16) {
        (self.geometry, self.colors)
    }

    /// Whether the display point lies on the widget
    ///
    /// Both edges are inclusive: a widget at `x` with width `w` answers for
    /// `x..=x + w`.
    pub fn is_hit(&self, x: i32, y: i32) -> bool {
        let left = i32::from(self.x());
        let top = i32::from(self.y());
        let right = left + i32::from(self.width());
        let bottom = top + i32::from(self.height());
        (left..=right).contains(&x) && (top..=bottom).contains(&y)
    }

    /// Draw fill, border and label
    ///
    /// `default_fg`/`default_bg` are used for the label when the widget has
    /// no text colour of its own.
    pub fn draw<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        default_fg: Color,
        default_bg: Color,
    ) -> Result<(), DisplayError> {
        let bounds = self.bounds();
        let fill = self.fill();
        if !fill.is_transparent() {
            surface.fill_round_rect(bounds, WIDGET_CORNER_RADIUS, fill)?;
        }
        let border = self.border();
        if !border.is_transparent() {
            surface.draw_round_rect(bounds, WIDGET_CORNER_RADIUS, border)?;
        }

        let text_fg = self.text_fg();
        if text_fg.is_transparent() {
            surface.set_text_color(default_fg, default_bg)?;
        } else {
            surface.set_text_color(text_fg, self.text_bg())?;
        }

        if let Some(label) = self.label {
            surface.set_cursor(self.label_x(), self.label_y())?;
            surface.set_font_scale(self.font_size())?;
            surface.print(label)?;
        }
        Ok(())
    }
}
