//! Display session
//!
//! Owns every widget, glyph cell and indicator on the face together with
//! the colours, orientation and touch calibration, and sequences redraws:
//!
//! - [`RefreshMode::Minimal`] redraws only what is dirty
//! - [`RefreshMode::Full`] clears the screen and redraws everything
//!
//! [`DrawScope::SymbolsOnly`] leaves the binary rows alone while the
//! configuration widgets occupy that part of the screen.

use heapless::Vec;
use hexclock_display::{Color, DisplayError, DrawSurface, Font, Rotation};
use hexclock_hal::{DelayNs, TouchSensor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calibration::{resolve_widget, CalibrationMatrix, CalibrationSet, Point};
use crate::config::{ColorScheme, SessionConfig, TouchConfig};
use crate::dot::IndicatorDot;
use crate::glyph::{CellRole, GlyphCell};
use crate::layout::{
    AxisLabels, BITS_FONT_SCALE, TEST_PATTERN_STEP_MS, X_BIN_DATE_LABEL, X_BIN_TIME_LABEL,
    Y_BIN_ROWS,
};
use crate::touch::{self, DrainMode, TouchError};
use crate::widget::{Widget, WidgetSpec};

/// Widgets on the configuration screen
pub const MAX_WIDGETS: usize = 33;
/// Large glyph cells (12 digits and 4 separators)
pub const MAX_CELLS: usize = 16;
/// AM and PM dots
pub const MAX_INDICATORS: usize = 2;

/// Colours shown by [`DisplaySession::run_test_pattern`], in order
pub const TEST_PATTERN: [Color; 7] = [
    Color::White,
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::Black,
];

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// How much to redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshMode {
    /// Only dirty cells and indicator transitions
    Minimal,
    /// Clear the screen and redraw everything
    Full,
}

/// Which parts of the face to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawScope {
    /// Large glyphs and binary rows
    All,
    /// Large glyphs only
    SymbolsOnly,
}

/// Base the large digits are shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumberBase {
    Decimal,
    #[default]
    Hexadecimal,
}

impl NumberBase {
    pub const fn radix(self) -> u8 {
        match self {
            NumberBase::Decimal => 10,
            NumberBase::Hexadecimal => 16,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            NumberBase::Decimal => NumberBase::Hexadecimal,
            NumberBase::Hexadecimal => NumberBase::Decimal,
        }
    }
}

/// Result of polling for a widget press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchOutcome {
    /// Panel not pressed
    Idle,
    /// Pressed outside every widget
    Miss(Point),
    /// Index of the pressed widget
    Widget(usize),
}

/// Session errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// Collection is at capacity
    Full,
    /// No element at that index
    InvalidIndex,
}

#[derive(Debug, Clone, Copy)]
struct Indicator {
    dot: IndicatorDot,
    wanted: bool,
}

/// Display state for one screen
pub struct DisplaySession<'a> {
    widgets: Vec<Widget<'a>, MAX_WIDGETS>,
    cells: Vec<GlyphCell, MAX_CELLS>,
    indicators: Vec<Indicator, MAX_INDICATORS>,
    colors: ColorScheme,
    rotation: Rotation,
    calibration: CalibrationSet,
    touch: TouchConfig,
    axis_labels: AxisLabels,
}

impl<'a> DisplaySession<'a> {
    /// Empty session
    pub fn new(config: SessionConfig, calibration: CalibrationSet) -> Self {
        Self {
            widgets: Vec::new(),
            cells: Vec::new(),
            indicators: Vec::new(),
            colors: config.colors,
            rotation: config.rotation,
            calibration,
            touch: config.touch,
            axis_labels: config.axis_labels,
        }
    }

    // ---- population ----

    /// Add a widget; returns its index (which is also its touch priority)
    pub fn add_widget(&mut self, spec: &WidgetSpec<'a>) -> Result<usize, SessionError> {
        self.widgets
            .push(Widget::new(spec))
            .map_err(|_| SessionError::Full)?;
        Ok(self.widgets.len() - 1)
    }

    /// Drop every widget (leaving the configuration screen)
    pub fn clear_widgets(&mut self) {
        self.widgets.clear();
    }

    pub fn add_cell(&mut self, cell: GlyphCell) -> Result<usize, SessionError> {
        self.cells.push(cell).map_err(|_| SessionError::Full)?;
        Ok(self.cells.len() - 1)
    }

    pub fn add_indicator(&mut self, dot: IndicatorDot) -> Result<usize, SessionError> {
        self.indicators
            .push(Indicator { dot, wanted: false })
            .map_err(|_| SessionError::Full)?;
        Ok(self.indicators.len() - 1)
    }

    // ---- accessors ----

    pub fn widgets(&self) -> &[Widget<'a>] {
        &self.widgets
    }

    pub fn cells(&self) -> &[GlyphCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&GlyphCell> {
        self.cells.get(index)
    }

    pub fn indicator(&self, index: usize) -> Option<&IndicatorDot> {
        self.indicators.get(index).map(|i| &i.dot)
    }

    pub fn colors(&self) -> ColorScheme {
        self.colors
    }

    /// Takes effect on the next refresh; callers normally follow with a
    /// full one
    pub fn set_colors(&mut self, colors: ColorScheme) {
        self.colors = colors;
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Change orientation and the calibration matrix with it
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    pub fn set_calibration(&mut self, calibration: CalibrationSet) {
        self.calibration = calibration;
    }

    /// Matrix for the current orientation
    pub fn active_matrix(&self) -> &CalibrationMatrix {
        self.calibration.for_rotation(self.rotation)
    }

    pub fn touch_config(&self) -> &TouchConfig {
        &self.touch
    }

    // ---- state updates ----

    /// Update one cell; see [`GlyphCell::set_value`]
    pub fn set_cell(
        &mut self,
        index: usize,
        value: u8,
        ch: char,
        force: bool,
    ) -> Result<bool, SessionError> {
        let cell = self.cells.get_mut(index).ok_or(SessionError::InvalidIndex)?;
        Ok(cell.set_value(value, ch, force))
    }

    /// Show `value` on a high/low digit pair
    ///
    /// The glyphs use `base`; only the two lowest digits are shown. The bit
    /// rows always carry the high and low nibble of `value`.
    pub fn set_unit_digits(
        &mut self,
        high: usize,
        low: usize,
        value: u8,
        base: NumberBase,
        force: bool,
    ) -> Result<bool, SessionError> {
        if high >= self.cells.len() || low >= self.cells.len() {
            return Err(SessionError::InvalidIndex);
        }
        let radix = base.radix();
        let high_char = char::from(DIGITS[usize::from((value / radix) % radix)]);
        let low_char = char::from(DIGITS[usize::from(value % radix)]);

        let high_changed = self.set_cell(high, value >> 4, high_char, force)?;
        let low_changed = self.set_cell(low, value & 0x0F, low_char, force)?;
        Ok(high_changed || low_changed)
    }

    /// Request an indicator state; drawn on the next refresh
    pub fn set_indicator(&mut self, index: usize, on: bool) -> Result<(), SessionError> {
        let indicator = self
            .indicators
            .get_mut(index)
            .ok_or(SessionError::InvalidIndex)?;
        indicator.wanted = on;
        Ok(())
    }

    pub fn set_widget_label(
        &mut self,
        index: usize,
        label: Option<&'a str>,
    ) -> Result<(), SessionError> {
        let widget = self
            .widgets
            .get_mut(index)
            .ok_or(SessionError::InvalidIndex)?;
        widget.set_label(label);
        Ok(())
    }

    /// Force separators to redraw
    ///
    /// Separator glyphs never change value, so after a screen that painted
    /// over them they would otherwise stay missing.
    pub fn mark_separators_dirty(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.role() == CellRole::Separator {
                cell.mark_symbol_dirty();
            }
        }
    }

    // ---- drawing ----

    /// Redraw the face
    pub fn refresh<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        mode: RefreshMode,
        scope: DrawScope,
    ) -> Result<(), DisplayError> {
        let ColorScheme { fg, bg } = self.colors;

        if mode == RefreshMode::Full {
            debug!("full refresh");
            surface.fill_window(bg)?;
            for cell in self.cells.iter_mut() {
                cell.invalidate();
            }
        }

        surface.set_rotation(self.rotation)?;

        for cell in self.cells.iter_mut() {
            cell.draw_symbol(surface, fg, bg)?;
            if scope == DrawScope::All {
                cell.draw_bits(surface, fg, bg)?;
            }
        }

        for indicator in self.indicators.iter_mut() {
            match (indicator.wanted, mode) {
                (true, RefreshMode::Full) if indicator.dot.is_on() => {
                    indicator.dot.force_repaint(surface, fg)?
                }
                (true, _) => indicator.dot.turn_on(surface, fg)?,
                (false, _) => indicator.dot.turn_off(surface, bg)?,
            }
        }

        if mode == RefreshMode::Full && scope == DrawScope::All {
            self.draw_axis_labels(surface)?;
        }
        Ok(())
    }

    fn draw_axis_labels<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> Result<(), DisplayError> {
        surface.set_font(Font::Internal)?;
        surface.set_text_color(self.colors.fg, self.colors.bg)?;
        surface.set_font_scale(BITS_FONT_SCALE)?;

        let columns = [
            (X_BIN_TIME_LABEL, &self.axis_labels.time),
            (X_BIN_DATE_LABEL, &self.axis_labels.date),
        ];
        for (x, labels) in columns {
            for (y, label) in Y_BIN_ROWS.iter().zip(labels.iter()) {
                surface.set_cursor(x, *y)?;
                surface.print(label)?;
            }
        }
        Ok(())
    }

    /// Draw every widget in declaration order
    pub fn draw_widgets<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> Result<(), DisplayError> {
        surface.set_font(Font::Internal)?;
        for widget in self.widgets.iter() {
            widget.draw(surface, self.colors.fg, self.colors.bg)?;
        }
        Ok(())
    }

    /// Cycle the panel through the primaries
    pub fn run_test_pattern<S, D>(&self, surface: &mut S, delay: &mut D) -> Result<(), DisplayError>
    where
        S: DrawSurface + ?Sized,
        D: DelayNs + ?Sized,
    {
        for color in TEST_PATTERN {
            surface.fill_window(color)?;
            delay.delay_ms(TEST_PATTERN_STEP_MS);
        }
        Ok(())
    }

    // ---- touch ----

    /// First widget containing `point`
    pub fn resolve(&self, point: Point) -> Option<usize> {
        resolve_widget(point, &self.widgets)
    }

    /// Poll the panel through the active matrix
    pub fn poll_touch<T, D>(
        &self,
        sensor: &mut T,
        delay: &mut D,
        mode: DrainMode,
    ) -> Result<Option<Point>, TouchError>
    where
        T: TouchSensor + ?Sized,
        D: DelayNs + ?Sized,
    {
        touch::poll_touch(sensor, delay, self.active_matrix(), &self.touch, mode)
    }

    /// Poll the panel and resolve the press to a widget
    pub fn poll_widget<T, D>(
        &self,
        sensor: &mut T,
        delay: &mut D,
        mode: DrainMode,
    ) -> Result<TouchOutcome, TouchError>
    where
        T: TouchSensor + ?Sized,
        D: DelayNs + ?Sized,
    {
        let Some(point) = self.poll_touch(sensor, delay, mode)? else {
            return Ok(TouchOutcome::Idle);
        };
        Ok(match self.resolve(point) {
            Some(index) => {
                debug!("widget {} pressed", index);
                TouchOutcome::Widget(index)
            }
            None => TouchOutcome::Miss(point),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::load_calibration;
    use crate::widget::WidgetStyle;
    use hexclock_display::mock::{DrawCall, RecordingSurface};
    use hexclock_hal::mock::{CountingDelay, MemoryStorage, ScriptedTouch};
    use hexclock_hal::RawSample;

    const HOUR_HIGH: usize = 0;
    const HOUR_LOW: usize = 1;
    const COLON: usize = 2;

    fn session() -> DisplaySession<'static> {
        let calibration = CalibrationSet::new(CalibrationMatrix::IDENTITY, CalibrationMatrix::UNCALIBRATED);
        let mut session = DisplaySession::new(SessionConfig::default(), calibration);
        session.add_cell(GlyphCell::new('0', 55, 20, CellRole::HourHigh)).unwrap();
        session.add_cell(GlyphCell::new('0', 151, 20, CellRole::HourLow)).unwrap();
        session.add_cell(GlyphCell::new(':', 252, 20, CellRole::Separator)).unwrap();
        session.add_indicator(IndicatorDot::new(35, 46, 7)).unwrap();
        session
    }

    fn settled() -> DisplaySession<'static> {
        let mut session = session();
        let mut surface = RecordingSurface::new();
        session
            .refresh(&mut surface, RefreshMode::Full, DrawScope::All)
            .unwrap();
        session
    }

    fn glyph_prints(surface: &RecordingSurface) -> usize {
        surface.count(|call| matches!(call, DrawCall::SetFont(Font::Large)))
    }

    #[test]
    fn test_minimal_refresh_with_no_changes_draws_no_glyphs() {
        let mut session = settled();
        let mut surface = RecordingSurface::new();
        session
            .refresh(&mut surface, RefreshMode::Minimal, DrawScope::All)
            .unwrap();

        assert_eq!(surface.calls(), [DrawCall::SetRotation(Rotation::Deg0)]);
    }

    #[test]
    fn test_full_refresh_clears_then_redraws_everything() {
        let mut session = settled();
        let mut surface = RecordingSurface::new();
        session
            .refresh(&mut surface, RefreshMode::Full, DrawScope::All)
            .unwrap();

        assert_eq!(surface.calls()[0], DrawCall::FillWindow(Color::Black));
        assert_eq!(surface.calls()[1], DrawCall::SetRotation(Rotation::Deg0));
        assert_eq!(glyph_prints(&surface), 3);

        let printed: heapless::Vec<&str, 16> = surface.printed().collect();
        // Two bit rows, then the axis labels
        assert_eq!(printed.iter().filter(|s| **s == "0000").count(), 2);
        for label in ["H:", "M:", "S:", "D:", "Y:"] {
            assert!(printed.contains(&label));
        }
        // Nothing to erase after a clear
        assert!(!surface.calls().contains(&DrawCall::SetTextColor {
            fg: Color::Black,
            bg: Color::Black
        }));
    }

    #[test]
    fn test_symbols_only_scope() {
        let mut session = session();
        let mut surface = RecordingSurface::new();
        session
            .refresh(&mut surface, RefreshMode::Full, DrawScope::SymbolsOnly)
            .unwrap();

        assert!(surface.printed().all(|s| s != "0000" && s != "H:"));
        // Bits stay pending for the next full-scope pass
        assert!(session.cell(HOUR_LOW).unwrap().is_bits_dirty());
    }

    #[test]
    fn test_value_change_redraws_only_that_cell() {
        let mut session = settled();
        session.set_unit_digits(HOUR_HIGH, HOUR_LOW, 0x0A, NumberBase::Hexadecimal, false).unwrap();
        let mut surface = RecordingSurface::new();
        session
            .refresh(&mut surface, RefreshMode::Minimal, DrawScope::All)
            .unwrap();

        assert_eq!(glyph_prints(&surface), 1);
        let printed: heapless::Vec<&str, 8> = surface.printed().collect();
        // erase '0', draw 'A', bits of the low nibble
        assert_eq!(printed, ["0", "A", "1010"]);
    }

    #[test]
    fn test_unit_digits_bases() {
        let mut session = session();
        session.set_unit_digits(HOUR_HIGH, HOUR_LOW, 23, NumberBase::Decimal, false).unwrap();
        assert_eq!(session.cell(HOUR_HIGH).unwrap().current(), '2');
        assert_eq!(session.cell(HOUR_LOW).unwrap().current(), '3');
        // Bits are nibbles of 0x17
        assert_eq!(session.cell(HOUR_HIGH).unwrap().value(), 0x1);
        assert_eq!(session.cell(HOUR_LOW).unwrap().value(), 0x7);

        session.set_unit_digits(HOUR_HIGH, HOUR_LOW, 23, NumberBase::Hexadecimal, false).unwrap();
        assert_eq!(session.cell(HOUR_HIGH).unwrap().current(), '1');
        assert_eq!(session.cell(HOUR_LOW).unwrap().current(), '7');
    }

    #[test]
    fn test_unit_digits_invalid_index() {
        let mut session = session();
        assert_eq!(
            session.set_unit_digits(0, 9, 1, NumberBase::Decimal, false),
            Err(SessionError::InvalidIndex)
        );
    }

    #[test]
    fn test_indicator_transitions() {
        let mut session = settled();
        let mut surface = RecordingSurface::new();

        session.set_indicator(0, true).unwrap();
        session.refresh(&mut surface, RefreshMode::Minimal, DrawScope::All).unwrap();
        session.refresh(&mut surface, RefreshMode::Minimal, DrawScope::All).unwrap();
        let fills = |s: &RecordingSurface| s.count(|c| matches!(c, DrawCall::FillCircle { .. }));
        assert_eq!(fills(&surface), 1);

        // Full refresh repaints a lit dot
        surface.clear();
        session.refresh(&mut surface, RefreshMode::Full, DrawScope::All).unwrap();
        assert_eq!(fills(&surface), 1);
        assert!(session.indicator(0).unwrap().is_on());

        session.set_indicator(0, false).unwrap();
        surface.clear();
        session.refresh(&mut surface, RefreshMode::Minimal, DrawScope::All).unwrap();
        assert!(surface.calls().contains(&DrawCall::FillCircle {
            x: 35,
            y: 46,
            radius: 7,
            color: Color::Black
        }));
        assert_eq!(session.set_indicator(5, true), Err(SessionError::InvalidIndex));
    }

    #[test]
    fn test_separators_redraw_on_request() {
        let mut session = settled();
        session.mark_separators_dirty();
        let mut surface = RecordingSurface::new();
        session.refresh(&mut surface, RefreshMode::Minimal, DrawScope::All).unwrap();

        assert_eq!(glyph_prints(&surface), 1);
        assert!(!session.cell(COLON).unwrap().is_symbol_dirty());
    }

    #[test]
    fn test_capacity() {
        let mut session = session();
        for i in 0..MAX_WIDGETS {
            let spec = WidgetSpec::area(i as u16, 0, 1, 1, WidgetStyle::HIDDEN);
            assert_eq!(session.add_widget(&spec), Ok(i));
        }
        let spec = WidgetSpec::area(0, 0, 1, 1, WidgetStyle::HIDDEN);
        assert_eq!(session.add_widget(&spec), Err(SessionError::Full));

        session.add_indicator(IndicatorDot::new(35, 80, 7)).unwrap();
        assert_eq!(
            session.add_indicator(IndicatorDot::new(0, 0, 1)),
            Err(SessionError::Full)
        );
    }

    #[test]
    fn test_widget_label_update() {
        let mut session = session();
        let style = WidgetStyle::button(Color::White, Color::Black, Color::Black, Color::White);
        let spec = WidgetSpec::area(170, 420, 50, 30, style).with_label("HEX", 182, 426, 0);
        let base = session.add_widget(&spec).unwrap();
        session.set_widget_label(base, Some("DEC")).unwrap();

        let mut surface = RecordingSurface::new();
        session.draw_widgets(&mut surface).unwrap();
        assert_eq!(surface.calls()[0], DrawCall::SetFont(Font::Internal));
        assert_eq!(surface.printed().next(), Some("DEC"));
        assert_eq!(session.set_widget_label(7, None), Err(SessionError::InvalidIndex));
    }

    #[test]
    fn test_poll_widget_outcomes() {
        let mut session = session();
        session
            .add_widget(&WidgetSpec::area(10, 20, 100, 50, WidgetStyle::HIDDEN))
            .unwrap();
        let mut delay = CountingDelay::new();

        let mut idle = ScriptedTouch::idle();
        assert_eq!(
            session.poll_widget(&mut idle, &mut delay, DrainMode::WaitForRelease),
            Ok(TouchOutcome::Idle)
        );

        let mut hit = ScriptedTouch::press(RawSample::new(60, 45), 2);
        assert_eq!(
            session.poll_widget(&mut hit, &mut delay, DrainMode::WaitForRelease),
            Ok(TouchOutcome::Widget(0))
        );

        let mut miss = ScriptedTouch::press(RawSample::new(500, 400), 0);
        assert_eq!(
            session.poll_widget(&mut miss, &mut delay, DrainMode::WaitForRelease),
            Ok(TouchOutcome::Miss(Point::new(500, 400)))
        );
    }

    #[test]
    fn test_erased_eeprom_refuses_touches() {
        let mut storage = MemoryStorage::<256>::new();
        let calibration = load_calibration(&mut storage).unwrap();
        let mut session = DisplaySession::new(SessionConfig::default(), calibration);
        session
            .add_widget(&WidgetSpec::area(0, 0, 200, 200, WidgetStyle::HIDDEN))
            .unwrap();

        let mut sensor = ScriptedTouch::press(RawSample::new(37, 52), 0);
        let mut delay = CountingDelay::new();
        assert_eq!(
            session.poll_widget(&mut sensor, &mut delay, DrainMode::WaitForRelease),
            Err(TouchError::UncalibratedTransform)
        );
        assert_eq!(sensor.reads(), 0);
    }

    #[test]
    fn test_rotation_switches_matrix() {
        let mut session = session();
        session.set_rotation(Rotation::Deg180);
        assert!(!session.active_matrix().is_calibrated());

        let mut sensor = ScriptedTouch::press(RawSample::new(60, 45), 0);
        let mut delay = CountingDelay::new();
        assert_eq!(
            session.poll_widget(&mut sensor, &mut delay, DrainMode::WaitForRelease),
            Err(TouchError::UncalibratedTransform)
        );

        let mut surface = RecordingSurface::new();
        session.refresh(&mut surface, RefreshMode::Minimal, DrawScope::SymbolsOnly).unwrap();
        assert!(surface.calls().contains(&DrawCall::SetRotation(Rotation::Deg180)));
    }

    #[test]
    fn test_pattern() {
        let session = session();
        let mut surface = RecordingSurface::new();
        let mut delay = CountingDelay::new();
        session.run_test_pattern(&mut surface, &mut delay).unwrap();

        let fills: heapless::Vec<DrawCall, 8> = surface.calls().iter().cloned().collect();
        let expected: heapless::Vec<DrawCall, 8> =
            TEST_PATTERN.iter().map(|c| DrawCall::FillWindow(*c)).collect();
        assert_eq!(fills, expected);
        assert_eq!(delay.total_us(), 7 * 500_000);
    }
}
