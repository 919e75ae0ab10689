//! Affine calibration matrix and widget hit dispatch

use hexclock_display::Rotation;
use hexclock_hal::RawSample;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::CalibrationError;
use crate::widget::Widget;

/// Point in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Raw-to-display transform
///
/// ```text
/// x = (a * raw.x + b * raw.y + c) / divider
/// y = (d * raw.x + e * raw.y + f) / divider
/// ```
///
/// A zero divider marks a matrix that was never calibrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationMatrix {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
    pub e: i32,
    pub f: i32,
    pub divider: i32,
}

impl CalibrationMatrix {
    /// All zero; refuses to transform
    pub const UNCALIBRATED: Self = Self {
        a: 0,
        b: 0,
        c: 0,
        d: 0,
        e: 0,
        f: 0,
        divider: 0,
    };

    /// Raw coordinates are already pixels
    pub const IDENTITY: Self = Self {
        a: 1,
        b: 0,
        c: 0,
        d: 0,
        e: 1,
        f: 0,
        divider: 1,
    };

    pub const fn is_calibrated(&self) -> bool {
        self.divider != 0
    }

    /// Coefficients in storage order
    pub const fn to_array(&self) -> [i32; 7] {
        [self.a, self.b, self.c, self.d, self.e, self.f, self.divider]
    }

    pub const fn from_array(values: [i32; 7]) -> Self {
        Self {
            a: values[0],
            b: values[1],
            c: values[2],
            d: values[3],
            e: values[4],
            f: values[5],
            divider: values[6],
        }
    }

    /// Solve the matrix from three touched targets
    ///
    /// `display[i]` is where target `i` was drawn and `raw[i]` what the
    /// sensor reported while it was pressed. The targets should be spread
    /// over the panel and must not lie on one line.
    ///
    /// Intermediates are 128-bit, so only the final narrowing to 32 bits
    /// can fail.
    pub fn from_reference_points(
        display: [Point; 3],
        raw: [RawSample; 3],
    ) -> Result<Self, CalibrationError> {
        let [xd0, xd1, xd2] = display.map(|p| i128::from(p.x));
        let [yd0, yd1, yd2] = display.map(|p| i128::from(p.y));
        let [xs0, xs1, xs2] = raw.map(|s| i128::from(s.x));
        let [ys0, ys1, ys2] = raw.map(|s| i128::from(s.y));

        let divider = (xs0 - xs2) * (ys1 - ys2) - (xs1 - xs2) * (ys0 - ys2);
        if divider == 0 {
            return Err(CalibrationError::DegenerateReference);
        }

        let a = (xd0 - xd2) * (ys1 - ys2) - (xd1 - xd2) * (ys0 - ys2);
        let b = (xs0 - xs2) * (xd1 - xd2) - (xd0 - xd2) * (xs1 - xs2);
        let c = ys0 * (xs2 * xd1 - xs1 * xd2)
            + ys1 * (xs0 * xd2 - xs2 * xd0)
            + ys2 * (xs1 * xd0 - xs0 * xd1);
        let d = (yd0 - yd2) * (ys1 - ys2) - (yd1 - yd2) * (ys0 - ys2);
        let e = (xs0 - xs2) * (yd1 - yd2) - (yd0 - yd2) * (xs1 - xs2);
        let f = ys0 * (xs2 * yd1 - xs1 * yd2)
            + ys1 * (xs0 * yd2 - xs2 * yd0)
            + ys2 * (xs1 * yd0 - xs0 * yd1);

        let narrow = |v: i128| i32::try_from(v).map_err(|_| CalibrationError::Overflow);
        Ok(Self {
            a: narrow(a)?,
            b: narrow(b)?,
            c: narrow(c)?,
            d: narrow(d)?,
            e: narrow(e)?,
            f: narrow(f)?,
            divider: narrow(divider)?,
        })
    }
}

/// Map a raw sample to display pixels
///
/// Division truncates toward zero.
pub fn calibrate(raw: RawSample, matrix: &CalibrationMatrix) -> Result<Point, CalibrationError> {
    if !matrix.is_calibrated() {
        return Err(CalibrationError::UncalibratedTransform);
    }

    let rx = i64::from(raw.x);
    let ry = i64::from(raw.y);
    let divider = i64::from(matrix.divider);

    let x = (i64::from(matrix.a) * rx + i64::from(matrix.b) * ry + i64::from(matrix.c)) / divider;
    let y = (i64::from(matrix.d) * rx + i64::from(matrix.e) * ry + i64::from(matrix.f)) / divider;

    Ok(Point::new(
        i32::try_from(x).map_err(|_| CalibrationError::Overflow)?,
        i32::try_from(y).map_err(|_| CalibrationError::Overflow)?,
    ))
}

/// Index of the first widget containing `point`
///
/// Earlier widgets win where widgets overlap.
pub fn resolve_widget(point: Point, widgets: &[Widget<'_>]) -> Option<usize> {
    widgets.iter().position(|w| w.is_hit(point.x, point.y))
}

/// One matrix per orientation
///
/// Turning the panel upside down inverts the raw axes relative to the
/// logical pixels, so each orientation is calibrated separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationSet {
    pub deg0: CalibrationMatrix,
    pub deg180: CalibrationMatrix,
}

impl CalibrationSet {
    pub const fn new(deg0: CalibrationMatrix, deg180: CalibrationMatrix) -> Self {
        Self { deg0, deg180 }
    }

    /// Matrix for `rotation`
    pub fn for_rotation(&self, rotation: Rotation) -> &CalibrationMatrix {
        match rotation {
            Rotation::Deg0 => &self.deg0,
            Rotation::Deg180 => &self.deg180,
        }
    }

    pub fn set(&mut self, rotation: Rotation, matrix: CalibrationMatrix) {
        match rotation {
            Rotation::Deg0 => self.deg0 = matrix,
            Rotation::Deg180 => self.deg180 = matrix,
        }
    }

    /// Both orientations calibrated
    pub fn is_complete(&self) -> bool {
        self.deg0.is_calibrated() && self.deg180.is_calibrated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{WidgetSpec, WidgetStyle};

    #[test]
    fn test_identity() {
        let point = calibrate(RawSample::new(37, 52), &CalibrationMatrix::IDENTITY).unwrap();
        assert_eq!(point, Point::new(37, 52));
    }

    #[test]
    fn test_zero_divider_always_fails() {
        let matrix = CalibrationMatrix {
            divider: 0,
            ..CalibrationMatrix::IDENTITY
        };
        for raw in [RawSample::new(0, 0), RawSample::new(37, 52), RawSample::new(u16::MAX, 1)] {
            assert_eq!(
                calibrate(raw, &matrix),
                Err(CalibrationError::UncalibratedTransform)
            );
        }
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        // x = -raw.x / 2, y = raw.y / 2
        let matrix = CalibrationMatrix {
            a: -1,
            b: 0,
            c: 0,
            d: 0,
            e: 1,
            f: 0,
            divider: 2,
        };
        let point = calibrate(RawSample::new(7, 7), &matrix).unwrap();
        assert_eq!(point, Point::new(-3, 3));
    }

    #[test]
    fn test_overflow_is_reported() {
        let matrix = CalibrationMatrix {
            a: i32::MAX,
            ..CalibrationMatrix::IDENTITY
        };
        assert_eq!(
            calibrate(RawSample::new(1000, 0), &matrix),
            Err(CalibrationError::Overflow)
        );
    }

    #[test]
    fn test_three_point_solve_reproduces_mapping() {
        // display.x = raw.x + 10, display.y = 2 * raw.y - 50
        let raw = [
            RawSample::new(100, 100),
            RawSample::new(300, 120),
            RawSample::new(150, 400),
        ];
        let display = [Point::new(110, 150), Point::new(310, 190), Point::new(160, 750)];

        let matrix = CalibrationMatrix::from_reference_points(display, raw).unwrap();
        assert_eq!(matrix.divider, 59_000);

        for (raw, expected) in raw.into_iter().zip(display) {
            assert_eq!(calibrate(raw, &matrix).unwrap(), expected);
        }
        assert_eq!(
            calibrate(RawSample::new(200, 250), &matrix).unwrap(),
            Point::new(210, 450)
        );
    }

    #[test]
    fn test_extreme_reference_reports_overflow() {
        let display = [
            Point::new(i32::MAX, 0),
            Point::new(0, 0),
            Point::new(i32::MIN, 5),
        ];
        let raw = [
            RawSample::new(u16::MAX, u16::MAX),
            RawSample::new(0, u16::MAX),
            RawSample::new(u16::MAX, 0),
        ];
        assert_eq!(
            CalibrationMatrix::from_reference_points(display, raw),
            Err(CalibrationError::Overflow)
        );
    }

    #[test]
    fn test_collinear_reference_rejected() {
        let raw = [RawSample::new(0, 0), RawSample::new(10, 10), RawSample::new(20, 20)];
        let display = [Point::new(0, 0), Point::new(5, 9), Point::new(100, 3)];
        assert_eq!(
            CalibrationMatrix::from_reference_points(display, raw),
            Err(CalibrationError::DegenerateReference)
        );
    }

    #[test]
    fn test_first_match_wins() {
        let widgets = [
            Widget::new(&WidgetSpec::area(0, 0, 100, 100, WidgetStyle::HIDDEN)),
            Widget::new(&WidgetSpec::area(50, 50, 100, 100, WidgetStyle::HIDDEN)),
        ];
        let overlap = Point::new(75, 75);
        for _ in 0..3 {
            assert_eq!(resolve_widget(overlap, &widgets), Some(0));
        }
        assert_eq!(resolve_widget(Point::new(140, 140), &widgets), Some(1));
        assert_eq!(resolve_widget(Point::new(400, 10), &widgets), None);
    }

    #[test]
    fn test_set_selects_by_rotation() {
        let mut set = CalibrationSet::default();
        assert!(!set.is_complete());
        set.set(Rotation::Deg180, CalibrationMatrix::IDENTITY);

        assert_eq!(set.for_rotation(Rotation::Deg180), &CalibrationMatrix::IDENTITY);
        assert!(!set.for_rotation(Rotation::Deg0).is_calibrated());
    }
}
