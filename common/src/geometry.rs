//! Hand and tick-mark geometry.
//!
//! All shapes are defined in a local frame centered on the pivot, with the
//! tip pointing toward 12 o'clock (negative y), then rotated clockwise by the
//! hand angle and translated to the dial center.
//!
//! # Rotation Primitive
//!
//! ```text
//! x' = x·cos θ − y·sin θ + 0.5
//! y' = x·sin θ + y·cos θ + 0.5
//! ```
//! The `+0.5` bias is applied before translation so that truncating the final
//! coordinate to an integer pixel snaps to the nearest pixel. Every vertex in
//! the watchface goes through [`rotate`], so output is bit-identical across
//! hosts for a given `libm`.
//!
//! # Angle Convention
//!
//! Angles are radians in `[0, 2π)`, 0 = 12 o'clock, increasing clockwise on
//! a y-down screen.

use core::f32::consts::TAU;

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::settings::HandMode;
use crate::time::ClockTime;

/// Bias added to both axes after rotation.
pub const PIXEL_BIAS: f32 = 0.5;

// =============================================================================
// Points
// =============================================================================

/// Fractional pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Truncate to an integer pixel.
    #[inline]
    pub const fn to_pixel(self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }

    #[inline]
    fn translate(self, by: Self) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

/// Hour hand outline: tip-left, tip-right, tail-center.
pub type Triangle3 = [PointF; 3];

/// Minute hand outline: tail-left, tip-left, tip-right, tail-right.
pub type Quad4 = [PointF; 4];

// =============================================================================
// Rotation
// =============================================================================

/// Rotate `point` about the origin by `angle` radians and add the pixel bias.
#[inline]
pub fn rotate(point: PointF, angle: f32) -> PointF {
    let cos = libm::cosf(angle);
    let sin = libm::sinf(angle);
    PointF::new(
        point.x * cos - point.y * sin + PIXEL_BIAS,
        point.x * sin + point.y * cos + PIXEL_BIAS,
    )
}

#[inline]
fn place(local: PointF, center: PointF, angle: f32) -> PointF {
    rotate(local, angle).translate(center)
}

/// Minute hand quadrilateral.
///
/// Local frame `[(-w/2, tail), (-w/2, -len), (w/2, -len), (w/2, tail)]`
/// with `w/2` computed in integer pixels.
pub fn generate_hand_coordinates(
    center: PointF,
    angle: f32,
    hand_length: u32,
    tail_length: u32,
    width: u32,
) -> Quad4 {
    let half = (width / 2) as f32;
    let len = hand_length as f32;
    let tail = tail_length as f32;

    [
        place(PointF::new(-half, tail), center, angle),
        place(PointF::new(-half, -len), center, angle),
        place(PointF::new(half, -len), center, angle),
        place(PointF::new(half, tail), center, angle),
    ]
}

/// Hour hand triangle.
///
/// Local frame `[(-w/2, -len), (w/2, -len), (0, tail)]`: wide at the rim,
/// pointed just past the pivot.
pub fn generate_hour_coordinates(
    center: PointF,
    angle: f32,
    hand_length: u32,
    tail_length: u32,
    width: u32,
) -> Triangle3 {
    let half = (width / 2) as f32;
    let len = hand_length as f32;
    let tail = tail_length as f32;

    [
        place(PointF::new(-half, -len), center, angle),
        place(PointF::new(half, -len), center, angle),
        place(PointF::new(0.0, tail), center, angle),
    ]
}

// =============================================================================
// Hand Angles
// =============================================================================

/// Hour hand angle.
///
/// `((hour mod 12) * 60 + m) / 720 * 2π` where `m` is the minute in
/// [`HandMode::Smooth`] and 0 in [`HandMode::Discrete`].
pub fn hour_angle(time: ClockTime, mode: HandMode) -> f32 {
    let minute = match mode {
        HandMode::Smooth => u32::from(time.minute),
        HandMode::Discrete => 0,
    };
    let total = u32::from(time.hour % 12) * 60 + minute;
    total as f32 / 720.0 * TAU
}

/// Minute hand angle, `minute / 60 * 2π`.
pub fn minute_angle(time: ClockTime) -> f32 {
    f32::from(time.minute) / 60.0 * TAU
}

// =============================================================================
// Bounding Boxes
// =============================================================================

/// Componentwise `(min, max)` over `points`. `None` for an empty slice.
pub fn bounding_box(points: &[PointF]) -> Option<(PointF, PointF)> {
    let (first, rest) = points.split_first()?;
    let mut min = *first;
    let mut max = *first;
    for p in rest {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Smallest pixel rectangle covering every truncated vertex of `points`.
pub fn pixel_bounds(points: &[PointF]) -> Option<Rectangle> {
    let (min, max) = bounding_box(points)?;
    let top_left = min.to_pixel();
    let bottom_right = max.to_pixel();
    Some(Rectangle::with_corners(top_left, bottom_right))
}

/// Smallest rectangle containing both `a` and `b`.
pub fn union_rect(a: Rectangle, b: Rectangle) -> Rectangle {
    if a.is_zero_sized() {
        return b;
    }
    if b.is_zero_sized() {
        return a;
    }
    let (Some(a_br), Some(b_br)) = (a.bottom_right(), b.bottom_right()) else {
        return a;
    };
    Rectangle::with_corners(
        Point::new(a.top_left.x.min(b.top_left.x), a.top_left.y.min(b.top_left.y)),
        Point::new(a_br.x.max(b_br.x), a_br.y.max(b_br.y)),
    )
}

/// Square of side `2r + 1` centered on `center`.
pub fn square_around(center: Point, radius: u32) -> Rectangle {
    let r = radius as i32;
    Rectangle::new(
        Point::new(center.x - r, center.y - r),
        Size::new(radius * 2 + 1, radius * 2 + 1),
    )
}

// =============================================================================
// Hash Marks
// =============================================================================

/// Straight line segment between two fractional points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: PointF,
    pub end: PointF,
}

/// Iterator over the radial hash-mark segments of a dial.
///
/// Produces `major_count * (minor_divisions + 1)` evenly spaced segments,
/// starting at 12 o'clock and running clockwise. Each runs from
/// `outer_radius - length` to `outer_radius` along its radius.
#[derive(Clone, Debug)]
pub struct HashMarks {
    center: PointF,
    inner: f32,
    outer: f32,
    total: u32,
    index: u32,
}

impl Iterator for HashMarks {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.index >= self.total {
            return None;
        }
        let angle = self.index as f32 * TAU / self.total as f32;
        self.index += 1;
        Some(Segment {
            start: place(PointF::new(0.0, -self.inner), self.center, angle),
            end: place(PointF::new(0.0, -self.outer), self.center, angle),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HashMarks {}

/// Hash marks for `major_count` sectors, each split by `minor_divisions` extra marks.
///
/// A 12-hour dial is `(6, 1, len)`: six sectors of two marks each.
/// A zero `length` yields zero-length segments.
pub fn generate_hash_mark_segments(
    center: PointF,
    outer_radius: u32,
    major_count: u32,
    minor_divisions: u32,
    length: u32,
) -> HashMarks {
    HashMarks {
        center,
        inner: outer_radius.saturating_sub(length) as f32,
        outer: outer_radius as f32,
        total: major_count * (minor_divisions + 1),
        index: 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
