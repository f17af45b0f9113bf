//! Document-space positions and their mapping to viewport pixels.
//!
//! Document space is centered on the canvas midpoint with Y pointing up.
//! Viewport space is the pixel space of whatever surface displays the
//! document, with its origin at the top-left and Y pointing down. Positions
//! never depend on zoom, pan, or viewport size; every conversion takes those
//! as explicit arguments.

use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// A point in document space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset from the document center.
    pub x: i32,
    /// Vertical offset from the document center, positive upward.
    pub y: i32,
}

impl Position {
    /// Anchor point of the background image.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Viewport point for this position with no pan or zoom applied.
    #[must_use]
    pub fn to_viewport(self, center: ViewportPoint) -> ViewportPoint {
        ViewportPoint::new(center.x + f64::from(self.x), center.y - f64::from(self.y))
    }

    /// Viewport point for this position under the given pan and zoom.
    ///
    /// Zoom scales about the viewport center and pan is applied afterwards,
    /// in viewport pixels.
    #[must_use]
    pub fn to_transformed_viewport(
        self,
        center: ViewportPoint,
        pan: Offset,
        zoom: f64,
    ) -> ViewportPoint {
        ViewportPoint::new(
            center.x + f64::from(self.x) * zoom + pan.width,
            center.y - f64::from(self.y) * zoom + pan.height,
        )
    }

    /// Document position under a viewport location.
    ///
    /// Exact inverse of [`Position::to_transformed_viewport`], truncated toward
    /// zero. Quotients within rounding error of a whole unit snap to it first,
    /// so mapping a position forward and back returns it unchanged at any zoom.
    #[must_use]
    pub fn from_viewport(
        location: ViewportPoint,
        center: ViewportPoint,
        pan: Offset,
        zoom: f64,
    ) -> Self {
        let x = (location.x - center.x - pan.width) / zoom;
        let y = (center.y - location.y + pan.height) / zoom;
        Self::new(to_document_unit(x), to_document_unit(y))
    }
}

/// Quotients closer than this to a whole number are taken as that number.
const SNAP_TOLERANCE: f64 = 1e-6;

#[allow(clippy::cast_possible_truncation)] // Truncation to whole document units is intended
fn to_document_unit(value: f64) -> i32 {
    let nearest = value.round();
    if (value - nearest).abs() < SNAP_TOLERANCE {
        nearest as i32
    } else {
        value as i32
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportPoint {
    /// Pixels from the left edge.
    pub x: f64,
    /// Pixels from the top edge.
    pub y: f64,
}

impl ViewportPoint {
    /// Create a viewport point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add<Offset> for ViewportPoint {
    type Output = Self;

    fn add(self, rhs: Offset) -> Self {
        Self::new(self.x + rhs.width, self.y + rhs.height)
    }
}

/// A translation in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal translation.
    pub width: f64,
    /// Vertical translation (positive is down).
    pub height: f64,
}

impl Offset {
    /// No translation.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create an offset.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for Offset {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.width * rhs, self.height * rhs)
    }
}

/// Size of the surface the document is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ViewportSize {
    /// Create a viewport size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of the viewport in its own pixel space.
    #[must_use]
    pub fn center(&self) -> ViewportPoint {
        ViewportPoint::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
