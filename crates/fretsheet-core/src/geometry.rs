//! Geometric primitives for page layout.
//!
//! This module provides the types the layout engine trades in while it walks
//! an element tree and carves space out of a page.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in page space
//! - [`Size`] - Width and height dimensions
//! - [`Insets`] - Padding/margin values for four sides
//! - [`Rect`] - An origin plus a size; the unit of layout currency
//!
//! # Coordinate System
//!
//! Fretsheet uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Elements consume vertical space from the top of the rectangle they are
//! given, so "remaining space" always moves towards +Y.

/// A 2D point representing a position in page coordinate space.
///
/// # Examples
///
/// ```
/// # use fretsheet_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size with padding added to both width and height
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

/// A rectangle defined by its top-left origin and its size.
///
/// `Rect` is what elements receive and hand back during layout. Carving
/// operations only ever shrink a rectangle:
///
/// - [`Rect::carve_top`] / [`Rect::carve_left`] mutate the receiver into the
///   remainder and return the slice that was cut off.
/// - [`Rect::split_top`] / [`Rect::split_left`] are the value-returning forms.
///
/// When more height is carved than is available the origin still advances by
/// the full amount while the height saturates at zero. This keeps the consumed
/// height exact during measurement passes that overflow a page.
///
/// # Examples
///
/// ```
/// # use fretsheet_core::geometry::{Point, Rect, Size};
/// let mut area = Rect::new(Point::new(0.0, 0.0), Size::new(100.0, 200.0));
///
/// let header = area.carve_top(30.0);
/// assert_eq!(header.height(), 30.0);
/// assert_eq!(area.min_y(), 30.0);
/// assert_eq!(area.height(), 170.0);
///
/// let gutter = area.carve_left(20.0);
/// assert_eq!(gutter.width(), 20.0);
/// assert_eq!(area.min_x(), 20.0);
/// assert_eq!(area.width(), 80.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size
    pub fn new(origin: Point, size: Size) -> Self {
        debug_assert!(
            size.width >= 0.0 && size.height >= 0.0,
            "rectangle extents must not be negative: {size:?}"
        );
        Self { origin, size }
    }

    /// Creates a rectangle from raw coordinates
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    /// Returns the top-left corner
    pub fn origin(self) -> Point {
        self.origin
    }

    /// Returns the size of the rectangle
    pub fn size(self) -> Size {
        self.size
    }

    pub fn min_x(self) -> f32 {
        self.origin.x
    }

    pub fn min_y(self) -> f32 {
        self.origin.y
    }

    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn width(self) -> f32 {
        self.size.width
    }

    pub fn height(self) -> f32 {
        self.size.height
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns a copy with the given height, keeping the origin
    pub fn with_height(self, height: f32) -> Self {
        Self::new(self.origin, Size::new(self.size.width, height))
    }

    /// Returns a copy with the given width, keeping the origin
    pub fn with_width(self, width: f32) -> Self {
        Self::new(self.origin, Size::new(width, self.size.height))
    }

    /// Moves the rectangle by the specified offset, keeping its size
    pub fn translate(self, offset: Point) -> Self {
        Self {
            origin: self.origin.add_point(offset),
            size: self.size,
        }
    }

    /// Shrinks the rectangle symmetrically: `dx` from the left and right
    /// edges, `dy` from the top and bottom edges.
    ///
    /// The resulting extents are clamped at zero.
    pub fn inset(self, dx: f32, dy: f32) -> Self {
        self.inset_by(Insets::new(dy, dx, dy, dx))
    }

    /// Shrinks the rectangle by per-side insets, clamping extents at zero
    pub fn inset_by(self, insets: Insets) -> Self {
        Self {
            origin: Point::new(
                self.origin.x + insets.left(),
                self.origin.y + insets.top(),
            ),
            size: Size::new(
                (self.size.width - insets.horizontal_sum()).max(0.0),
                (self.size.height - insets.vertical_sum()).max(0.0),
            ),
        }
    }

    /// Cuts `amount` off the top and returns it; `self` becomes the remainder.
    pub fn carve_top(&mut self, amount: f32) -> Rect {
        let (slice, remainder) = self.split_top(amount);
        *self = remainder;
        slice
    }

    /// Cuts `amount` off the leading edge and returns it; `self` becomes the
    /// remainder.
    pub fn carve_left(&mut self, amount: f32) -> Rect {
        let (slice, remainder) = self.split_left(amount);
        *self = remainder;
        slice
    }

    /// Splits into a top slice of height `amount` and the remainder below it.
    ///
    /// The remainder's origin moves down by the full `amount`, its height
    /// saturates at zero.
    pub fn split_top(self, amount: f32) -> (Rect, Rect) {
        debug_assert!(amount >= 0.0, "cannot carve a negative height: {amount}");
        let slice = Self {
            origin: self.origin,
            size: Size::new(self.size.width, amount.min(self.size.height)),
        };
        let remainder = Self {
            origin: self.origin.with_y(self.origin.y + amount),
            size: Size::new(self.size.width, (self.size.height - amount).max(0.0)),
        };
        (slice, remainder)
    }

    /// Splits into a leading slice of width `amount` and the remainder to
    /// its right, with the same saturation rules as [`Rect::split_top`].
    pub fn split_left(self, amount: f32) -> (Rect, Rect) {
        debug_assert!(amount >= 0.0, "cannot carve a negative width: {amount}");
        let slice = Self {
            origin: self.origin,
            size: Size::new(amount.min(self.size.width), self.size.height),
        };
        let remainder = Self {
            origin: self.origin.with_x(self.origin.x + amount),
            size: Size::new((self.size.width - amount).max(0.0), self.size.height),
        };
        (slice, remainder)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(4.0, 5.0);

        assert_eq!(a.add_point(b), Point::new(14.0, 25.0));
        assert_eq!(a.sub_point(b), Point::new(6.0, 15.0));
        assert_eq!(a.scale(0.5), Point::new(5.0, 10.0));
        assert_eq!(a.with_x(1.0).with_y(2.0), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_size_max_and_padding() {
        let a = Size::new(10.0, 40.0);
        let b = Size::new(30.0, 20.0);
        assert_eq!(a.max(b), Size::new(30.0, 40.0));

        let padded = a.add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_approx_eq!(f32, padded.width(), 16.0);
        assert_approx_eq!(f32, padded.height(), 44.0);
        assert!(Size::default().is_zero());
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_approx_eq!(f32, insets.horizontal_sum(), 6.0);
        assert_approx_eq!(f32, insets.vertical_sum(), 4.0);
        assert_eq!(Insets::uniform(2.0), Insets::new(2.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn test_rect_accessors() {
        let rect = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_approx_eq!(f32, rect.min_x(), 10.0);
        assert_approx_eq!(f32, rect.min_y(), 20.0);
        assert_approx_eq!(f32, rect.max_x(), 40.0);
        assert_approx_eq!(f32, rect.max_y(), 60.0);
        assert_eq!(rect.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn test_rect_inset_symmetric() {
        let rect = Rect::from_xywh(0.0, 0.0, 100.0, 50.0).inset(5.0, 10.0);
        assert_eq!(rect, Rect::from_xywh(5.0, 10.0, 90.0, 30.0));
    }

    #[test]
    fn test_rect_inset_clamps_at_zero() {
        let rect = Rect::from_xywh(0.0, 0.0, 4.0, 4.0).inset(3.0, 3.0);
        assert_approx_eq!(f32, rect.width(), 0.0);
        assert_approx_eq!(f32, rect.height(), 0.0);
    }

    #[test]
    fn test_rect_carve_top() {
        let mut rect = Rect::from_xywh(0.0, 10.0, 100.0, 50.0);
        let slice = rect.carve_top(20.0);

        assert_eq!(slice, Rect::from_xywh(0.0, 10.0, 100.0, 20.0));
        assert_eq!(rect, Rect::from_xywh(0.0, 30.0, 100.0, 30.0));
    }

    #[test]
    fn test_rect_carve_left() {
        let mut rect = Rect::from_xywh(10.0, 0.0, 100.0, 50.0);
        let slice = rect.carve_left(25.0);

        assert_eq!(slice, Rect::from_xywh(10.0, 0.0, 25.0, 50.0));
        assert_eq!(rect, Rect::from_xywh(35.0, 0.0, 75.0, 50.0));
    }

    #[test]
    fn test_rect_carve_past_end_saturates_height() {
        let mut rect = Rect::from_xywh(0.0, 0.0, 10.0, 15.0);
        let slice = rect.carve_top(40.0);

        assert_approx_eq!(f32, slice.height(), 15.0);
        assert_approx_eq!(f32, rect.min_y(), 40.0);
        assert_approx_eq!(f32, rect.height(), 0.0);
    }

    #[test]
    fn test_rect_translate() {
        let rect = Rect::from_xywh(1.0, 2.0, 3.0, 4.0).translate(Point::new(10.0, 20.0));
        assert_eq!(rect, Rect::from_xywh(11.0, 22.0, 3.0, 4.0));
    }
}
