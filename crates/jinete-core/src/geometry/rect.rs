//! Integer points, sizes and rectangles.
//!
//! Rectangles are half-open: `x2`/`y2` are exclusive, so `width = x2 - x1`
//! both for layout and for drawing. A rectangle with `x2 <= x1` or
//! `y2 <= y1` is empty but still a valid value.

use std::fmt;

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Size {
    /// A zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Clamp both components to be non-negative.
    #[inline]
    pub fn clamped(self) -> Size {
        Size::new(self.width.max(0), self.height.max(0))
    }
}

/// Border widths for the four sides of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Borders {
    /// Left border.
    pub left: i32,
    /// Top border.
    pub top: i32,
    /// Right border.
    pub right: i32,
    /// Bottom border.
    pub bottom: i32,
}

impl Borders {
    /// No borders.
    pub const ZERO: Self = Self::uniform(0);

    /// Create borders from individual widths.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same width on every side.
    pub const fn uniform(width: i32) -> Self {
        Self::new(width, width, width, width)
    }

    /// Sum of the left and right borders.
    #[inline]
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of the top and bottom borders.
    #[inline]
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// An axis-aligned, half-open rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x1: i32,
    /// Top edge (inclusive).
    pub y1: i32,
    /// Right edge (exclusive).
    pub x2: i32,
    /// Bottom edge (exclusive).
    pub y2: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from its edges.
    #[inline]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width, never negative.
    #[inline]
    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).max(0)
    }

    /// Height, never negative.
    #[inline]
    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).max(0)
    }

    /// Size of the rectangle.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Center point (rounded toward the top-left).
    #[inline]
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Whether the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    /// Whether the point lies inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x1 && point.x < self.x2 && point.y >= self.y1 && point.y < self.y2
    }

    /// Whether `other` lies completely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x1 >= self.x1
                && other.y1 >= self.y1
                && other.x2 <= self.x2
                && other.y2 <= self.y2)
    }

    /// Whether the two rectangles share at least one pixel.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersect(other).is_empty()
    }

    /// The intersection. Disjoint rectangles produce an empty rectangle.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2).max(x1);
        let y2 = self.y2.min(other.y2).max(y1);
        Rect::new(x1, y1, x2, y2)
    }

    /// The bounding box of both rectangles. Empty inputs are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::new(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }

    /// Move the rectangle by the given offset.
    #[inline]
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }

    /// Shrink each side by the matching border width.
    ///
    /// The result never has a negative extent: a border larger than the
    /// rectangle collapses it to zero size.
    pub fn shrink(&self, borders: Borders) -> Rect {
        let x1 = self.x1 + borders.left;
        let y1 = self.y1 + borders.top;
        let x2 = (self.x2 - borders.right).max(x1);
        let y2 = (self.y2 - borders.bottom).max(y1);
        Rect::new(x1, y1, x2, y2)
    }

    /// Shrink every side by the same amount.
    #[inline]
    pub fn inset(&self, amount: i32) -> Rect {
        self.shrink(Borders::uniform(amount))
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {})-({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}
