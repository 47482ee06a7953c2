//! Geometry primitives: points, sizes, rectangles and regions.

mod rect;
mod region;

pub use rect::{Borders, Point, Rect, Size};
pub use region::{RectIn, Region};
