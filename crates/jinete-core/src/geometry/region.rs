//! Multi-rectangle regions for dirty tracking and clipping.
//!
//! A [`Region`] is stored in y-x banded form: the rectangle list is split
//! into horizontal bands, every rectangle of a band shares the same `y1`/`y2`,
//! rectangles inside a band are disjoint, non-touching and sorted by `x1`,
//! and two vertically adjacent bands with identical spans are merged into
//! one. Every operation returns a region in this form, so the representation
//! of a given pixel set is unique and equality is a plain list comparison.
//!
//! # Example
//!
//! ```
//! use jinete_core::{Rect, Region, RectIn};
//!
//! let screen = Region::from_rect(Rect::new(0, 0, 100, 100));
//! let window = Region::from_rect(Rect::new(10, 10, 50, 50));
//!
//! let background = screen.subtract(&window);
//! assert_eq!(background.rect_in(&Rect::new(20, 20, 30, 30)), RectIn::Out);
//! assert_eq!(background.rect_in(&Rect::new(0, 0, 5, 5)), RectIn::In);
//! assert_eq!(background.rect_in(&Rect::new(0, 0, 20, 20)), RectIn::Part);
//! ```

use super::rect::{Point, Rect};

/// Classification of a rectangle against a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectIn {
    /// The rectangle does not touch the region.
    Out,
    /// The rectangle lies completely inside the region.
    In,
    /// The rectangle is partially covered.
    Part,
}

/// An arbitrary area made of non-overlapping rectangles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region {
    rects: Vec<Rect>,
    broken: bool,
}

type Span = (i32, i32);

impl Region {
    /// Create an empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region covering a single rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        if rect.is_empty() {
            Self::new()
        } else {
            Self {
                rects: vec![rect],
                broken: false,
            }
        }
    }

    /// Create a region covering the union of the given rectangles.
    pub fn from_rects<I: IntoIterator<Item = Rect>>(rects: I) -> Self {
        rects
            .into_iter()
            .fold(Self::new(), |acc, rect| acc.union_rect(rect))
    }

    /// A region in the "broken" state.
    ///
    /// A broken region stands for "everything / unknown extent": every
    /// operation involving it yields a broken region again. Redraw code
    /// treats it as a request to repaint the whole target.
    pub fn broken() -> Self {
        Self {
            rects: Vec::new(),
            broken: true,
        }
    }

    /// Force this region into the broken state.
    pub fn break_region(&mut self) {
        self.rects.clear();
        self.broken = true;
    }

    /// Whether this region is in the broken state.
    #[inline]
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Whether the region covers nothing. A broken region is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.broken && self.rects.is_empty()
    }

    /// Remove every rectangle (also clears the broken state).
    pub fn clear(&mut self) {
        self.rects.clear();
        self.broken = false;
    }

    /// The rectangles of the region, sorted by `y1` then `x1`.
    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Number of rectangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Bounding box of the region.
    pub fn extents(&self) -> Rect {
        self.rects
            .iter()
            .fold(Rect::EMPTY, |acc, rect| acc.union(rect))
    }

    /// Union of two regions.
    pub fn union(&self, other: &Region) -> Region {
        combine(self, other, |a, b| a || b)
    }

    /// Intersection of two regions.
    pub fn intersect(&self, other: &Region) -> Region {
        combine(self, other, |a, b| a && b)
    }

    /// The part of `self` not covered by `other`.
    pub fn subtract(&self, other: &Region) -> Region {
        combine(self, other, |a, b| a && !b)
    }

    /// Union with a single rectangle.
    pub fn union_rect(&self, rect: Rect) -> Region {
        self.union(&Region::from_rect(rect))
    }

    /// Intersection with a single rectangle.
    pub fn intersect_rect(&self, rect: Rect) -> Region {
        self.intersect(&Region::from_rect(rect))
    }

    /// Subtract a single rectangle.
    pub fn subtract_rect(&self, rect: Rect) -> Region {
        self.subtract(&Region::from_rect(rect))
    }

    /// Move the whole region by the given offset.
    pub fn translate(&self, dx: i32, dy: i32) -> Region {
        Region {
            rects: self.rects.iter().map(|r| r.translate(dx, dy)).collect(),
            broken: self.broken,
        }
    }

    /// Whether the point lies inside the region.
    pub fn contains_point(&self, point: Point) -> bool {
        self.rects.iter().any(|r| r.contains(point))
    }

    /// Classify a rectangle against the region.
    pub fn rect_in(&self, rect: &Rect) -> RectIn {
        if rect.is_empty() {
            return RectIn::Out;
        }
        if self.broken {
            return RectIn::Part;
        }
        let covered = self.intersect_rect(*rect);
        if covered.is_empty() {
            RectIn::Out
        } else if covered == Region::from_rect(*rect) {
            RectIn::In
        } else {
            RectIn::Part
        }
    }

    /// Check the banded-form invariants.
    ///
    /// Always true for regions produced by this module; exposed so callers
    /// building regions incrementally can assert it in tests.
    pub fn is_well_formed(&self) -> bool {
        let mut prev: Option<&Rect> = None;
        for rect in &self.rects {
            if rect.is_empty() {
                return false;
            }
            if let Some(p) = prev {
                let same_band = p.y1 == rect.y1 && p.y2 == rect.y2;
                if same_band {
                    // Touching spans would have been merged.
                    if rect.x1 <= p.x2 {
                        return false;
                    }
                } else if rect.y1 < p.y2 {
                    return false;
                }
            }
            prev = Some(rect);
        }
        true
    }
}

/// Spans of `rects` covering the whole band `[top, bottom)`, sorted and merged.
fn band_spans(rects: &[Rect], top: i32, bottom: i32) -> Vec<Span> {
    let mut spans: Vec<Span> = rects
        .iter()
        .filter(|r| r.y1 <= top && r.y2 >= bottom)
        .map(|r| (r.x1, r.x2))
        .collect();
    spans.sort_unstable();

    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for (x1, x2) in spans {
        match merged.last_mut() {
            Some(last) if x1 <= last.1 => last.1 = last.1.max(x2),
            _ => merged.push((x1, x2)),
        }
    }
    merged
}

fn span_covers(spans: &[Span], l: i32, r: i32) -> bool {
    spans.iter().any(|&(x1, x2)| x1 <= l && x2 >= r)
}

fn combine_spans(a: &[Span], b: &[Span], op: &impl Fn(bool, bool) -> bool) -> Vec<Span> {
    let mut xs: Vec<i32> = a.iter().chain(b).flat_map(|&(x1, x2)| [x1, x2]).collect();
    xs.sort_unstable();
    xs.dedup();

    let mut out: Vec<Span> = Vec::new();
    for pair in xs.windows(2) {
        let (l, r) = (pair[0], pair[1]);
        if !op(span_covers(a, l, r), span_covers(b, l, r)) {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.1 == l => last.1 = r,
            _ => out.push((l, r)),
        }
    }
    out
}

fn same_spans(band: &[Rect], spans: &[Span]) -> bool {
    band.len() == spans.len()
        && band
            .iter()
            .zip(spans)
            .all(|(rect, &(x1, x2))| rect.x1 == x1 && rect.x2 == x2)
}

fn combine(a: &Region, b: &Region, op: impl Fn(bool, bool) -> bool) -> Region {
    if a.broken || b.broken {
        return Region::broken();
    }

    let mut ys: Vec<i32> = a
        .rects
        .iter()
        .chain(&b.rects)
        .flat_map(|r| [r.y1, r.y2])
        .collect();
    ys.sort_unstable();
    ys.dedup();

    let mut out: Vec<Rect> = Vec::new();
    // Start index (in `out`) and bottom edge of the last emitted band.
    let mut last_band: Option<(usize, i32)> = None;

    for pair in ys.windows(2) {
        let (top, bottom) = (pair[0], pair[1]);
        let spans = combine_spans(
            &band_spans(&a.rects, top, bottom),
            &band_spans(&b.rects, top, bottom),
            &op,
        );
        if spans.is_empty() {
            continue;
        }

        if let Some((start, y2)) = last_band {
            if y2 == top && same_spans(&out[start..], &spans) {
                for rect in &mut out[start..] {
                    rect.y2 = bottom;
                }
                last_band = Some((start, bottom));
                continue;
            }
        }

        let start = out.len();
        out.extend(
            spans
                .iter()
                .map(|&(x1, x2)| Rect::new(x1, top, x2, bottom)),
        );
        last_band = Some((start, bottom));
    }

    Region {
        rects: out,
        broken: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Region {
        Region::from_rects([Rect::new(0, 0, 10, 20), Rect::new(10, 10, 30, 20)])
    }

    #[test]
    fn test_union_is_commutative() {
        let a = Region::from_rects([Rect::new(0, 0, 10, 10), Rect::new(40, 5, 50, 30)]);
        let b = Region::from_rects([Rect::new(5, 5, 45, 15), Rect::new(0, 25, 8, 40)]);
        assert_eq!(a.union(&b), b.union(&a));
        assert!(a.union(&b).is_well_formed());
    }

    #[test]
    fn test_subtract_self_is_empty() {
        let a = l_shape();
        assert!(a.subtract(&a).is_empty());
    }

    #[test]
    fn test_intersect_with_empty_is_empty() {
        assert!(l_shape().intersect(&Region::new()).is_empty());
    }

    #[test]
    fn test_vertical_bands_coalesce() {
        let region = Region::from_rects([Rect::new(0, 0, 10, 5), Rect::new(0, 5, 10, 10)]);
        assert_eq!(region.rects(), &[Rect::new(0, 0, 10, 10)]);
    }

    #[test]
    fn test_horizontal_spans_merge() {
        let region = Region::from_rects([Rect::new(0, 0, 10, 10), Rect::new(10, 0, 20, 10)]);
        assert_eq!(region.rects(), &[Rect::new(0, 0, 20, 10)]);
    }

    #[test]
    fn test_l_shape_bands() {
        let region = l_shape();
        assert_eq!(
            region.rects(),
            &[Rect::new(0, 0, 10, 10), Rect::new(0, 10, 30, 20)]
        );
        assert!(region.is_well_formed());
    }

    #[test]
    fn test_subtract_hole() {
        let outer = Region::from_rect(Rect::new(0, 0, 30, 30));
        let ring = outer.subtract_rect(Rect::new(10, 10, 20, 20));
        assert_eq!(
            ring.rects(),
            &[
                Rect::new(0, 0, 30, 10),
                Rect::new(0, 10, 10, 20),
                Rect::new(20, 10, 30, 20),
                Rect::new(0, 20, 30, 30),
            ]
        );
        assert!(!ring.contains_point(Point::new(15, 15)));
        assert!(ring.contains_point(Point::new(5, 15)));
    }

    #[test]
    fn test_rect_in() {
        let region = l_shape();
        assert_eq!(region.rect_in(&Rect::new(0, 0, 5, 5)), RectIn::In);
        assert_eq!(region.rect_in(&Rect::new(20, 0, 30, 5)), RectIn::Out);
        assert_eq!(region.rect_in(&Rect::new(5, 5, 25, 15)), RectIn::Part);
        assert_eq!(region.rect_in(&Rect::EMPTY), RectIn::Out);
    }

    #[test]
    fn test_translate_keeps_shape() {
        let moved = l_shape().translate(5, -5);
        assert_eq!(
            moved.rects(),
            &[Rect::new(5, -5, 15, 5), Rect::new(5, 5, 35, 15)]
        );
        assert_eq!(moved.translate(-5, 5), l_shape());
    }

    #[test]
    fn test_broken_propagates() {
        let broken = Region::broken();
        assert!(!broken.is_empty());
        assert!(broken.union(&l_shape()).is_broken());
        assert!(l_shape().intersect(&broken).is_broken());

        let mut region = l_shape();
        region.break_region();
        assert!(region.is_broken());
        region.clear();
        assert!(region.is_empty());
    }

    #[test]
    fn test_extents() {
        assert_eq!(l_shape().extents(), Rect::new(0, 0, 30, 20));
        assert_eq!(Region::new().extents(), Rect::EMPTY);
    }
}
