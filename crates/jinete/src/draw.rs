//! Drawing backend abstraction.
//!
//! The manager and the built-in widgets draw through a [`DrawSurface`]. Real
//! backends (a framebuffer, a terminal, a GPU canvas) implement it outside
//! this crate. [`RecordingSurface`] keeps every call for inspection in tests
//! and [`NullSurface`] discards everything.

use std::cell::RefCell;
use std::rc::Rc;

use jinete_core::{Point, Rect, Region, Size};

/// An opaque RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a 32-bit RGBA value (0xRRGGBBAA).
    #[inline]
    pub const fn from_u32(rgba: u32) -> Self {
        Self::rgba(
            ((rgba >> 24) & 0xFF) as u8,
            ((rgba >> 16) & 0xFF) as u8,
            ((rgba >> 8) & 0xFF) as u8,
            (rgba & 0xFF) as u8,
        )
    }
}

/// Fixed-cell font metrics used for text measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// Advance of one character.
    pub char_width: i32,
    /// Height of one line.
    pub line_height: i32,
}

impl FontMetrics {
    /// Create metrics.
    pub const fn new(char_width: i32, line_height: i32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }

    /// Size of `text` laid out on a single line.
    pub fn text_size(&self, text: &str) -> Size {
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        Size::new(chars.saturating_mul(self.char_width), self.line_height)
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

/// Colors and metrics of the built-in widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub desktop: Color,
    pub face: Color,
    pub selected: Color,
    pub hot: Color,
    pub border: Color,
    pub text: Color,
    pub disabled_text: Color,
    pub title_bar: Color,
    pub title_text: Color,
    pub tooltip_face: Color,
    /// Border of buttons (space around the text).
    pub button_border: i32,
    /// Border of windows; the title bar is added to the top.
    pub window_border: i32,
    /// Border of tooltip windows.
    pub tooltip_border: i32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            desktop: Color::rgb(0, 128, 128),
            face: Color::rgb(192, 192, 192),
            selected: Color::rgb(160, 160, 160),
            hot: Color::rgb(224, 224, 224),
            border: Color::BLACK,
            text: Color::BLACK,
            disabled_text: Color::rgb(128, 128, 128),
            title_bar: Color::rgb(0, 0, 128),
            title_text: Color::WHITE,
            tooltip_face: Color::rgb(255, 255, 192),
            button_border: 4,
            window_border: 3,
            tooltip_border: 2,
        }
    }
}

/// A drawing target.
///
/// All coordinates are screen coordinates. Every operation is clipped to the
/// current clip rectangle.
pub trait DrawSurface {
    /// Size of the target.
    fn size(&self) -> Size;

    // =========================================================================
    // Clipping
    // =========================================================================

    /// Restrict drawing to `clip` (or lift the restriction with `None`).
    fn set_clip(&mut self, clip: Option<Rect>);

    /// The current clip rectangle.
    fn clip(&self) -> Option<Rect>;

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw the one-pixel outline of a rectangle.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draw a single line of text with its top-left corner at `origin`.
    ///
    /// With `bg`, the text cell area is filled first.
    fn draw_text(
        &mut self,
        font: &FontMetrics,
        text: &str,
        origin: Point,
        fg: Color,
        bg: Option<Color>,
    );

    /// Copy the pixels of `region` moved by (`dx`, `dy`).
    fn blit_region(&mut self, region: &Region, dx: i32, dy: i32);
}

/// A surface that draws nothing.
#[derive(Debug, Clone, Default)]
pub struct NullSurface {
    size: Size,
    clip: Option<Rect>,
}

impl NullSurface {
    /// Create a surface of the given size.
    pub fn new(size: Size) -> Self {
        Self { size, clip: None }
    }
}

impl DrawSurface for NullSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_text(
        &mut self,
        _font: &FontMetrics,
        _text: &str,
        _origin: Point,
        _fg: Color,
        _bg: Option<Color>,
    ) {
    }

    fn blit_region(&mut self, _region: &Region, _dx: i32, _dy: i32) {}
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill { rect: Rect, color: Color, clip: Option<Rect> },
    Outline { rect: Rect, color: Color, clip: Option<Rect> },
    Text {
        text: String,
        origin: Point,
        fg: Color,
        bg: Option<Color>,
        clip: Option<Rect>,
    },
    Blit { region: Region, dx: i32, dy: i32 },
}

/// A surface that records every call.
///
/// Clones share the same log, so a test can keep one clone and move the
/// other into the UI.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    clip: Option<Rect>,
    ops: Rc<RefCell<Vec<DrawOp>>>,
}

impl RecordingSurface {
    /// Create a surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            clip: None,
            ops: Rc::default(),
        }
    }

    /// Copy of the recorded calls.
    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.borrow().clone()
    }

    /// Drop all recorded calls.
    pub fn clear(&self) {
        self.ops.borrow_mut().clear();
    }

    /// Texts drawn so far, in order.
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.borrow_mut().push(DrawOp::Fill {
            rect,
            color,
            clip: self.clip,
        });
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.ops.borrow_mut().push(DrawOp::Outline {
            rect,
            color,
            clip: self.clip,
        });
    }

    fn draw_text(
        &mut self,
        _font: &FontMetrics,
        text: &str,
        origin: Point,
        fg: Color,
        bg: Option<Color>,
    ) {
        self.ops.borrow_mut().push(DrawOp::Text {
            text: text.to_owned(),
            origin,
            fg,
            bg,
            clip: self.clip,
        });
    }

    fn blit_region(&mut self, region: &Region, dx: i32, dy: i32) {
        self.ops.borrow_mut().push(DrawOp::Blit {
            region: region.clone(),
            dx,
            dy,
        });
    }
}
