//! Widget identity, kinds, flags and the widget arena.
//!
//! Widgets live in a [`WidgetTree`] arena owned by the [`Ui`](crate::Ui)
//! context. A [`WidgetId`] is a generation-checked handle: once a widget is
//! freed, every copy of its id resolves to nothing, even after the slot is
//! reused. Behavior is attached at runtime through [`Hook`]s.
//!
//! # Related Modules
//!
//! - [`crate::message`] - what hooks receive
//! - [`crate::manager`] - hook dispatch and the manager loop

mod hook;
pub(crate) mod node;
mod tree;

#[cfg(test)]
mod tests;

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use slotmap::new_key_type;

pub use hook::{FnHook, Hook, HookError, HookId, HookResult, HookTag};
pub use node::WidgetNode;
pub use tree::WidgetTree;

new_key_type! {
    /// A unique, generation-checked identifier for a widget.
    ///
    /// Ids of freed widgets never alias a newer widget stored in the same slot.
    pub struct WidgetId;
}

impl WidgetId {
    /// Convert the id to a raw u64 value (for logging or interop).
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Rebuild an id from a raw value produced by [`WidgetId::as_raw`].
    ///
    /// The id is not checked for liveness.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Type tag of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A plain widget with no built-in behavior.
    Widget,
    /// A box container (see [`crate::layout`]).
    Box,
    /// A grid container (see [`crate::layout`]).
    Grid,
    /// A push button.
    Button,
    /// A top-level window.
    Window,
    /// A manager (desktop root or sub-desktop).
    Manager,
    /// An application-defined kind.
    Custom(u32),
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Widget => write!(f, "Widget"),
            Self::Box => write!(f, "Box"),
            Self::Grid => write!(f, "Grid"),
            Self::Button => write!(f, "Button"),
            Self::Window => write!(f, "Window"),
            Self::Manager => write!(f, "Manager"),
            Self::Custom(n) => write!(f, "Custom({n})"),
        }
    }
}

/// State flags of a widget.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WidgetFlags(u16);

impl WidgetFlags {
    /// The widget is hidden.
    pub const HIDDEN: Self = Self(1 << 0);
    /// The widget is selected (pressed buttons, checked items).
    pub const SELECTED: Self = Self(1 << 1);
    /// The widget ignores input.
    pub const DISABLED: Self = Self(1 << 2);
    /// The widget is on the focus chain.
    pub const HAS_FOCUS: Self = Self(1 << 3);
    /// The widget is on the chain under the mouse cursor.
    pub const HAS_MOUSE: Self = Self(1 << 4);
    /// The widget holds the mouse capture.
    pub const HAS_CAPTURE: Self = Self(1 << 5);
    /// The widget can receive keyboard focus.
    pub const FOCUS_REST: Self = Self(1 << 6);
    /// The widget attracts focus when its window opens.
    pub const MAGNETIC: Self = Self(1 << 7);
    /// The widget absorbs leftover space in box layouts.
    pub const EXPANSIVE: Self = Self(1 << 8);
    /// The widget is decoration and never takes focus.
    pub const DECORATIVE: Self = Self(1 << 9);
    /// The widget finished its first theme initialization.
    pub const INITIALIZED: Self = Self(1 << 10);
    /// The widget has pending repaint work.
    pub const DIRTY: Self = Self(1 << 11);
    /// The capture also freezes the mouse widget.
    pub const HARD_CAPTURE: Self = Self(1 << 12);

    /// No flags.
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether every flag of `other` is set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any flag of `other` is set.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Set the flags of `other`.
    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the flags of `other`.
    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Set or clear the flags of `other`.
    #[inline]
    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

impl BitOr for WidgetFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for WidgetFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for WidgetFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(WidgetFlags, &str); 13] = [
            (WidgetFlags::HIDDEN, "hidden"),
            (WidgetFlags::SELECTED, "selected"),
            (WidgetFlags::DISABLED, "disabled"),
            (WidgetFlags::HAS_FOCUS, "focus"),
            (WidgetFlags::HAS_MOUSE, "mouse"),
            (WidgetFlags::HAS_CAPTURE, "capture"),
            (WidgetFlags::FOCUS_REST, "focusrest"),
            (WidgetFlags::MAGNETIC, "magnetic"),
            (WidgetFlags::EXPANSIVE, "expansive"),
            (WidgetFlags::DECORATIVE, "decorative"),
            (WidgetFlags::INITIALIZED, "initialized"),
            (WidgetFlags::DIRTY, "dirty"),
            (WidgetFlags::HARD_CAPTURE, "hardcapture"),
        ];
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "[{}]", names.join("|"))
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HAlign {
    /// Left edge.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right edge.
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    /// Top edge.
    Top,
    /// Centered.
    #[default]
    Middle,
    /// Bottom edge.
    Bottom,
}

/// Text alignment inside a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Align {
    /// Horizontal alignment.
    pub horizontal: HAlign,
    /// Vertical alignment.
    pub vertical: VAlign,
}

impl Align {
    /// Centered on both axes.
    pub const CENTER: Self = Self {
        horizontal: HAlign::Center,
        vertical: VAlign::Middle,
    };

    /// Left edge, vertically centered.
    pub const LEFT: Self = Self {
        horizontal: HAlign::Left,
        vertical: VAlign::Middle,
    };
}
