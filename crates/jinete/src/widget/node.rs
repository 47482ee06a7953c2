//! Per-widget storage.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use jinete_core::{Borders, Rect, Region, Size};

use super::{Align, Hook, HookId, HookTag, WidgetFlags, WidgetId, WidgetKind};
use crate::manager::WindowState;

pub(crate) type SharedHook = Rc<RefCell<dyn Hook>>;

pub(crate) struct HookEntry {
    pub(crate) id: HookId,
    pub(crate) tag: HookTag,
    pub(crate) hook: SharedHook,
}

/// Data stored for each widget in the arena.
pub struct WidgetNode {
    pub(crate) kind: WidgetKind,
    pub(crate) name: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) rect: Rect,
    pub(crate) min_size: Size,
    pub(crate) borders: Borders,
    pub(crate) align: Align,
    pub(crate) child_spacing: i32,
    pub(crate) flags: WidgetFlags,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) hooks: Vec<HookEntry>,
    /// Area waiting to be repainted, in screen coordinates.
    pub(crate) update_region: Region,
    /// Present on window widgets only.
    pub(crate) window: Option<WindowState>,
    /// Nesting counter of `signal_off`; signals are muted while non-zero.
    pub(crate) signals_muted: u32,
}

impl WidgetNode {
    pub(crate) fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            name: None,
            text: None,
            rect: Rect::EMPTY,
            min_size: Size::ZERO,
            borders: Borders::ZERO,
            align: Align::default(),
            child_spacing: 0,
            flags: WidgetFlags::empty(),
            parent: None,
            children: Vec::new(),
            hooks: Vec::new(),
            update_region: Region::new(),
            window: None,
            signals_muted: 0,
        }
    }

    /// The widget kind.
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// The widget's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The widget's text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Position in screen coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The static minimum size.
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// Border widths.
    pub fn borders(&self) -> Borders {
        self.borders
    }

    /// Text alignment.
    pub fn align(&self) -> Align {
        self.align
    }

    /// Spacing between children in layouts.
    pub fn child_spacing(&self) -> i32 {
        self.child_spacing
    }

    /// Current flags.
    pub fn flags(&self) -> WidgetFlags {
        self.flags
    }

    /// The parent widget.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// The area of the children: the rect shrunk by the borders.
    pub fn child_rect(&self) -> Rect {
        self.rect.shrink(self.borders)
    }

    /// Pending update region.
    pub fn update_region(&self) -> &Region {
        &self.update_region
    }

    /// Number of attached hooks.
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Whether a hook with the given tag is attached.
    pub fn has_hook(&self, tag: HookTag) -> bool {
        self.hooks.iter().any(|h| h.tag == tag)
    }

    /// Whether the widget is a window.
    pub fn is_window(&self) -> bool {
        self.window.is_some()
    }
}

impl fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("rect", &self.rect)
            .field("flags", &self.flags)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
