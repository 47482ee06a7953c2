//! Box layout: children in a row or a column.

use jinete_core::{Borders, Rect, Result, Size};

use crate::Ui;
use crate::logging::targets;
use crate::message::{Message, MessageKind};
use crate::widget::{Hook, HookResult, HookTag, WidgetFlags, WidgetId, WidgetKind};

/// Layout orientation for box layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Items are arranged left to right.
    #[default]
    Horizontal,
    /// Items are arranged top to bottom.
    Vertical,
}

impl Orientation {
    /// Get the cross (perpendicular) orientation.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    #[inline]
    pub(super) fn main(self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    #[inline]
    fn cross_of(self, size: Size) -> i32 {
        self.cross().main(size)
    }

    #[inline]
    fn make_size(self, main: i32, cross: i32) -> Size {
        match self {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }
}

/// A child as seen by the box arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxItem {
    /// The child's requested size.
    pub size: Size,
    /// Whether the child takes a share of the leftover space.
    pub expansive: bool,
}

pub(super) fn total_spacing(spacing: i32, count: usize) -> i32 {
    let gaps = i32::try_from(count.saturating_sub(1)).unwrap_or(i32::MAX);
    spacing.saturating_mul(gaps)
}

/// Natural size of a box holding children of the given requested sizes.
///
/// Along the main axis the children are summed (or, when homogeneous, the
/// largest one is repeated) plus the spacing between them; across it the
/// largest child wins. Borders are added on both axes.
pub fn box_request(
    orientation: Orientation,
    homogeneous: bool,
    spacing: i32,
    borders: Borders,
    sizes: &[Size],
) -> Size {
    let count = i32::try_from(sizes.len()).unwrap_or(i32::MAX);
    let main = if homogeneous {
        sizes.iter().map(|&s| orientation.main(s)).max().unwrap_or(0) * count
    } else {
        sizes.iter().map(|&s| orientation.main(s)).sum()
    };
    let main = main + total_spacing(spacing, sizes.len());
    let cross = sizes
        .iter()
        .map(|&s| orientation.cross_of(s))
        .max()
        .unwrap_or(0);
    let content = orientation.make_size(main, cross);
    Size::new(
        content.width + borders.horizontal(),
        content.height + borders.vertical(),
    )
    .clamped()
}

/// Child rects of a box whose content area is `inner`.
///
/// Non-expansive children keep their requested length. Positive slack is
/// split evenly among the expansive children, the last one taking the
/// division remainder, so the children always tile the box exactly. With no
/// expansive child, or when the box is too small, children keep their
/// requested lengths. Homogeneous boxes give every child the same length,
/// the last one taking the remainder. Children fill the cross axis.
pub fn box_arrange(
    orientation: Orientation,
    homogeneous: bool,
    spacing: i32,
    inner: Rect,
    items: &[BoxItem],
) -> Vec<Rect> {
    if items.is_empty() {
        return Vec::new();
    }
    let count = i32::try_from(items.len()).unwrap_or(i32::MAX);
    let available = orientation.main(inner.size()) - total_spacing(spacing, items.len());

    let lengths: Vec<i32> = if homogeneous {
        let share = (available / count).max(0);
        let last = (available - share * (count - 1)).max(0);
        (0..items.len())
            .map(|i| if i + 1 == items.len() { last } else { share })
            .collect()
    } else {
        let requested: i32 = items.iter().map(|item| orientation.main(item.size)).sum();
        let slack = available - requested;
        let expansive = items.iter().filter(|item| item.expansive).count();
        let last_expansive = items.iter().rposition(|item| item.expansive);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let length = orientation.main(item.size);
                if slack <= 0 || !item.expansive {
                    return length;
                }
                let expansive = i32::try_from(expansive).unwrap_or(i32::MAX);
                let mut extra = slack / expansive;
                if Some(i) == last_expansive {
                    extra += slack % expansive;
                }
                length + extra
            })
            .map(|length| length.max(0))
            .collect()
    };

    let cross = orientation.cross_of(inner.size()).max(0);
    let mut cursor = match orientation {
        Orientation::Horizontal => inner.x1,
        Orientation::Vertical => inner.y1,
    };
    lengths
        .into_iter()
        .map(|length| {
            let rect = match orientation {
                Orientation::Horizontal => Rect::from_origin_size(cursor, inner.y1, length, cross),
                Orientation::Vertical => Rect::from_origin_size(inner.x1, cursor, cross, length),
            };
            cursor += length + spacing;
            rect
        })
        .collect()
}

/// Built-in behavior of box widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxHook {
    /// Direction of the children.
    pub orientation: Orientation,
    /// Give every child the same length.
    pub homogeneous: bool,
}

impl BoxHook {
    /// A non-homogeneous box.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            homogeneous: false,
        }
    }

    fn visible_children(ui: &Ui, widget: WidgetId) -> Vec<WidgetId> {
        ui.children(widget)
            .into_iter()
            .filter(|&child| !ui.flags(child).contains(WidgetFlags::HIDDEN))
            .collect()
    }
}

impl Hook for BoxHook {
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult {
        match msg.kind_mut() {
            MessageKind::ReqSize { width, height } => {
                let node = ui.node(widget)?;
                let (borders, spacing) = (node.borders(), node.child_spacing());
                let sizes: Vec<Size> = Self::visible_children(ui, widget)
                    .into_iter()
                    .map(|child| ui.request_size(child))
                    .collect();
                let size = box_request(self.orientation, self.homogeneous, spacing, borders, &sizes);
                *width = size.width;
                *height = size.height;
                Ok(true)
            }
            MessageKind::SetPos { rect } => {
                let rect = *rect;
                ui.store_rect(widget, rect);
                let node = ui.node(widget)?;
                let (inner, spacing) = (node.child_rect(), node.child_spacing());
                let children = Self::visible_children(ui, widget);
                let items: Vec<BoxItem> = children
                    .iter()
                    .map(|&child| BoxItem {
                        size: ui.request_size(child),
                        expansive: ui.flags(child).contains(WidgetFlags::EXPANSIVE),
                    })
                    .collect();
                let rects = box_arrange(self.orientation, self.homogeneous, spacing, inner, &items);
                tracing::trace!(target: targets::LAYOUT, ?widget, ?rect, children = rects.len(), "box arranged");
                for (child, child_rect) in children.into_iter().zip(rects) {
                    ui.set_rect(child, child_rect);
                }
                Ok(true)
            }
            MessageKind::Draw { rect, .. } => {
                let rect = *rect;
                let color = ui.theme().face;
                ui.surface().fill_rect(rect, color);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Ui {
    /// Create a box container.
    pub fn new_box(&mut self, orientation: Orientation) -> Result<WidgetId> {
        let widget = self.new_widget(WidgetKind::Box)?;
        self.add_hook(widget, HookTag::Kind(WidgetKind::Box), BoxHook::new(orientation))?;
        Ok(widget)
    }

    /// Create a vertical box.
    pub fn new_vbox(&mut self) -> Result<WidgetId> {
        self.new_box(Orientation::Vertical)
    }

    /// Create a horizontal box.
    pub fn new_hbox(&mut self) -> Result<WidgetId> {
        self.new_box(Orientation::Horizontal)
    }

    /// Switch a box between homogeneous and natural child lengths.
    ///
    /// Returns `false` if the widget has no box behavior.
    pub fn set_homogeneous(&mut self, widget: WidgetId, homogeneous: bool) -> bool {
        self.with_hook::<BoxHook, _>(widget, |hook| hook.homogeneous = homogeneous)
            .is_some()
    }
}
