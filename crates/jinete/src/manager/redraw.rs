//! Dirty-region tracking and repaint.
//!
//! Invalidating a widget adds the visible part of an area to its update
//! region and marks it dirty. [`Ui::flush_redraw`] then walks the tree once
//! and sends one [`MessageKind::Draw`] per rectangle of each dirty widget's
//! update region, with the surface clipped to that rectangle.
//!
//! The visible part of a widget is its rect clipped by every ancestor, minus
//! the windows stacked above its own window. A manager paints only the
//! desktop area not covered by its windows.

use jinete_core::{Rect, RectIn, Region};

use super::Ui;
use crate::logging::targets;
use crate::message::MessageKind;
use crate::widget::{WidgetFlags, WidgetId, WidgetKind};

impl Ui {
    /// Schedule a repaint of the whole widget and its descendants.
    pub fn invalidate(&mut self, widget: WidgetId) {
        if let Some(rect) = self.rect(widget) {
            self.invalidate_rect(widget, rect);
        }
    }

    /// Schedule a repaint of `rect` (screen coordinates) inside a widget.
    pub fn invalidate_rect(&mut self, widget: WidgetId, rect: Rect) {
        self.invalidate_region(widget, &Region::from_rect(rect));
    }

    /// Schedule a repaint of `region` inside a widget and its descendants.
    ///
    /// A broken region stands for the whole widget. Each widget only keeps
    /// the part it can actually paint; children are reached even when the
    /// parent itself is fully covered.
    pub fn invalidate_region(&mut self, widget: WidgetId, region: &Region) {
        if !self.tree.is_visible(widget) {
            return;
        }
        let Some(rect) = self.rect(widget) else {
            return;
        };
        let requested = if region.is_broken() {
            Region::from_rect(rect)
        } else {
            region.intersect_rect(rect)
        };
        if requested.is_empty() {
            return;
        }

        let area = requested.intersect(&self.drawable_region(widget));
        if !area.is_empty()
            && let Some(node) = self.tree.get_mut(widget)
        {
            node.update_region = node.update_region.union(&area);
            node.flags.insert(WidgetFlags::DIRTY);
        }

        for child in self.children(widget) {
            let Some(child_rect) = self.rect(child) else {
                continue;
            };
            if requested.rect_in(&child_rect) != RectIn::Out {
                self.invalidate_region(child, &requested);
            }
        }
    }

    /// The part of the screen where a widget may paint.
    pub fn drawable_region(&self, widget: WidgetId) -> Region {
        let Some(node) = self.tree.get(widget) else {
            return Region::new();
        };
        let mut region = Region::from_rect(node.rect);

        if node.kind == WidgetKind::Manager {
            for &window in node.children() {
                if let Some(window) = self.tree.get(window)
                    && !window.flags.contains(WidgetFlags::HIDDEN)
                {
                    region = region.subtract_rect(window.rect);
                }
            }
        }

        let mut below = widget;
        for ancestor in self.tree.ancestors(widget) {
            let Some(parent) = self.tree.get(ancestor) else {
                break;
            };
            region = region.intersect_rect(parent.rect);
            if parent.kind == WidgetKind::Manager {
                // Earlier windows are stacked on top of later ones.
                for &sibling in parent.children() {
                    if sibling == below {
                        break;
                    }
                    if let Some(above) = self.tree.get(sibling)
                        && !above.flags.contains(WidgetFlags::HIDDEN)
                    {
                        region = region.subtract_rect(above.rect);
                    }
                }
            }
            below = ancestor;
        }

        let screen = self.surface.size();
        region.intersect_rect(Rect::from_origin_size(0, 0, screen.width, screen.height))
    }

    /// Whether any widget has a pending repaint.
    pub fn needs_redraw(&self) -> bool {
        self.tree
            .ids()
            .any(|w| self.flags(w).contains(WidgetFlags::DIRTY))
    }

    /// Paint every dirty widget, clipped to its update region.
    ///
    /// Managers paint first, then their windows from the bottom of the
    /// stack up, each window in pre-order. Returns the number of widgets
    /// painted.
    pub fn flush_redraw(&mut self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut order = Vec::new();
        self.paint_order(root, &mut order);

        let mut painted = 0;
        for widget in order {
            let Some(node) = self.tree.get_mut(widget) else {
                continue;
            };
            if !node.flags.contains(WidgetFlags::DIRTY) {
                continue;
            }
            node.flags.remove(WidgetFlags::DIRTY);
            let region = std::mem::take(&mut node.update_region);
            if region.is_empty() || !self.tree.is_visible(widget) {
                continue;
            }

            let rects = region.rects().to_vec();
            let total = rects.len();
            for (index, rect) in rects.into_iter().enumerate() {
                self.surface.set_clip(Some(rect));
                let mut msg = self.new_message(MessageKind::Draw {
                    rect,
                    count: total - index - 1,
                });
                msg.add_dest(widget);
                self.send_message(widget, &mut msg);
                self.stats.draws += 1;
            }
            painted += 1;
        }
        self.surface.set_clip(None);

        if painted > 0 {
            tracing::trace!(target: targets::REDRAW, painted, "redraw flushed");
        }
        painted
    }

    fn paint_order(&self, widget: WidgetId, order: &mut Vec<WidgetId>) {
        let Some(node) = self.tree.get(widget) else {
            return;
        };
        if node.flags.contains(WidgetFlags::HIDDEN) {
            return;
        }
        order.push(widget);
        if node.kind == WidgetKind::Manager {
            for &child in node.children().iter().rev() {
                self.paint_order(child, order);
            }
        } else {
            for &child in node.children() {
                self.paint_order(child, order);
            }
        }
    }

    /// Scroll the pixels of `area` inside a widget by (`dx`, `dy`).
    ///
    /// The part that stays visible after the move is blitted through the
    /// surface; only the exposed part is invalidated. Pending repaints
    /// inside the area move with the pixels.
    pub fn scroll(&mut self, widget: WidgetId, dx: i32, dy: i32, area: Rect) {
        if dx == 0 && dy == 0 {
            return;
        }
        let visible = self.drawable_region(widget).intersect_rect(area);
        if visible.is_empty() {
            return;
        }
        let valid = visible.translate(dx, dy).intersect(&visible);
        if !valid.is_empty() {
            self.surface.blit_region(&valid.translate(-dx, -dy), dx, dy);
        }

        for w in self.tree.preorder(widget) {
            let Some(node) = self.tree.get_mut(w) else {
                continue;
            };
            if node.update_region.is_empty() || node.update_region.is_broken() {
                continue;
            }
            let inside = node.update_region.intersect(&visible);
            if inside.is_empty() {
                continue;
            }
            let moved = inside.translate(dx, dy).intersect(&visible);
            node.update_region = node.update_region.subtract(&inside).union(&moved);
        }

        let exposed = visible.subtract(&valid);
        tracing::trace!(target: targets::REDRAW, ?widget, dx, dy, exposed = exposed.len(), "scrolled");
        self.invalidate_region(widget, &exposed);
    }
}
