//! Hook dispatch, the message queue, and widget destruction.

use std::rc::Rc;

use jinete_core::{Rect, Result, Size, UiError};

use super::Ui;
use crate::logging::{span_names, targets};
use crate::message::{Message, MessageKind, MessageType};
use crate::widget::node::SharedHook;
use crate::widget::{WidgetFlags, WidgetId};

impl Ui {
    // =========================================================================
    // Synchronous delivery
    // =========================================================================

    /// Deliver `msg` to the hooks of one widget, now.
    ///
    /// Hooks run in registration order. Size requests and position
    /// assignments stop at the first hook that handles them; every other
    /// message reaches all hooks. When no hook handled the message the
    /// built-in behavior runs. Returns whether the message was handled.
    ///
    /// A hook error is logged and counted; the remaining hooks still run.
    /// Unknown widgets are ignored.
    pub fn send_message(&mut self, widget: WidgetId, msg: &mut Message) -> bool {
        let Some(node) = self.tree.get(widget) else {
            self.stats.stale_destinations += 1;
            tracing::trace!(target: targets::DISPATCH, ?widget, "stale destination dropped");
            return false;
        };
        let kind = node.kind;
        let hooks: Vec<SharedHook> = node
            .hooks
            .iter()
            .filter(|entry| entry.tag.matches(kind))
            .map(|entry| Rc::clone(&entry.hook))
            .collect();

        let msg_type = msg.message_type();
        let first_responder_wins = matches!(msg_type, MessageType::ReqSize | MessageType::SetPos);

        self.busy.push(widget);
        let mut handled = false;
        for hook in hooks {
            let Ok(mut hook) = hook.try_borrow_mut() else {
                tracing::trace!(target: targets::DISPATCH, ?widget, ?msg_type, "hook busy, skipped");
                continue;
            };
            self.stats.hook_calls += 1;
            match hook.on_message(self, widget, msg) {
                Ok(true) => {
                    handled = true;
                    if first_responder_wins {
                        break;
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    self.stats.hook_failures += 1;
                    tracing::warn!(
                        target: targets::DISPATCH,
                        ?widget,
                        ?msg_type,
                        error = %err,
                        "hook failed"
                    );
                }
            }
        }
        if !handled && self.tree.contains(widget) {
            handled = self.default_message_proc(widget, msg);
        }
        self.busy.pop();

        if !self.deferred_free.is_empty() {
            self.flush_deferred_frees();
        }
        handled
    }

    /// Built-in behavior of every widget.
    fn default_message_proc(&mut self, widget: WidgetId, msg: &mut Message) -> bool {
        match msg.kind_mut() {
            MessageKind::ReqSize { width, height } => {
                let font = self.font();
                let Some(node) = self.tree.get(widget) else {
                    return false;
                };
                let text = node.text.as_deref().map(|t| font.text_size(t)).unwrap_or_default();
                *width = text.width + node.borders.horizontal();
                *height = text.height + node.borders.vertical();
                true
            }
            MessageKind::SetPos { rect } => {
                let rect = *rect;
                self.store_rect(widget, rect);
                if let Some(child_rect) = self.tree.get(widget).map(|n| n.child_rect()) {
                    for child in self.children(widget) {
                        self.set_rect(child, child_rect);
                    }
                }
                true
            }
            MessageKind::DrawRegion { region } => {
                let region = region.clone();
                self.invalidate_region(widget, &region);
                true
            }
            MessageKind::DeferredFree { widget: target } => {
                let target = *target;
                if let Err(err) = self.free(target) {
                    tracing::trace!(target: targets::WIDGET, ?target, error = %err, "deferred free skipped");
                }
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Layout entry points
    // =========================================================================

    /// Ask a widget for its natural size.
    ///
    /// The answer is never smaller than the widget's static minimum size
    /// and never negative.
    pub fn request_size(&mut self, widget: WidgetId) -> Size {
        let Some(min_size) = self.tree.get(widget).map(|n| n.min_size) else {
            return Size::ZERO;
        };
        let mut msg = self.new_message(MessageKind::ReqSize {
            width: 0,
            height: 0,
        });
        msg.add_dest(widget);
        self.send_message(widget, &mut msg);
        let size = match msg.kind() {
            MessageKind::ReqSize { width, height } => Size::new(*width, *height),
            _ => Size::ZERO,
        };
        let size = size.max(min_size).clamped();
        tracing::trace!(target: targets::LAYOUT, ?widget, ?size, "size requested");
        size
    }

    /// Assign a widget its final rect (a set-position message).
    pub fn set_rect(&mut self, widget: WidgetId, rect: Rect) {
        if !self.tree.contains(widget) {
            return;
        }
        tracing::trace!(target: targets::LAYOUT, ?widget, ?rect, "set position");
        let mut msg = self.new_message(MessageKind::SetPos { rect });
        msg.add_dest(widget);
        self.send_message(widget, &mut msg);
    }

    /// Store a widget's rect without notifying it.
    ///
    /// Hooks answering set-position call this for their own widget before
    /// placing the children.
    pub fn store_rect(&mut self, widget: WidgetId, rect: Rect) {
        if let Some(node) = self.tree.get_mut(widget) {
            node.rect = rect;
        }
    }

    // =========================================================================
    // Queue
    // =========================================================================

    /// Append a message to the queue.
    ///
    /// Widgets registered as filters for the message type are put in front
    /// of the destinations.
    pub fn enqueue_message(&mut self, mut msg: Message) {
        if let Some(filters) = self.filters.get(&msg.message_type()) {
            for &filter in filters.iter().rev() {
                msg.prepend_dest(filter);
            }
        }
        tracing::trace!(target: targets::DISPATCH, ?msg, "message enqueued");
        self.queue.push_back(msg);
    }

    /// Receive every enqueued message of `msg_type` before its destinations.
    pub fn add_msg_filter(&mut self, msg_type: MessageType, widget: WidgetId) -> Result<()> {
        if !self.tree.contains(widget) {
            return Err(UiError::InvalidWidget);
        }
        let filters = self.filters.entry(msg_type).or_default();
        if !filters.contains(&widget) {
            filters.push(widget);
        }
        Ok(())
    }

    /// Undo [`add_msg_filter`](Self::add_msg_filter).
    pub fn remove_msg_filter(&mut self, msg_type: MessageType, widget: WidgetId) {
        if let Some(filters) = self.filters.get_mut(&msg_type) {
            filters.retain(|&w| w != widget);
        }
    }

    /// Deliver every queued message, oldest first, including messages
    /// enqueued while draining.
    pub fn dispatch_messages(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        let _span = tracing::trace_span!(span_names::DISPATCH).entered();
        if let Some(root) = self.root {
            let mut msg = self.new_message(MessageKind::QueueProcessing);
            msg.add_dest(root);
            self.send_message(root, &mut msg);
        }
        while let Some(mut msg) = self.queue.pop_front() {
            self.deliver(&mut msg);
        }
    }

    /// Deliver one queued message, then its sub-message if nobody consumed it.
    fn deliver(&mut self, msg: &mut Message) {
        msg.set_used();
        self.stats.messages_dispatched += 1;
        if self.deliver_to_dests(msg) {
            return;
        }
        if let Some(sub) = msg.sub_msg_mut() {
            self.deliver(sub);
        }
    }

    fn deliver_to_dests(&mut self, msg: &mut Message) -> bool {
        let stop_at_first = msg.message_type().stops_at_first_consumer();
        let dests = msg.dests().to_vec();
        let mut consumed = false;
        for dest in dests {
            if !self.tree.contains(dest) {
                self.stats.stale_destinations += 1;
                tracing::trace!(target: targets::DISPATCH, ?dest, "stale destination dropped");
                continue;
            }
            if self.send_message(dest, msg) {
                consumed = true;
                if stop_at_first {
                    break;
                }
            }
        }
        consumed
    }

    /// Drop `widget` from every queued message, and messages left without
    /// destinations.
    pub(crate) fn remove_messages_for(&mut self, widget: WidgetId) {
        for msg in self.queue.iter_mut() {
            msg.remove_dest(widget);
        }
        self.queue.retain(|m| m.is_addressed());
    }

    // =========================================================================
    // Destruction
    // =========================================================================

    /// Destroy a widget and its whole subtree.
    ///
    /// Children receive [`MessageKind::Destroy`] before their parent. Their
    /// timers, queued messages, filters and focus/mouse/capture are released.
    /// If the subtree is running a hook, destruction waits until the current
    /// message is done.
    pub fn free(&mut self, widget: WidgetId) -> Result<()> {
        if !self.tree.contains(widget) {
            return Err(UiError::InvalidWidget);
        }
        if self.is_subtree_busy(widget) {
            if !self.deferred_free.contains(&widget) {
                self.deferred_free.push(widget);
            }
            tracing::trace!(target: targets::WIDGET, ?widget, "free deferred");
            return Ok(());
        }
        self.destroy_subtree(widget);
        Ok(())
    }

    /// Queue a [`MessageKind::DeferredFree`] for `widget`, addressed to the
    /// root manager.
    pub fn free_later(&mut self, widget: WidgetId) -> Result<()> {
        let root = self.root.ok_or(UiError::InvalidWidget)?;
        if !self.tree.contains(widget) {
            return Err(UiError::InvalidWidget);
        }
        let mut msg = self.new_message(MessageKind::DeferredFree { widget });
        msg.add_dest(root);
        self.enqueue_message(msg);
        Ok(())
    }

    /// Destroy every deferred widget whose subtree is no longer running a
    /// hook. The others keep waiting, even inside a nested modal loop.
    pub(crate) fn flush_deferred_frees(&mut self) {
        let pending = std::mem::take(&mut self.deferred_free);
        let (blocked, ready): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .filter(|&widget| self.tree.contains(widget))
            .partition(|&widget| self.is_subtree_busy(widget));
        self.deferred_free.extend(blocked);
        for widget in ready {
            if self.tree.contains(widget) {
                tracing::trace!(target: targets::WIDGET, ?widget, "deferred free flushed");
                self.destroy_subtree(widget);
            }
        }
    }

    fn is_subtree_busy(&self, widget: WidgetId) -> bool {
        self.busy.iter().any(|&b| self.tree.is_ancestor_of(widget, b))
    }

    fn destroy_subtree(&mut self, widget: WidgetId) {
        if self.is_window_open(widget) {
            self.close_window_internal(widget, None);
        }
        for child in self.children(widget) {
            self.destroy_subtree(child);
        }
        if !self.tree.contains(widget) {
            return;
        }

        let mut msg = self.new_message(MessageKind::Destroy);
        msg.add_dest(widget);
        self.send_message(widget, &mut msg);

        self.release_widget(widget);
        self.remove_messages_for(widget);
        let timers = self.timers.remove_owned_by(widget);
        for list in self.filters.values_mut() {
            list.retain(|&w| w != widget);
        }
        self.new_windows.retain(|&w| w != widget);
        self.proc_windows.retain(|&w| w != widget);
        if self.root == Some(widget) {
            self.root = None;
        }
        if let Some(parent) = self.tree.parent(widget)
            && let Some(area) = self.rect(widget)
            && !self.flags(widget).contains(WidgetFlags::HIDDEN)
        {
            self.invalidate_rect(parent, area);
        }
        self.tree.remove(widget);
        tracing::trace!(target: targets::WIDGET, ?widget, timers = timers.len(), "widget destroyed");
    }
}
