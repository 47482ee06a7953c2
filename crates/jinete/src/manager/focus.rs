//! Keyboard focus, mouse tracking and mouse capture.
//!
//! Focus and the mouse widget are chains, not single widgets: every ancestor
//! of the focused widget that can rest focus carries
//! [`WidgetFlags::HAS_FOCUS`], and every ancestor of the widget under the
//! cursor carries [`WidgetFlags::HAS_MOUSE`]. Changing either sends leave
//! messages to the part of the old chain that is not shared with the new one,
//! then enter messages to the new part.

use jinete_core::{Point, Result, UiError};

use super::Ui;
use crate::input::KeyCode;
use crate::logging::targets;
use crate::message::MessageKind;
use crate::widget::{WidgetFlags, WidgetId};

/// Direction scoring for arrow-key focus movement.
///
/// `from` is the center of the focused widget, `to` the center of a
/// candidate. Candidates behind `from` score `None`.
fn direction_score(key: KeyCode, from: Point, to: Point) -> Option<i64> {
    let (along, across) = match key {
        KeyCode::Left => (from.x - to.x, to.y - from.y),
        KeyCode::Right => (to.x - from.x, to.y - from.y),
        KeyCode::Up => (from.y - to.y, to.x - from.x),
        KeyCode::Down => (to.y - from.y, to.x - from.x),
        _ => return None,
    };
    if along <= 0 {
        return None;
    }
    Some(i64::from(along) + i64::from(across).abs() * 8)
}

impl Ui {
    /// The focused widget.
    pub fn focus(&self) -> Option<WidgetId> {
        self.focus
    }

    /// The widget under the cursor.
    pub fn mouse_widget(&self) -> Option<WidgetId> {
        self.mouse
    }

    /// The widget holding the mouse capture.
    pub fn capture(&self) -> Option<WidgetId> {
        self.capture
    }

    /// Whether the widget can take keyboard focus right now.
    pub fn accepts_focus(&self, widget: WidgetId) -> bool {
        let flags = self.flags(widget);
        flags.contains(WidgetFlags::FOCUS_REST)
            && !flags.contains(WidgetFlags::DECORATIVE)
            && self.tree.is_visible(widget)
            && self.tree.is_enabled(widget)
    }

    fn descendants_accept_focus(&self, widget: WidgetId) -> bool {
        self.tree
            .preorder(widget)
            .into_iter()
            .skip(1)
            .any(|w| self.accepts_focus(w))
    }

    /// Move keyboard focus to `widget` (or clear it with `None`).
    ///
    /// Hidden or disabled widgets, and widgets without a focus-rest ancestor,
    /// are refused.
    pub fn set_focus(&mut self, widget: Option<WidgetId>) {
        let widget = widget.filter(|&w| self.tree.contains(w));
        if self.focus == widget {
            return;
        }
        if let Some(w) = widget {
            let can_rest = self
                .tree
                .chain(w)
                .into_iter()
                .any(|c| self.flags(c).contains(WidgetFlags::FOCUS_REST));
            if !can_rest || !self.tree.is_visible(w) || !self.tree.is_enabled(w) {
                return;
            }
        }

        let new_chain = widget.map(|w| self.tree.chain(w)).unwrap_or_default();
        let common = self.leave_chain(
            self.focus,
            &new_chain,
            WidgetFlags::HAS_FOCUS,
            MessageKind::FocusLeave,
        );
        self.focus = widget;
        self.enter_chain(
            &new_chain,
            common,
            WidgetFlags::HAS_FOCUS,
            true,
            MessageKind::FocusEnter,
        );
        tracing::debug!(target: targets::MANAGER, focus = ?widget, "focus changed");
    }

    /// Make `widget` the widget under the cursor.
    ///
    /// Ignored while a hard capture is active.
    pub fn set_mouse(&mut self, widget: Option<WidgetId>) {
        let widget = widget.filter(|&w| self.tree.contains(w));
        if self.mouse == widget {
            return;
        }
        if self
            .capture
            .is_some_and(|c| self.flags(c).contains(WidgetFlags::HARD_CAPTURE))
        {
            return;
        }
        let new_chain = widget.map(|w| self.tree.chain(w)).unwrap_or_default();
        let common = self.leave_chain(
            self.mouse,
            &new_chain,
            WidgetFlags::HAS_MOUSE,
            MessageKind::MouseLeave,
        );
        self.mouse = widget;
        self.enter_chain(
            &new_chain,
            common,
            WidgetFlags::HAS_MOUSE,
            false,
            MessageKind::MouseEnter,
        );
        tracing::trace!(target: targets::MANAGER, mouse = ?widget, "mouse widget changed");
    }

    /// Clear `flag` on the old chain up to the first widget shared with
    /// `new_chain`, enqueueing `leave` for those widgets. Returns the shared
    /// ancestor.
    fn leave_chain(
        &mut self,
        old: Option<WidgetId>,
        new_chain: &[WidgetId],
        flag: WidgetFlags,
        leave: MessageKind,
    ) -> Option<WidgetId> {
        let old_chain = old.map(|w| self.tree.chain(w)).unwrap_or_default();
        let mut msg = self.new_message(leave);
        let mut common = None;
        for w in old_chain {
            if new_chain.contains(&w) {
                common = Some(w);
                break;
            }
            if let Some(node) = self.tree.get_mut(w)
                && node.flags.contains(flag)
            {
                node.flags.remove(flag);
                msg.add_dest(w);
            }
        }
        if !msg.dests().is_empty() {
            self.enqueue_message(msg);
        }
        common
    }

    /// Set `flag` on `new_chain` below `common`, root side first, enqueueing
    /// `enter` for those widgets.
    fn enter_chain(
        &mut self,
        new_chain: &[WidgetId],
        common: Option<WidgetId>,
        flag: WidgetFlags,
        focus_rest_only: bool,
        enter: MessageKind,
    ) {
        let mut msg = self.new_message(enter);
        let below_common = new_chain
            .iter()
            .take_while(|&&w| Some(w) != common)
            .copied()
            .collect::<Vec<_>>();
        for &w in below_common.iter().rev() {
            let Some(node) = self.tree.get_mut(w) else {
                continue;
            };
            if focus_rest_only && !node.flags.contains(WidgetFlags::FOCUS_REST) {
                continue;
            }
            node.flags.insert(flag);
            msg.add_dest(w);
        }
        if !msg.dests().is_empty() {
            self.enqueue_message(msg);
        }
    }

    /// Route every mouse message to `widget` until
    /// [`release_mouse`](Self::release_mouse).
    pub fn capture_mouse(&mut self, widget: WidgetId) -> Result<()> {
        if !self.tree.contains(widget) {
            return Err(UiError::InvalidWidget);
        }
        self.release_mouse();
        if let Some(node) = self.tree.get_mut(widget) {
            node.flags.insert(WidgetFlags::HAS_CAPTURE);
        }
        self.capture = Some(widget);
        tracing::debug!(target: targets::MANAGER, ?widget, "mouse captured");
        Ok(())
    }

    /// Like [`capture_mouse`](Self::capture_mouse), and also freeze the mouse
    /// widget: no enter/leave messages until the capture is released.
    pub fn hard_capture_mouse(&mut self, widget: WidgetId) -> Result<()> {
        self.capture_mouse(widget)?;
        if let Some(node) = self.tree.get_mut(widget) {
            node.flags.insert(WidgetFlags::HARD_CAPTURE);
        }
        Ok(())
    }

    /// Release the mouse capture, if any.
    pub fn release_mouse(&mut self) {
        let Some(widget) = self.capture.take() else {
            return;
        };
        if let Some(node) = self.tree.get_mut(widget) {
            node.flags.remove(WidgetFlags::HAS_CAPTURE | WidgetFlags::HARD_CAPTURE);
        }
        tracing::debug!(target: targets::MANAGER, ?widget, "mouse released");
    }

    /// Drop focus, mouse and capture held by `widget` or its descendants.
    pub(crate) fn release_widget(&mut self, widget: WidgetId) {
        if self.capture.is_some_and(|c| self.tree.is_ancestor_of(widget, c)) {
            self.release_mouse();
        }
        if self.focus.is_some_and(|f| self.tree.is_ancestor_of(widget, f)) {
            self.set_focus(None);
        }
        if self.mouse.is_some_and(|m| self.tree.is_ancestor_of(widget, m)) {
            self.set_mouse(None);
        }
    }

    /// Focus the first magnetic widget in the subtree of `widget`.
    pub fn attract_focus(&mut self, widget: WidgetId) -> bool {
        let magnet = self.tree.preorder(widget).into_iter().find(|&w| {
            self.flags(w).contains(WidgetFlags::MAGNETIC) && self.accepts_focus(w)
        });
        match magnet {
            Some(w) => {
                self.set_focus(Some(w));
                true
            }
            None => false,
        }
    }

    /// Focus the first focus-accepting leaf in the subtree of `widget`.
    pub fn focus_first_child(&mut self, widget: WidgetId) -> bool {
        match self.focus_candidates(widget).first() {
            Some(&w) => {
                self.set_focus(Some(w));
                true
            }
            None => false,
        }
    }

    /// Focus-accepting widgets without focus-accepting descendants, in
    /// pre-order.
    fn focus_candidates(&self, root: WidgetId) -> Vec<WidgetId> {
        self.tree
            .preorder(root)
            .into_iter()
            .filter(|&w| self.accepts_focus(w) && !self.descendants_accept_focus(w))
            .collect()
    }

    /// Move focus inside the active window.
    ///
    /// Tab goes to the next candidate (Shift+Tab to the previous one), arrows
    /// to the nearest candidate in that direction. Returns whether the key
    /// was a focus key and focus moved.
    pub fn move_focus(&mut self, key: KeyCode, backwards: bool) -> bool {
        let window = match self.focus {
            Some(focus) => self.tree.window_of(focus),
            None => self.proc_windows.first().copied(),
        };
        let Some(window) = window else {
            return false;
        };
        let candidates = self.focus_candidates(window);
        if candidates.is_empty() {
            return false;
        }

        // Rotate so the focused widget comes first.
        let start = self
            .focus
            .and_then(|f| candidates.iter().position(|&w| w == f))
            .unwrap_or(0);
        let mut ordered = candidates[start..].to_vec();
        ordered.extend_from_slice(&candidates[..start]);
        let has_focus = self.focus.is_some_and(|f| ordered[0] == f);

        let target = match key {
            KeyCode::Tab if !has_focus => Some(ordered[0]),
            KeyCode::Tab if backwards => ordered.last().copied(),
            KeyCode::Tab => ordered.get(1).copied(),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                let Some(from) = self.focus.and_then(|f| self.rect(f)).map(|r| r.center())
                else {
                    return false;
                };
                ordered
                    .iter()
                    .skip(1)
                    .filter_map(|&w| {
                        let to = self.rect(w)?.center();
                        direction_score(key, from, to).map(|score| (score, w))
                    })
                    .min_by_key(|&(score, _)| score)
                    .map(|(_, w)| w)
            }
            _ => None,
        };

        match target {
            Some(w) if Some(w) != self.focus => {
                self.set_focus(Some(w));
                true
            }
            _ => false,
        }
    }
}
