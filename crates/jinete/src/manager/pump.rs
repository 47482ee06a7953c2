//! Input polling and the manager loop.

use jinete_core::{Result, UiError};

use super::{MouseState, Ui};
use crate::input::{InputFrame, KeyEvent, MouseButtons};
use crate::logging::{span_names, targets};
use crate::message::{KeyMessage, Message, MessageKind, MouseMessage};
use crate::widget::{WidgetId, WidgetKind};

/// Double-click detector.
///
/// A press moves to `Down`, a release of the same buttons within the
/// timeout to `Up`, and a press of the same buttons within the timeout from
/// `Up` is a double click. Any other button, a timeout or a mouse motion
/// starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoubleClickState {
    #[default]
    None,
    Down { buttons: MouseButtons, tick: u64 },
    Up { buttons: MouseButtons, tick: u64 },
}

impl DoubleClickState {
    /// Feed a button press. Returns whether it completes a double click.
    pub fn press(&mut self, buttons: MouseButtons, now: u64, timeout: u64) -> bool {
        if let Self::Up { buttons: held, tick } = *self
            && held == buttons
            && now.saturating_sub(tick) <= timeout
        {
            *self = Self::None;
            return true;
        }
        *self = Self::Down { buttons, tick: now };
        false
    }

    /// Feed a button release.
    pub fn release(&mut self, buttons: MouseButtons, now: u64, timeout: u64) {
        *self = match *self {
            Self::Down { buttons: held, tick }
                if held == buttons && now.saturating_sub(tick) <= timeout =>
            {
                Self::Up { buttons, tick: now }
            }
            Self::Up { buttons: held, tick }
                if held == buttons && now.saturating_sub(tick) <= timeout =>
            {
                Self::Up { buttons, tick }
            }
            _ => Self::None,
        };
    }

    /// Start over.
    pub fn reset(&mut self) {
        *self = Self::None;
    }
}

impl Ui {
    /// Run one iteration of the manager loop.
    ///
    /// Polls input, shows new windows, fires timers, delivers the queue and
    /// repaints. Returns `false` when nothing happened, so callers can sleep.
    pub fn pump(&mut self) -> bool {
        let _span = tracing::trace_span!(span_names::PUMP).entered();
        let pending = !self.queue.is_empty();
        let activity = self.generate_messages();
        self.dispatch_messages();
        let painted = self.flush_redraw();
        pending || activity || painted > 0
    }

    /// Pump until [`quit`](Self::quit) is called, the root manager is freed,
    /// or no window is left open.
    pub fn run(&mut self) -> Result<()> {
        if self.root.is_none() {
            return Err(UiError::InvalidWidget);
        }
        tracing::debug!(target: targets::MANAGER, "manager loop started");
        while !self.quit {
            let busy = self.pump();
            let Some(root) = self.root else {
                break;
            };
            if self.tree.children(root).is_empty() && self.new_windows.is_empty() {
                break;
            }
            if !busy {
                self.idle_wait();
            }
        }
        tracing::debug!(target: targets::MANAGER, "manager loop finished");
        Ok(())
    }

    pub(crate) fn idle_wait(&self) {
        let sleep = self.config.idle_sleep();
        if !sleep.is_zero() {
            std::thread::sleep(sleep);
        }
    }

    /// Turn input and timers into queued messages. Returns whether any input
    /// arrived or any timer fired.
    fn generate_messages(&mut self) -> bool {
        let frame = self.input.poll();
        let now = self.clock.ticks();

        if self.first_pump {
            self.first_pump = false;
            if let Some(root) = self.root {
                self.invalidate(root);
            }
        }

        let shown = self.show_new_windows();
        self.update_proc_windows();

        self.modifiers = frame.modifiers;
        let mouse = self.generate_mouse_messages(&frame, now);
        let keys = self.generate_key_messages(&frame.keys);
        let timers = self.generate_timer_messages(now);

        let input = mouse || keys;
        if !input && self.config.idle_messages() {
            self.generate_idle_message();
        }
        shown || input || timers
    }

    fn show_new_windows(&mut self) -> bool {
        if self.new_windows.is_empty() {
            return false;
        }
        for window in std::mem::take(&mut self.new_windows) {
            if !self.is_window_open(window) {
                continue;
            }
            if let Err(err) = self.show(window) {
                tracing::warn!(target: targets::MANAGER, ?window, error = %err, "cannot show window");
                continue;
            }
            self.invalidate(window);
            let take_focus = self.window_state(window).is_some_and(|s| s.take_focus);
            if take_focus && !self.attract_focus(window) {
                self.focus_first_child(window);
            }
            tracing::trace!(target: targets::MANAGER, ?window, "window shown");
        }
        true
    }

    fn mouse_payload(&self, buttons: MouseButtons, wheel: i32) -> MouseMessage {
        MouseMessage {
            x: self.mouse_state.pos.x,
            y: self.mouse_state.pos.y,
            buttons,
            wheel,
        }
    }

    /// Address a mouse message: only the capture if any, otherwise the
    /// widget under the cursor and its parents.
    fn route_mouse_message(&mut self, kind: MessageKind) -> bool {
        let mut msg = self.new_message(kind);
        if let Some(capture) = self.capture {
            msg.add_dest(capture);
        } else if let Some(mouse) = self.mouse {
            msg.broadcast_to_parents(&self.tree, mouse);
        }
        if msg.dests().is_empty() {
            return false;
        }
        self.enqueue_message(msg);
        true
    }

    fn generate_mouse_messages(&mut self, frame: &InputFrame, now: u64) -> bool {
        let old = self.mouse_state;
        self.mouse_state = MouseState {
            pos: frame.mouse,
            buttons: frame.buttons,
            wheel: frame.wheel,
        };
        let moved = frame.mouse != old.pos;
        let mut activity = false;

        if moved || self.mouse.is_none() {
            let picked = self
                .proc_windows
                .iter()
                .find_map(|&window| self.tree.pick(window, frame.mouse));
            if picked != self.mouse {
                self.set_mouse(picked);
            }
        }
        if moved {
            self.double_click.reset();
            let payload = self.mouse_payload(frame.buttons, 0);
            self.route_mouse_message(MessageKind::Motion(payload));
            activity = true;
        }

        if frame.wheel != old.wheel {
            let payload = self.mouse_payload(frame.buttons, frame.wheel - old.wheel);
            self.route_mouse_message(MessageKind::Wheel(payload));
            activity = true;
        }

        let released = MouseButtons::from_bits(old.buttons.bits() & !frame.buttons.bits());
        let pressed = MouseButtons::from_bits(frame.buttons.bits() & !old.buttons.bits());
        let timeout = self.config.double_click_ticks();

        if !released.is_empty() {
            self.double_click.release(released, now, timeout);
            let payload = self.mouse_payload(released, 0);
            self.route_mouse_message(MessageKind::ButtonReleased(payload));
            activity = true;
        }
        if !pressed.is_empty() {
            let double = self.double_click.press(pressed, now, timeout);
            let payload = self.mouse_payload(pressed, 0);
            if double {
                self.route_mouse_message(MessageKind::DoubleClick(payload));
            } else {
                if self.capture.is_none()
                    && let Some(mouse) = self.mouse
                {
                    self.click_activate(mouse);
                }
                self.route_mouse_message(MessageKind::ButtonPressed(payload));
            }
            activity = true;
        }
        activity
    }

    /// Raise the clicked window and focus the clicked widget.
    fn click_activate(&mut self, widget: WidgetId) {
        if let Some(window) = self.tree.window_of(widget)
            && let Err(err) = self.raise_window(window)
        {
            tracing::trace!(target: targets::MANAGER, ?window, error = %err, "raise skipped");
        }
        self.set_focus(Some(widget));
    }

    fn generate_key_messages(&mut self, keys: &[KeyEvent]) -> bool {
        for event in keys {
            if event.pressed {
                let repeat = match self.keys_down.get_mut(&event.key) {
                    Some(count) => {
                        *count += 1;
                        *count
                    }
                    None => {
                        self.keys_down.insert(event.key, 0);
                        0
                    }
                };
                let key = KeyMessage {
                    key: event.key,
                    ch: event.ch,
                    repeat,
                };
                let mut msg = self.new_message(MessageKind::Char(key));
                self.add_key_dests(&mut msg);
                // The key-pressed form is only delivered if nobody takes the
                // character, and only for the first press.
                if repeat == 0 {
                    let mut sub = self.new_message(MessageKind::KeyPressed(key));
                    for &dest in msg.dests() {
                        sub.add_dest(dest);
                    }
                    msg.set_sub_msg(sub);
                }
                self.enqueue_message(msg);
            } else {
                self.keys_down.remove(&event.key);
                let key = KeyMessage {
                    key: event.key,
                    ch: event.ch,
                    repeat: 0,
                };
                let mut msg = self.new_message(MessageKind::KeyReleased(key));
                self.add_key_dests(&mut msg);
                self.enqueue_message(msg);
            }
        }
        !keys.is_empty()
    }

    /// Key destinations: the capture chain if any; otherwise the focus
    /// chain, the top window, the nearest desktop window and the manager.
    fn add_key_dests(&self, msg: &mut Message) {
        if let Some(capture) = self.capture {
            msg.broadcast_to_parents(&self.tree, capture);
            return;
        }
        if let Some(focus) = self.focus {
            for w in self.tree.chain(focus) {
                if self.kind(w) == Some(WidgetKind::Manager) {
                    break;
                }
                msg.add_dest_unique(w);
            }
        }
        let Some(root) = self.root else {
            return;
        };
        if let Some(top) = self.top_window() {
            for w in self.tree.postorder(top) {
                msg.add_dest_unique(w);
            }
        }
        for &window in self.tree.children(root) {
            let Some(state) = self.window_state(window) else {
                continue;
            };
            if state.foreground {
                break;
            }
            if state.options.desktop {
                for w in self.tree.postorder(window) {
                    msg.add_dest_unique(w);
                }
                break;
            }
        }
        msg.add_dest_unique(root);
    }

    fn generate_timer_messages(&mut self, now: u64) -> bool {
        let fires = self.timers.poll(now);
        for fire in &fires {
            let mut msg = self.new_message(MessageKind::Timer {
                timer: fire.id,
                count: fire.count,
            });
            msg.add_dest(fire.owner);
            self.enqueue_message(msg);
            self.stats.timer_fires += 1;
        }
        !fires.is_empty()
    }

    /// One idle message addressed to every widget with an idle hook.
    fn generate_idle_message(&mut self) {
        let mut msg = self.new_message(MessageKind::Idle);
        for id in self.tree.ids() {
            let wants_idle = self.tree.get(id).is_some_and(|node| {
                node.hooks
                    .iter()
                    .any(|entry| entry.hook.try_borrow().is_ok_and(|hook| hook.wants_idle()))
            });
            if wants_idle {
                msg.add_dest(id);
            }
        }
        if !msg.dests().is_empty() {
            self.enqueue_message(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_click_sequence() {
        let mut state = DoubleClickState::default();
        assert!(!state.press(MouseButtons::LEFT, 0, 400));
        state.release(MouseButtons::LEFT, 50, 400);
        assert!(matches!(state, DoubleClickState::Up { .. }));
        assert!(state.press(MouseButtons::LEFT, 100, 400));
        assert_eq!(state, DoubleClickState::None);
    }

    #[test]
    fn test_double_click_timeout() {
        let mut state = DoubleClickState::default();
        state.press(MouseButtons::LEFT, 0, 400);
        state.release(MouseButtons::LEFT, 10, 400);
        assert!(!state.press(MouseButtons::LEFT, 1000, 400));
        assert!(matches!(state, DoubleClickState::Down { tick: 1000, .. }));
    }

    #[test]
    fn test_double_click_other_button() {
        let mut state = DoubleClickState::default();
        state.press(MouseButtons::LEFT, 0, 400);
        state.release(MouseButtons::LEFT, 10, 400);
        assert!(!state.press(MouseButtons::RIGHT, 20, 400));
        state.release(MouseButtons::LEFT, 30, 400);
        assert_eq!(state, DoubleClickState::None);
    }
}
