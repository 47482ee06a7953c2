//! The window stack: opening, closing, raising and modal loops.
//!
//! The children of a manager are its open windows, topmost first. Windows
//! opened during a pump are shown by the next pump, which also gives them
//! focus. A foreground window blocks input to every window below it until it
//! closes; [`Ui::run_until_closed`] drives that as an explicit loop.

use jinete_core::{Rect, Result, UiError};

use super::{Ui, WindowState};
use crate::logging::{span_names, targets};
use crate::message::{MessageKind, Signal};
use crate::widget::{WidgetFlags, WidgetId, WidgetKind};

/// Behavior of a window in the stack.
///
/// # Example
///
/// ```
/// use jinete::manager::WindowOptions;
///
/// let options = WindowOptions::new().with_ontop(true).with_moveable(false);
/// assert!(options.ontop);
/// assert!(options.wantfocus);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    /// Stays at the bottom of the stack; input stops here.
    pub desktop: bool,
    /// Stays above every window without this option.
    pub ontop: bool,
    /// Opening the window takes focus, mouse and capture away from others.
    pub wantfocus: bool,
    /// The title bar can be dragged.
    pub moveable: bool,
    /// An unsized window is sized to its request and centered on open.
    pub autoremap: bool,
}

impl WindowOptions {
    /// A regular, moveable window.
    pub fn new() -> Self {
        Self {
            desktop: false,
            ontop: false,
            wantfocus: true,
            moveable: true,
            autoremap: true,
        }
    }

    /// Set the desktop option.
    pub fn with_desktop(mut self, desktop: bool) -> Self {
        self.desktop = desktop;
        self
    }

    /// Set the on-top option.
    pub fn with_ontop(mut self, ontop: bool) -> Self {
        self.ontop = ontop;
        self
    }

    /// Set the want-focus option.
    pub fn with_wantfocus(mut self, wantfocus: bool) -> Self {
        self.wantfocus = wantfocus;
        self
    }

    /// Set the moveable option.
    pub fn with_moveable(mut self, moveable: bool) -> Self {
        self.moveable = moveable;
        self
    }

    /// Set the auto-remap option.
    pub fn with_autoremap(mut self, autoremap: bool) -> Self {
        self.autoremap = autoremap;
        self
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a window closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Closed normally; `killer` is the widget that closed it (a button).
    Closed { killer: Option<WidgetId> },
    /// The window was destroyed while open.
    Destroyed,
    /// The application quit.
    Quit,
}

/// State of a window driven by a modal loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPoll {
    /// Keep pumping.
    StillOpen,
    /// The loop is over.
    Closed(CloseReason),
}

impl Ui {
    pub(crate) fn window_state(&self, window: WidgetId) -> Option<&WindowState> {
        self.tree.get(window).and_then(|n| n.window.as_ref())
    }

    pub(crate) fn window_state_mut(&mut self, window: WidgetId) -> Option<&mut WindowState> {
        self.tree.get_mut(window).and_then(|n| n.window.as_mut())
    }

    /// Turn a widget into a window with the given options.
    pub(crate) fn make_window(&mut self, widget: WidgetId, options: WindowOptions) -> Result<()> {
        let node = self.tree.node_mut(widget)?;
        node.window = Some(WindowState {
            options,
            ..WindowState::default()
        });
        node.flags.insert(WidgetFlags::HIDDEN | WidgetFlags::FOCUS_REST);
        Ok(())
    }

    /// Options of a window.
    pub fn window_options(&self, window: WidgetId) -> Option<WindowOptions> {
        self.window_state(window).map(|s| s.options.clone())
    }

    /// Whether `window` is open in a manager.
    pub fn is_window_open(&self, window: WidgetId) -> bool {
        self.window_state(window).is_some_and(|s| s.is_open)
    }

    /// The widget that closed the window the last time, if any.
    pub fn window_killer(&self, window: WidgetId) -> Option<WidgetId> {
        self.window_state(window).and_then(|s| s.killer)
    }

    /// Open windows of the root manager, topmost first.
    pub fn windows(&self) -> Vec<WidgetId> {
        self.root.map(|root| self.children(root)).unwrap_or_default()
    }

    /// The topmost open window of the root manager.
    pub fn top_window(&self) -> Option<WidgetId> {
        let root = self.root?;
        self.tree.children(root).first().copied()
    }

    /// Open a window; the next pump shows it and gives it focus.
    pub fn open_window(&mut self, window: WidgetId) -> Result<()> {
        self.open_window_internal(window, true)
    }

    /// Open a window without taking focus (tooltips, palettes).
    pub fn open_window_bg(&mut self, window: WidgetId) -> Result<()> {
        self.open_window_internal(window, false)
    }

    /// Open a window and pump until it closes.
    ///
    /// Windows below it get no mouse or keyboard input meanwhile.
    pub fn open_window_fg(&mut self, window: WidgetId) -> Result<CloseReason> {
        self.open_window(window)?;
        self.run_until_closed(window)
    }

    fn open_window_internal(&mut self, window: WidgetId, take_focus: bool) -> Result<()> {
        let state = self.window_state(window).ok_or(UiError::NotAWindow)?;
        if state.is_open {
            return Err(UiError::AlreadyOpen);
        }
        let options = state.options.clone();
        let manager = self
            .tree
            .parent(window)
            .filter(|&p| self.kind(p) == Some(WidgetKind::Manager))
            .or(self.root)
            .ok_or(UiError::InvalidWidget)?;

        if options.autoremap && self.tree.node(window)?.rect.is_empty() {
            self.center_window(window)?;
        }
        if options.wantfocus && take_focus {
            self.release_mouse();
            self.set_mouse(None);
            self.set_focus(None);
        }

        let index = if options.ontop {
            0
        } else {
            self.ontop_count(manager)
        };
        self.tree.set_parent(window, Some(manager), Some(index))?;

        if let Some(state) = self.window_state_mut(window) {
            state.is_open = true;
            state.killer = None;
            state.close_reason = None;
            state.take_focus = take_focus && options.wantfocus;
        }

        let mut msg = self.new_message(MessageKind::Open);
        msg.broadcast_to_children(&self.tree, window);
        self.enqueue_message(msg);

        if !self.new_windows.contains(&window) {
            self.new_windows.push(window);
        }
        self.emit_signal(manager, Signal::ManagerAddWindow);
        tracing::debug!(target: targets::MANAGER, ?window, ?manager, take_focus, "window opened");
        Ok(())
    }

    /// Number of on-top windows at the top of a manager's stack.
    fn ontop_count(&self, manager: WidgetId) -> usize {
        self.tree
            .children(manager)
            .iter()
            .take_while(|&&w| self.window_state(w).is_some_and(|s| s.options.ontop))
            .count()
    }

    /// Close an open window. `killer` is reported by
    /// [`run_until_closed`](Self::run_until_closed).
    pub fn close_window(&mut self, window: WidgetId, killer: Option<WidgetId>) -> Result<()> {
        if !self.is_window_open(window) {
            return Err(UiError::NotOpen);
        }
        self.close_window_internal(window, killer);
        Ok(())
    }

    pub(crate) fn close_window_internal(&mut self, window: WidgetId, killer: Option<WidgetId>) {
        let Some(manager) = self.tree.parent(window) else {
            return;
        };
        // A desktop window takes every window above it down with it.
        if self
            .window_state(window)
            .is_some_and(|s| s.options.desktop)
        {
            let above: Vec<WidgetId> = self
                .tree
                .children(manager)
                .iter()
                .take_while(|&&w| w != window)
                .copied()
                .collect();
            for w in above {
                if self.is_window_open(w) {
                    self.close_window_internal(w, None);
                }
            }
        }

        self.emit_signal(window, Signal::WindowClose);
        self.release_widget(window);

        let area = self.rect(window).unwrap_or(Rect::EMPTY);
        let mut msg = self.new_message(MessageKind::Close);
        msg.broadcast_to_children(&self.tree, window);
        self.enqueue_message(msg);

        if let Some(node) = self.tree.get_mut(window) {
            node.flags.insert(WidgetFlags::HIDDEN);
            node.flags.remove(WidgetFlags::DIRTY);
            node.update_region.clear();
        }
        if self.tree.set_parent(window, None, None).is_err() {
            return;
        }
        self.invalidate_rect(manager, area);

        if let Some(state) = self.window_state_mut(window) {
            state.is_open = false;
            state.killer = killer;
            state.close_reason = Some(CloseReason::Closed { killer });
        }
        self.new_windows.retain(|&w| w != window);
        self.update_proc_windows();
        self.emit_signal(manager, Signal::ManagerRemoveWindow);
        tracing::debug!(target: targets::MANAGER, ?window, ?killer, "window closed");
    }

    /// What a modal loop on `window` should do next.
    pub fn poll_window(&self, window: WidgetId) -> ModalPoll {
        if self.quit {
            return ModalPoll::Closed(CloseReason::Quit);
        }
        match self.window_state(window) {
            None => ModalPoll::Closed(CloseReason::Destroyed),
            Some(state) if state.is_open => ModalPoll::StillOpen,
            Some(state) => ModalPoll::Closed(
                state
                    .close_reason
                    .unwrap_or(CloseReason::Closed { killer: state.killer }),
            ),
        }
    }

    /// Pump until `window` closes, blocking input to the windows below it.
    ///
    /// Loops nest: a modal window may open another modal window from a hook.
    pub fn run_until_closed(&mut self, window: WidgetId) -> Result<CloseReason> {
        if !self.is_window_open(window) {
            return Err(UiError::NotOpen);
        }
        let _span = tracing::debug_span!(span_names::MODAL, ?window).entered();
        if let Some(state) = self.window_state_mut(window) {
            state.foreground = true;
        }
        self.update_proc_windows();

        let reason = loop {
            if let ModalPoll::Closed(reason) = self.poll_window(window) {
                break reason;
            }
            if !self.pump() {
                self.idle_wait();
            }
        };

        if reason == CloseReason::Quit && self.is_window_open(window) {
            self.close_window_internal(window, None);
        }
        if let Some(state) = self.window_state_mut(window) {
            state.foreground = false;
        }
        self.update_proc_windows();
        tracing::debug!(target: targets::MANAGER, ?window, ?reason, "modal loop finished");
        Ok(reason)
    }

    /// Rebuild the list of windows receiving input: from the top of the
    /// root manager's stack down to the first foreground or desktop window.
    pub(crate) fn update_proc_windows(&mut self) {
        let mut list = Vec::new();
        if let Some(root) = self.root {
            for &window in self.tree.children(root) {
                list.push(window);
                if self
                    .window_state(window)
                    .is_some_and(|s| s.foreground || s.options.desktop)
                {
                    break;
                }
            }
        }
        self.proc_windows = list;
    }

    /// Windows receiving input, topmost first.
    pub fn input_windows(&self) -> &[WidgetId] {
        &self.proc_windows
    }

    /// Bring a window to the top of its stack, below any on-top windows.
    ///
    /// Desktop windows never move.
    pub fn raise_window(&mut self, window: WidgetId) -> Result<()> {
        let state = self.window_state(window).ok_or(UiError::NotAWindow)?;
        if state.options.desktop || !state.is_open {
            return Ok(());
        }
        let ontop = state.options.ontop;
        let manager = self.tree.parent(window).ok_or(UiError::NotOpen)?;
        let index = if ontop {
            0
        } else {
            self.tree
                .children(manager)
                .iter()
                .filter(|&&w| w != window)
                .take_while(|&&w| self.window_state(w).is_some_and(|s| s.options.ontop))
                .count()
        };
        if self.tree.children(manager).get(index) == Some(&window) {
            return Ok(());
        }
        self.tree.set_parent(window, Some(manager), Some(index))?;
        self.update_proc_windows();
        self.invalidate(window);
        tracing::debug!(target: targets::MANAGER, ?window, "window raised");
        Ok(())
    }

    /// Resize a window to its requested size, keeping its origin.
    pub fn remap_window(&mut self, window: WidgetId) -> Result<()> {
        let origin = self.tree.node(window)?.rect.origin();
        let size = self.request_size(window);
        self.set_rect(
            window,
            Rect::from_origin_size(origin.x, origin.y, size.width, size.height),
        );
        Ok(())
    }

    /// Resize a window to its requested size and center it on the screen.
    pub fn center_window(&mut self, window: WidgetId) -> Result<()> {
        self.tree.node(window)?;
        let size = self.request_size(window);
        let screen = self.config.screen_size();
        let x = (screen.width - size.width) / 2;
        let y = (screen.height - size.height) / 2;
        self.set_rect(window, Rect::from_origin_size(x, y, size.width, size.height));
        Ok(())
    }

    /// Move a window so its top-left corner is at (`x`, `y`).
    ///
    /// The area it leaves is repainted and the window receives
    /// [`MessageKind::WinMove`].
    pub fn move_window(&mut self, window: WidgetId, x: i32, y: i32) -> Result<()> {
        let old = self.tree.node(window)?.rect;
        if old.x1 == x && old.y1 == y {
            return Ok(());
        }
        let new = old.translate(x - old.x1, y - old.y1);
        let parent = self.tree.parent(window);
        self.set_rect(window, new);
        if let Some(parent) = parent {
            self.invalidate_rect(parent, old);
        }
        self.invalidate(window);

        let mut msg = self.new_message(MessageKind::WinMove);
        msg.add_dest(window);
        self.send_message(window, &mut msg);
        Ok(())
    }
}
