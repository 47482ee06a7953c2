//! The [`Ui`] context: manager state, widget operations and the dispatch loop.
//!
//! Everything that other toolkits keep in globals (the widget table, the
//! message queue, focus/mouse/capture, the window stack, the theme) lives in
//! one `Ui` value. All widget operations go through it.
//!
//! # Pump cycle
//!
//! One [`Ui::pump`] iteration:
//!
//! 1. Poll the input source and turn state changes into messages
//! 2. Show windows opened since the previous pump
//! 3. Fire expired timers (one coalesced message per timer)
//! 4. Broadcast an idle message when no input arrived
//! 5. Deliver queued messages in FIFO order
//! 6. Repaint dirty widgets, clipped to their visible area
//!
//! # Example
//!
//! ```
//! use jinete::prelude::*;
//!
//! let mut ui = Ui::new(UiConfig::new().with_screen_size(320, 200));
//! let manager = ui.new_manager().unwrap();
//! let window = ui.new_window("Hello").unwrap();
//! let button = ui.new_button("OK").unwrap();
//! ui.add_child(window, button).unwrap();
//!
//! ui.open_window(window).unwrap();
//! ui.pump();
//! assert!(ui.is_window_open(window));
//! assert_eq!(ui.parent(window), Some(manager));
//! ```

mod dispatch;
mod focus;
mod manager_hook;
mod pump;
mod redraw;
mod windows;

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use jinete_core::{
    Borders, Clock, Point, Rect, Result, Size, SteadyClock, TimerId, TimerTable, UiError,
};

use crate::config::UiConfig;
use crate::draw::{DrawSurface, FontMetrics, NullSurface, Theme};
use crate::input::{InputSource, KeyCode, KeyboardModifiers, MouseButtons, NullInput};
use crate::logging::targets;
use crate::message::{Message, MessageKind, MessageType, Signal};
use crate::widget::node::HookEntry;
use crate::widget::{
    Align, FnHook, Hook, HookId, HookResult, HookTag, WidgetFlags, WidgetId, WidgetKind, WidgetNode,
    WidgetTree,
};

pub use manager_hook::ManagerHook;
pub use pump::DoubleClickState;
pub use windows::{CloseReason, ModalPoll, WindowOptions};

/// Window-specific state, stored on window widgets.
#[derive(Debug, Clone, Default)]
pub(crate) struct WindowState {
    pub(crate) options: WindowOptions,
    pub(crate) is_open: bool,
    /// Set while a modal loop runs for this window.
    pub(crate) foreground: bool,
    /// Focus moves into the window when the next pump shows it.
    pub(crate) take_focus: bool,
    pub(crate) killer: Option<WidgetId>,
    pub(crate) close_reason: Option<CloseReason>,
}

/// Counters describing the work done by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchStats {
    /// Queued messages delivered (sub-messages included).
    pub messages_dispatched: u64,
    /// Hook invocations.
    pub hook_calls: u64,
    /// Hooks that returned an error.
    pub hook_failures: u64,
    /// Destinations skipped because the widget no longer existed.
    pub stale_destinations: u64,
    /// Timer messages generated.
    pub timer_fires: u64,
    /// Draw messages sent.
    pub draws: u64,
}

/// Last mouse state seen by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct MouseState {
    pub(crate) pos: Point,
    pub(crate) buttons: MouseButtons,
    pub(crate) wheel: i32,
}

/// The GUI context: widget arena, manager state and message queue.
pub struct Ui {
    config: UiConfig,
    pub(crate) tree: WidgetTree,
    /// The first manager created; it covers the screen.
    pub(crate) root: Option<WidgetId>,
    pub(crate) queue: VecDeque<Message>,
    pub(crate) filters: HashMap<MessageType, Vec<WidgetId>>,
    pub(crate) timers: TimerTable<WidgetId>,
    clock: Box<dyn Clock>,
    input: Box<dyn InputSource>,
    surface: Box<dyn DrawSurface>,
    pub(crate) focus: Option<WidgetId>,
    pub(crate) mouse: Option<WidgetId>,
    pub(crate) capture: Option<WidgetId>,
    /// Windows opened since the last pump.
    pub(crate) new_windows: Vec<WidgetId>,
    /// Windows that receive input, topmost first.
    pub(crate) proc_windows: Vec<WidgetId>,
    pub(crate) mouse_state: MouseState,
    pub(crate) modifiers: KeyboardModifiers,
    /// Held keys with their autorepeat count.
    pub(crate) keys_down: HashMap<KeyCode, u32>,
    pub(crate) double_click: DoubleClickState,
    /// Widgets currently running hooks, innermost last.
    pub(crate) busy: Vec<WidgetId>,
    pub(crate) deferred_free: Vec<WidgetId>,
    next_hook_id: u64,
    pub(crate) first_pump: bool,
    pub(crate) stats: DispatchStats,
    pub(crate) quit: bool,
}

impl Ui {
    /// Create a context with a null input source, a null surface and a
    /// steady clock.
    pub fn new(config: UiConfig) -> Self {
        let surface = NullSurface::new(config.screen_size());
        let tree = WidgetTree::new(config.widget_limit());
        Self {
            config,
            tree,
            root: None,
            queue: VecDeque::new(),
            filters: HashMap::new(),
            timers: TimerTable::new(),
            clock: Box::new(SteadyClock::new()),
            input: Box::new(NullInput),
            surface: Box::new(surface),
            focus: None,
            mouse: None,
            capture: None,
            new_windows: Vec::new(),
            proc_windows: Vec::new(),
            mouse_state: MouseState::default(),
            modifiers: KeyboardModifiers::NONE,
            keys_down: HashMap::new(),
            double_click: DoubleClickState::default(),
            busy: Vec::new(),
            deferred_free: Vec::new(),
            next_hook_id: 0,
            first_pump: true,
            stats: DispatchStats::default(),
            quit: false,
        }
    }

    /// Replace the input source.
    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Replace the draw surface.
    pub fn with_surface(mut self, surface: impl DrawSurface + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // =========================================================================
    // Context accessors
    // =========================================================================

    /// The configuration.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// The theme.
    pub fn theme(&self) -> &Theme {
        self.config.theme()
    }

    /// Font metrics used for text measurement.
    pub fn font(&self) -> FontMetrics {
        *self.config.font()
    }

    /// The draw surface, for hooks handling draw messages.
    pub fn surface(&mut self) -> &mut dyn DrawSurface {
        self.surface.as_mut()
    }

    /// Current tick of the clock.
    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    /// The widget arena (read-only).
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The root manager.
    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Dispatcher counters.
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Keyboard modifiers seen by the last pump.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Mouse position seen by the last pump.
    pub fn mouse_pos(&self) -> Point {
        self.mouse_state.pos
    }

    /// Number of queued messages.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Create a message stamped with the current modifiers.
    pub fn new_message(&self, kind: MessageKind) -> Message {
        Message::new(kind).with_modifiers(self.modifiers)
    }

    // =========================================================================
    // Widget creation
    // =========================================================================

    /// Create a detached, shown widget of the given kind with no hooks.
    pub fn new_widget(&mut self, kind: WidgetKind) -> Result<WidgetId> {
        self.tree.insert(kind)
    }

    /// Create a manager.
    ///
    /// The first manager becomes the root and covers the screen; later ones
    /// are sub-desktops placed like any other widget.
    pub fn new_manager(&mut self) -> Result<WidgetId> {
        let manager = self.tree.insert(WidgetKind::Manager)?;
        self.add_hook(manager, HookTag::Kind(WidgetKind::Manager), ManagerHook)?;
        if self.root.is_none() {
            let size = self.config.screen_size();
            self.tree.node_mut(manager)?.rect =
                Rect::from_origin_size(0, 0, size.width, size.height);
            self.root = Some(manager);
            tracing::debug!(target: targets::MANAGER, ?manager, "root manager created");
        }
        Ok(manager)
    }

    /// Whether the widget exists.
    pub fn is_alive(&self, widget: WidgetId) -> bool {
        self.tree.contains(widget)
    }

    /// Borrow a widget's node.
    pub fn node(&self, widget: WidgetId) -> Result<&WidgetNode> {
        self.tree.node(widget)
    }

    /// The widget kind.
    pub fn kind(&self, widget: WidgetId) -> Option<WidgetKind> {
        self.tree.get(widget).map(|n| n.kind)
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// Append `child` to `parent`'s children, detaching it from any previous
    /// parent.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.tree.set_parent(child, Some(parent), None)?;
        self.invalidate(child);
        Ok(())
    }

    /// Insert `child` at `index` in `parent`'s children.
    pub fn insert_child(&mut self, parent: WidgetId, child: WidgetId, index: usize) -> Result<()> {
        self.tree.set_parent(child, Some(parent), Some(index))?;
        self.invalidate(child);
        Ok(())
    }

    /// Detach `child` from `parent` without destroying it.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        if self.tree.parent(child) != Some(parent) {
            return Err(UiError::InvalidWidget);
        }
        self.release_widget(child);
        let area = self.tree.node(child)?.rect;
        self.tree.set_parent(child, None, None)?;
        self.invalidate_rect(parent, area);
        Ok(())
    }

    /// Put `new` at the position of `old` in `old`'s parent.
    pub fn replace_child(&mut self, old: WidgetId, new: WidgetId) -> Result<()> {
        let parent = self.tree.parent(old).ok_or(UiError::InvalidWidget)?;
        let index = self
            .tree
            .children(parent)
            .iter()
            .position(|&c| c == old)
            .ok_or(UiError::InvalidWidget)?;
        self.remove_child(parent, old)?;
        self.insert_child(parent, new, index)
    }

    /// The parent of a widget.
    pub fn parent(&self, widget: WidgetId) -> Option<WidgetId> {
        self.tree.parent(widget)
    }

    /// Children of a widget.
    pub fn children(&self, widget: WidgetId) -> Vec<WidgetId> {
        self.tree.children(widget).to_vec()
    }

    /// The window containing a widget.
    pub fn window_of(&self, widget: WidgetId) -> Option<WidgetId> {
        self.tree.window_of(widget)
    }

    /// The manager containing a widget.
    pub fn manager_of(&self, widget: WidgetId) -> Option<WidgetId> {
        self.tree.manager_of(widget)
    }

    /// Find a widget by name in the subtree of `root`.
    pub fn find_by_name(&self, root: WidgetId, name: &str) -> Option<WidgetId> {
        self.tree.find_by_name(root, name)
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    /// Attach a hook. Hooks run in the order they were added.
    pub fn add_hook(&mut self, widget: WidgetId, tag: HookTag, hook: impl Hook) -> Result<()> {
        let id = self.reserve_hook_id();
        self.insert_hook(widget, id, tag, hook)
    }

    /// Hand out the identity of a hook before it is built, so the hook can
    /// later detach itself with [`remove_hook`](Self::remove_hook).
    pub fn reserve_hook_id(&mut self) -> HookId {
        self.next_hook_id += 1;
        HookId(self.next_hook_id)
    }

    /// Attach a hook under an identity from
    /// [`reserve_hook_id`](Self::reserve_hook_id).
    pub fn insert_hook(
        &mut self,
        widget: WidgetId,
        id: HookId,
        tag: HookTag,
        hook: impl Hook,
    ) -> Result<()> {
        let node = self.tree.node_mut(widget)?;
        let hook: Rc<RefCell<dyn Hook>> = Rc::new(RefCell::new(hook));
        node.hooks.push(HookEntry { id, tag, hook });
        Ok(())
    }

    /// Attach a closure as an untagged hook.
    pub fn add_hook_fn<F>(&mut self, widget: WidgetId, func: F) -> Result<()>
    where
        F: FnMut(&mut Ui, WidgetId, &mut Message) -> HookResult + 'static,
    {
        self.add_hook(widget, HookTag::Any, FnHook::new(func))
    }

    /// Detach every hook with `tag`, returning how many were removed.
    pub fn remove_hooks(&mut self, widget: WidgetId, tag: HookTag) -> Result<usize> {
        let node = self.tree.node_mut(widget)?;
        let before = node.hooks.len();
        node.hooks.retain(|h| h.tag != tag);
        Ok(before - node.hooks.len())
    }

    /// Detach one hook. Returns whether it was attached to `widget`.
    ///
    /// A hook may remove itself while running; it is not called again.
    pub fn remove_hook(&mut self, widget: WidgetId, id: HookId) -> Result<bool> {
        let node = self.tree.node_mut(widget)?;
        let before = node.hooks.len();
        node.hooks.retain(|h| h.id != id);
        Ok(node.hooks.len() != before)
    }

    /// Run `f` on the first hook of type `T` attached to the widget.
    ///
    /// Returns `None` when no such hook exists or it is currently running.
    pub fn with_hook<T: Hook, R>(
        &self,
        widget: WidgetId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        let node = self.tree.get(widget)?;
        for entry in &node.hooks {
            let Ok(mut guard) = entry.hook.try_borrow_mut() else {
                continue;
            };
            let any: &mut dyn std::any::Any = &mut *guard;
            if let Some(hook) = any.downcast_mut::<T>() {
                return Some(f(hook));
            }
        }
        None
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// The widget's text.
    pub fn text(&self, widget: WidgetId) -> Option<String> {
        self.tree.get(widget).and_then(|n| n.text.clone())
    }

    /// Replace the widget's text and emit [`Signal::SetText`].
    pub fn set_text(&mut self, widget: WidgetId, text: impl Into<String>) -> Result<()> {
        self.tree.node_mut(widget)?.text = Some(text.into());
        self.invalidate(widget);
        self.emit_signal(widget, Signal::SetText);
        Ok(())
    }

    /// The widget's name.
    pub fn name(&self, widget: WidgetId) -> Option<String> {
        self.tree.get(widget).and_then(|n| n.name.clone())
    }

    /// Name a widget.
    pub fn set_name(&mut self, widget: WidgetId, name: impl Into<String>) -> Result<()> {
        self.tree.node_mut(widget)?.name = Some(name.into());
        Ok(())
    }

    /// The widget's rect in screen coordinates.
    pub fn rect(&self, widget: WidgetId) -> Option<Rect> {
        self.tree.get(widget).map(|n| n.rect)
    }

    /// Set the static minimum size used by size requests.
    pub fn set_min_size(&mut self, widget: WidgetId, size: Size) -> Result<()> {
        self.tree.node_mut(widget)?.min_size = size.clamped();
        Ok(())
    }

    /// Set the border widths.
    pub fn set_borders(&mut self, widget: WidgetId, borders: Borders) -> Result<()> {
        self.tree.node_mut(widget)?.borders = borders;
        Ok(())
    }

    /// Set the spacing between children in layouts.
    pub fn set_child_spacing(&mut self, widget: WidgetId, spacing: i32) -> Result<()> {
        self.tree.node_mut(widget)?.child_spacing = spacing.max(0);
        Ok(())
    }

    /// Set the text alignment.
    pub fn set_align(&mut self, widget: WidgetId, align: Align) -> Result<()> {
        self.tree.node_mut(widget)?.align = align;
        Ok(())
    }

    /// Current flags (empty for unknown widgets).
    pub fn flags(&self, widget: WidgetId) -> WidgetFlags {
        self.tree.get(widget).map(|n| n.flags).unwrap_or_default()
    }

    fn set_flag(&mut self, widget: WidgetId, flag: WidgetFlags, value: bool) -> Result<()> {
        self.tree.node_mut(widget)?.flags.set(flag, value);
        Ok(())
    }

    /// Mark the widget as absorbing leftover layout space.
    pub fn set_expansive(&mut self, widget: WidgetId, value: bool) -> Result<()> {
        self.set_flag(widget, WidgetFlags::EXPANSIVE, value)
    }

    /// Mark the widget as attracting focus when its window opens.
    pub fn set_magnetic(&mut self, widget: WidgetId, value: bool) -> Result<()> {
        self.set_flag(widget, WidgetFlags::MAGNETIC, value)
    }

    /// Allow the widget to receive keyboard focus.
    pub fn set_focus_rest(&mut self, widget: WidgetId, value: bool) -> Result<()> {
        self.set_flag(widget, WidgetFlags::FOCUS_REST, value)
    }

    /// Mark the widget as decoration.
    pub fn set_decorative(&mut self, widget: WidgetId, value: bool) -> Result<()> {
        self.set_flag(widget, WidgetFlags::DECORATIVE, value)
    }

    /// Show a hidden widget.
    pub fn show(&mut self, widget: WidgetId) -> Result<()> {
        if !self.tree.node(widget)?.flags.contains(WidgetFlags::HIDDEN) {
            return Ok(());
        }
        self.set_flag(widget, WidgetFlags::HIDDEN, false)?;
        self.invalidate(widget);
        self.emit_signal(widget, Signal::Show);
        Ok(())
    }

    /// Hide a widget, releasing focus, mouse and capture held inside it.
    pub fn hide(&mut self, widget: WidgetId) -> Result<()> {
        let node = self.tree.node(widget)?;
        if node.flags.contains(WidgetFlags::HIDDEN) {
            return Ok(());
        }
        let area = node.rect;
        let parent = node.parent;
        self.release_widget(widget);
        self.set_flag(widget, WidgetFlags::HIDDEN, true)?;
        // Hidden subtrees are never painted, so pending repaints are dropped.
        for id in self.tree.preorder(widget) {
            if let Some(node) = self.tree.get_mut(id) {
                node.flags.remove(WidgetFlags::DIRTY);
                node.update_region.clear();
            }
        }
        if let Some(parent) = parent {
            self.invalidate_rect(parent, area);
        }
        self.emit_signal(widget, Signal::Hide);
        Ok(())
    }

    /// Enable a widget.
    pub fn enable(&mut self, widget: WidgetId) -> Result<()> {
        if !self.tree.node(widget)?.flags.contains(WidgetFlags::DISABLED) {
            return Ok(());
        }
        self.set_flag(widget, WidgetFlags::DISABLED, false)?;
        self.invalidate(widget);
        self.emit_signal(widget, Signal::Enable);
        Ok(())
    }

    /// Disable a widget, releasing focus, mouse and capture held inside it.
    pub fn disable(&mut self, widget: WidgetId) -> Result<()> {
        if self.tree.node(widget)?.flags.contains(WidgetFlags::DISABLED) {
            return Ok(());
        }
        self.release_widget(widget);
        self.set_flag(widget, WidgetFlags::DISABLED, true)?;
        self.invalidate(widget);
        self.emit_signal(widget, Signal::Disable);
        Ok(())
    }

    /// Select a widget.
    pub fn select(&mut self, widget: WidgetId) -> Result<()> {
        if self.tree.node(widget)?.flags.contains(WidgetFlags::SELECTED) {
            return Ok(());
        }
        self.set_flag(widget, WidgetFlags::SELECTED, true)?;
        self.invalidate(widget);
        self.emit_signal(widget, Signal::Select);
        Ok(())
    }

    /// Deselect a widget.
    pub fn deselect(&mut self, widget: WidgetId) -> Result<()> {
        if !self.tree.node(widget)?.flags.contains(WidgetFlags::SELECTED) {
            return Ok(());
        }
        self.set_flag(widget, WidgetFlags::SELECTED, false)?;
        self.invalidate(widget);
        self.emit_signal(widget, Signal::Deselect);
        Ok(())
    }

    /// Whether the widget and its ancestors are shown.
    pub fn is_visible(&self, widget: WidgetId) -> bool {
        self.tree.is_visible(widget)
    }

    /// Whether the widget and its ancestors are enabled.
    pub fn is_enabled(&self, widget: WidgetId) -> bool {
        self.tree.is_enabled(widget)
    }

    /// Whether the widget is selected.
    pub fn is_selected(&self, widget: WidgetId) -> bool {
        self.flags(widget).contains(WidgetFlags::SELECTED)
    }

    /// Whether the widget is on the focus chain.
    pub fn has_focus(&self, widget: WidgetId) -> bool {
        self.flags(widget).contains(WidgetFlags::HAS_FOCUS)
    }

    /// Whether the widget is on the chain under the cursor.
    pub fn has_mouse(&self, widget: WidgetId) -> bool {
        self.flags(widget).contains(WidgetFlags::HAS_MOUSE)
    }

    /// Whether the widget holds the mouse capture.
    pub fn has_capture(&self, widget: WidgetId) -> bool {
        self.flags(widget).contains(WidgetFlags::HAS_CAPTURE)
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Deliver a signal to `widget`, then to its window if the widget did not
    /// handle it. Returns whether someone handled it.
    ///
    /// Muted widgets emit nothing.
    pub fn emit_signal(&mut self, widget: WidgetId, signal: Signal) -> bool {
        let Some(node) = self.tree.get(widget) else {
            return false;
        };
        if node.signals_muted > 0 {
            return false;
        }
        let mut msg = self.new_message(MessageKind::Signal {
            signal,
            from: widget,
        });
        msg.add_dest(widget);
        if self.send_message(widget, &mut msg) {
            return true;
        }
        match self.tree.window_of(widget) {
            Some(window) if window != widget => self.send_message(window, &mut msg),
            _ => false,
        }
    }

    /// Mute signals of a widget. Calls nest.
    pub fn signal_off(&mut self, widget: WidgetId) -> Result<()> {
        let node = self.tree.node_mut(widget)?;
        node.signals_muted += 1;
        Ok(())
    }

    /// Undo one [`signal_off`](Self::signal_off).
    pub fn signal_on(&mut self, widget: WidgetId) -> Result<()> {
        let node = self.tree.node_mut(widget)?;
        node.signals_muted = node.signals_muted.saturating_sub(1);
        Ok(())
    }

    /// Whether the widget currently emits signals.
    pub fn signals_enabled(&self, widget: WidgetId) -> bool {
        self.tree.get(widget).is_some_and(|n| n.signals_muted == 0)
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Register a stopped timer owned by `widget`.
    pub fn add_timer(&mut self, widget: WidgetId, interval: u64) -> Result<TimerId> {
        if !self.tree.contains(widget) {
            return Err(UiError::InvalidWidget);
        }
        Ok(self.timers.add(widget, interval))
    }

    /// Start (or restart) a timer from the current tick.
    pub fn start_timer(&mut self, timer: TimerId) -> Result<()> {
        let now = self.clock.ticks();
        self.timers.start(timer, now)
    }

    /// Stop a timer.
    pub fn stop_timer(&mut self, timer: TimerId) -> Result<()> {
        self.timers.stop(timer)
    }

    /// Remove a timer and any of its messages still queued.
    pub fn remove_timer(&mut self, timer: TimerId) -> Result<()> {
        self.timers.remove(timer)?;
        self.queue
            .retain(|m| !matches!(m.kind(), MessageKind::Timer { timer: t, .. } if *t == timer));
        Ok(())
    }

    /// Whether a timer is running.
    pub fn is_timer_running(&self, timer: TimerId) -> bool {
        self.timers.is_running(timer)
    }

    /// Change a timer's interval.
    pub fn set_timer_interval(&mut self, timer: TimerId, interval: u64) -> Result<()> {
        self.timers.set_interval(timer, interval)
    }

    // =========================================================================
    // Loop control
    // =========================================================================

    /// Ask [`run`](Self::run) and modal loops to return.
    pub fn quit(&mut self) {
        tracing::debug!(target: targets::MANAGER, "quit requested");
        self.quit = true;
    }

    /// Whether [`quit`](Self::quit) was called.
    pub fn is_quitting(&self) -> bool {
        self.quit
    }
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("widgets", &self.tree.len())
            .field("root", &self.root)
            .field("queue", &self.queue.len())
            .field("focus", &self.focus)
            .field("mouse", &self.mouse)
            .field("capture", &self.capture)
            .finish()
    }
}
