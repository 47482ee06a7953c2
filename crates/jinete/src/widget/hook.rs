//! Hooks: the runtime-composable behavior of a widget.

use std::any::Any;
use std::fmt;

use jinete_core::UiError;
use thiserror::Error;

use super::WidgetId;
use crate::Ui;
use crate::message::Message;

/// Error returned by a hook.
///
/// A failing hook is logged and skipped; the remaining hooks of the widget
/// still see the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    /// The hook could not process the message.
    #[error("hook failed: {0}")]
    Failed(String),

    /// A UI operation called from the hook failed.
    #[error(transparent)]
    Ui(#[from] UiError),
}

/// Result of a hook call: `Ok(true)` means the message was consumed.
pub type HookResult = Result<bool, HookError>;

/// Identifies a hook so it can be found or removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookTag {
    /// Untagged.
    Any,
    /// The built-in behavior of a widget kind.
    Kind(super::WidgetKind),
    /// An application-chosen name.
    Named(&'static str),
}

/// Identity of one attached hook, unique for the lifetime of a [`Ui`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(pub(crate) u64);

impl HookTag {
    /// Whether a hook with this tag runs on a widget of `kind`.
    ///
    /// Kind-tagged hooks only run on widgets of that kind; the others run
    /// everywhere.
    pub fn matches(self, kind: super::WidgetKind) -> bool {
        match self {
            Self::Kind(k) => k == kind,
            Self::Any | Self::Named(_) => true,
        }
    }
}

/// Behavior attached to a widget.
///
/// Hooks of a widget are called in registration order. A hook returns
/// `Ok(true)` when it consumed the message.
///
/// Hooks may call back into the [`Ui`]: send messages, create or free
/// widgets, open windows. A hook that is already running is skipped if the
/// same widget receives a nested message.
///
/// # Example
///
/// ```
/// use jinete::prelude::*;
///
/// struct ClickCounter {
///     clicks: u32,
/// }
///
/// impl Hook for ClickCounter {
///     fn on_message(&mut self, _ui: &mut Ui, _widget: WidgetId, msg: &mut Message) -> HookResult {
///         if msg.message_type() == MessageType::ButtonPressed {
///             self.clicks += 1;
///             return Ok(true);
///         }
///         Ok(false)
///     }
/// }
/// ```
pub trait Hook: Any {
    /// Handle a message sent to `widget`.
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult;

    /// Whether the widget wants [`MessageType::Idle`](crate::message::MessageType::Idle)
    /// messages while the input queue is empty.
    fn wants_idle(&self) -> bool {
        false
    }
}

/// A hook built from a closure.
pub struct FnHook<F> {
    func: F,
    idle: bool,
}

impl<F> FnHook<F>
where
    F: FnMut(&mut Ui, WidgetId, &mut Message) -> HookResult + 'static,
{
    /// Wrap a closure.
    pub fn new(func: F) -> Self {
        Self { func, idle: false }
    }

    /// Also request idle messages.
    pub fn with_idle(mut self, idle: bool) -> Self {
        self.idle = idle;
        self
    }
}

impl<F> Hook for FnHook<F>
where
    F: FnMut(&mut Ui, WidgetId, &mut Message) -> HookResult + 'static,
{
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult {
        (self.func)(ui, widget, msg)
    }

    fn wants_idle(&self) -> bool {
        self.idle
    }
}

impl<F> fmt::Debug for FnHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook").field("idle", &self.idle).finish()
    }
}
