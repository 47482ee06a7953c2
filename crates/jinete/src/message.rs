//! Messages: the unit of communication between the manager and widgets.
//!
//! A [`Message`] carries a [`MessageKind`] payload, an ordered list of
//! destination widgets, the keyboard modifiers at creation time and an
//! optional sub-message. The sub-message is delivered to its own
//! destinations only when no destination of the parent consumed it.
//!
//! Messages are either sent synchronously with
//! [`Ui::send_message`](crate::Ui::send_message) or enqueued with
//! [`Ui::enqueue_message`](crate::Ui::enqueue_message) and delivered by the
//! next pump.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use jinete_core::{Point, Rect, Region, TimerId};

use crate::input::{KeyCode, KeyboardModifiers, MouseButtons};
use crate::widget::{WidgetId, WidgetKind, WidgetTree};

/// Notifications emitted by widgets through
/// [`Ui::emit_signal`](crate::Ui::emit_signal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Show,
    Hide,
    Enable,
    Disable,
    Select,
    Deselect,
    SetText,
    /// A window is about to close.
    WindowClose,
    /// A window was opened in a manager.
    ManagerAddWindow,
    /// A window was closed in a manager.
    ManagerRemoveWindow,
    /// A button was activated.
    ButtonSelect,
    /// A background job reported progress.
    JobProgress,
    /// A background job finished.
    JobFinished,
    /// Application-defined signal.
    Custom(u32),
}

/// Keyboard payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMessage {
    /// The key.
    pub key: KeyCode,
    /// Character produced, if any.
    pub ch: Option<char>,
    /// Autorepeat count; 0 for the first press.
    pub repeat: u32,
}

/// Mouse payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMessage {
    /// Cursor position in screen coordinates.
    pub x: i32,
    pub y: i32,
    /// Buttons involved: the changed buttons for press/release, the held
    /// buttons otherwise.
    pub buttons: MouseButtons,
    /// Wheel delta (wheel messages only).
    pub wheel: i32,
}

impl MouseMessage {
    /// Cursor position.
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Type tag of a message, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Open,
    Close,
    Destroy,
    Draw,
    Signal,
    Timer,
    ReqSize,
    SetPos,
    WinMove,
    DrawRegion,
    DeferredFree,
    QueueProcessing,
    Idle,
    Char,
    KeyPressed,
    KeyReleased,
    FocusEnter,
    FocusLeave,
    ButtonPressed,
    ButtonReleased,
    DoubleClick,
    MouseEnter,
    MouseLeave,
    Motion,
    Wheel,
    User,
}

impl MessageType {
    /// Whether this is a mouse message.
    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            Self::ButtonPressed
                | Self::ButtonReleased
                | Self::DoubleClick
                | Self::MouseEnter
                | Self::MouseLeave
                | Self::Motion
                | Self::Wheel
        )
    }

    /// Whether this is a keyboard message.
    pub fn is_key(self) -> bool {
        matches!(self, Self::Char | Self::KeyPressed | Self::KeyReleased)
    }

    /// Whether delivery stops at the first destination that consumes it.
    ///
    /// Input messages bubble from the innermost widget outwards and stop at
    /// the first consumer. Everything else reaches every destination.
    pub fn stops_at_first_consumer(self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::KeyPressed
                | Self::KeyReleased
                | Self::ButtonPressed
                | Self::ButtonReleased
                | Self::DoubleClick
                | Self::Motion
                | Self::Wheel
        )
    }
}

/// Message payload.
#[derive(Clone)]
pub enum MessageKind {
    /// The window containing the widget was opened.
    Open,
    /// The window containing the widget was closed.
    Close,
    /// The widget is being destroyed.
    Destroy,
    /// Paint `rect`; `count` is the number of rects still to come in this pass.
    Draw { rect: Rect, count: usize },
    /// A signal emitted by `from`.
    Signal { signal: Signal, from: WidgetId },
    /// A timer expired `count` times since its previous fire.
    Timer { timer: TimerId, count: u32 },
    /// Size request; hooks write the natural size into the payload.
    ReqSize { width: i32, height: i32 },
    /// Position assignment.
    SetPos { rect: Rect },
    /// A window moved.
    WinMove,
    /// Invalidate a region of the widget.
    DrawRegion { region: Region },
    /// Free a widget once dispatch is done with it.
    DeferredFree { widget: WidgetId },
    /// The manager is about to drain its queue.
    QueueProcessing,
    /// No input arrived this pump.
    Idle,
    Char(KeyMessage),
    KeyPressed(KeyMessage),
    KeyReleased(KeyMessage),
    FocusEnter,
    FocusLeave,
    ButtonPressed(MouseMessage),
    ButtonReleased(MouseMessage),
    DoubleClick(MouseMessage),
    MouseEnter,
    MouseLeave,
    Motion(MouseMessage),
    Wheel(MouseMessage),
    /// Application-defined message.
    User { id: u32, payload: Option<Rc<dyn Any>> },
}

impl MessageKind {
    /// The payload-free type tag.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Open => MessageType::Open,
            Self::Close => MessageType::Close,
            Self::Destroy => MessageType::Destroy,
            Self::Draw { .. } => MessageType::Draw,
            Self::Signal { .. } => MessageType::Signal,
            Self::Timer { .. } => MessageType::Timer,
            Self::ReqSize { .. } => MessageType::ReqSize,
            Self::SetPos { .. } => MessageType::SetPos,
            Self::WinMove => MessageType::WinMove,
            Self::DrawRegion { .. } => MessageType::DrawRegion,
            Self::DeferredFree { .. } => MessageType::DeferredFree,
            Self::QueueProcessing => MessageType::QueueProcessing,
            Self::Idle => MessageType::Idle,
            Self::Char(_) => MessageType::Char,
            Self::KeyPressed(_) => MessageType::KeyPressed,
            Self::KeyReleased(_) => MessageType::KeyReleased,
            Self::FocusEnter => MessageType::FocusEnter,
            Self::FocusLeave => MessageType::FocusLeave,
            Self::ButtonPressed(_) => MessageType::ButtonPressed,
            Self::ButtonReleased(_) => MessageType::ButtonReleased,
            Self::DoubleClick(_) => MessageType::DoubleClick,
            Self::MouseEnter => MessageType::MouseEnter,
            Self::MouseLeave => MessageType::MouseLeave,
            Self::Motion(_) => MessageType::Motion,
            Self::Wheel(_) => MessageType::Wheel,
            Self::User { .. } => MessageType::User,
        }
    }
}

impl fmt::Debug for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw { rect, count } => write!(f, "Draw({rect:?}, {count})"),
            Self::Signal { signal, from } => write!(f, "Signal({signal:?} from {from:?})"),
            Self::Timer { timer, count } => write!(f, "Timer({timer:?} x{count})"),
            Self::ReqSize { width, height } => write!(f, "ReqSize({width}x{height})"),
            Self::SetPos { rect } => write!(f, "SetPos({rect:?})"),
            Self::DrawRegion { region } => write!(f, "DrawRegion({} rects)", region.len()),
            Self::DeferredFree { widget } => write!(f, "DeferredFree({widget:?})"),
            Self::Char(k) | Self::KeyPressed(k) | Self::KeyReleased(k) => {
                write!(f, "{:?}({:?})", self.message_type(), k.key)
            }
            Self::ButtonPressed(m)
            | Self::ButtonReleased(m)
            | Self::DoubleClick(m)
            | Self::Motion(m)
            | Self::Wheel(m) => {
                write!(f, "{:?}({}, {}, {:?})", self.message_type(), m.x, m.y, m.buttons)
            }
            Self::User { id, .. } => write!(f, "User({id})"),
            other => write!(f, "{:?}", other.message_type()),
        }
    }
}

/// A message with its destinations.
#[derive(Clone)]
pub struct Message {
    kind: MessageKind,
    dests: Vec<WidgetId>,
    used: bool,
    modifiers: KeyboardModifiers,
    sub_msg: Option<Box<Message>>,
}

impl Message {
    /// Create a message without destinations.
    pub fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            dests: Vec::new(),
            used: false,
            modifiers: KeyboardModifiers::NONE,
            sub_msg: None,
        }
    }

    /// Create a message addressed to one widget.
    pub fn to(kind: MessageKind, dest: WidgetId) -> Self {
        let mut msg = Self::new(kind);
        msg.add_dest(dest);
        msg
    }

    /// Set the modifier state.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The payload.
    pub fn kind(&self) -> &MessageKind {
        &self.kind
    }

    /// The payload, mutably (hooks answer size requests through it).
    pub fn kind_mut(&mut self) -> &mut MessageKind {
        &mut self.kind
    }

    /// The type tag.
    pub fn message_type(&self) -> MessageType {
        self.kind.message_type()
    }

    /// Keyboard modifiers when the message was created.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Destinations in delivery order.
    pub fn dests(&self) -> &[WidgetId] {
        &self.dests
    }

    /// Append a destination.
    pub fn add_dest(&mut self, widget: WidgetId) {
        self.dests.push(widget);
    }

    /// Append a destination unless it is already present.
    pub fn add_dest_unique(&mut self, widget: WidgetId) {
        if !self.dests.contains(&widget) {
            self.dests.push(widget);
        }
    }

    /// Insert a destination before all others.
    pub fn prepend_dest(&mut self, widget: WidgetId) {
        self.dests.insert(0, widget);
    }

    /// Remove every occurrence of a destination, here and in sub-messages.
    pub fn remove_dest(&mut self, widget: WidgetId) {
        self.dests.retain(|&w| w != widget);
        if let Some(sub) = &mut self.sub_msg {
            sub.remove_dest(widget);
        }
    }

    /// Whether the message or a sub-message is addressed to `widget`.
    pub fn has_dest(&self, widget: WidgetId) -> bool {
        self.dests.contains(&widget) || self.sub_msg.as_ref().is_some_and(|s| s.has_dest(widget))
    }

    /// Whether the message or a sub-message still has a destination.
    pub fn is_addressed(&self) -> bool {
        !self.dests.is_empty() || self.sub_msg.as_ref().is_some_and(|s| s.is_addressed())
    }

    /// Whether dispatch started on this message.
    pub fn is_used(&self) -> bool {
        self.used
    }

    pub(crate) fn set_used(&mut self) {
        self.used = true;
    }

    /// The sub-message, if any.
    pub fn sub_msg(&self) -> Option<&Message> {
        self.sub_msg.as_deref()
    }

    pub(crate) fn sub_msg_mut(&mut self) -> Option<&mut Message> {
        self.sub_msg.as_deref_mut()
    }

    /// Attach a sub-message.
    pub fn set_sub_msg(&mut self, sub: Message) {
        self.sub_msg = Some(Box::new(sub));
    }

    /// Mouse payload, for mouse messages that carry one.
    pub fn mouse(&self) -> Option<&MouseMessage> {
        match &self.kind {
            MessageKind::ButtonPressed(m)
            | MessageKind::ButtonReleased(m)
            | MessageKind::DoubleClick(m)
            | MessageKind::Motion(m)
            | MessageKind::Wheel(m) => Some(m),
            _ => None,
        }
    }

    /// Key payload, for keyboard messages.
    pub fn key(&self) -> Option<&KeyMessage> {
        match &self.kind {
            MessageKind::Char(k) | MessageKind::KeyPressed(k) | MessageKind::KeyReleased(k) => {
                Some(k)
            }
            _ => None,
        }
    }

    /// The signal, for signal messages.
    pub fn signal(&self) -> Option<(Signal, WidgetId)> {
        match self.kind {
            MessageKind::Signal { signal, from } => Some((signal, from)),
            _ => None,
        }
    }

    /// Add `widget` and its descendants, deepest first.
    ///
    /// Every child subtree is added before its parent, so leaves see the
    /// message before the containers that hold them.
    pub fn broadcast_to_children(&mut self, tree: &WidgetTree, widget: WidgetId) {
        for id in tree.postorder(widget) {
            self.add_dest(id);
        }
    }

    /// Add `widget` and its ancestors, innermost first, stopping before
    /// the first manager.
    pub fn broadcast_to_parents(&mut self, tree: &WidgetTree, widget: WidgetId) {
        for id in tree.chain(widget) {
            if tree.get(id).is_some_and(|n| n.kind() == WidgetKind::Manager) {
                break;
            }
            self.add_dest(id);
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("kind", &self.kind)
            .field("dests", &self.dests)
            .field("used", &self.used)
            .field("sub_msg", &self.sub_msg)
            .finish()
    }
}
