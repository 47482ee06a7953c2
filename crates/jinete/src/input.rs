//! Input state polled by the manager loop.
//!
//! The manager never talks to a platform directly. Each pump it asks an
//! [`InputSource`] for one [`InputFrame`]: where the mouse is, which buttons
//! are held, the wheel position, the modifier state and the key transitions
//! since the previous frame. The manager diffs consecutive frames to produce
//! motion, button, wheel and key messages.
//!
//! [`ScriptedInput`] drives the loop from tests:
//!
//! ```
//! use jinete::input::{MouseButtons, ScriptedInput};
//!
//! let input = ScriptedInput::new();
//! let script = input.handle();
//!
//! script.move_mouse(10, 10);
//! script.press(MouseButtons::LEFT);
//! script.queue_frame();
//! script.release(MouseButtons::LEFT);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::rc::Rc;

use jinete_core::Point;

/// A key on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Tab.
    Tab,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Space bar.
    Space,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Insert.
    Insert,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Function key F1..F24.
    F(u8),
    /// A key producing a character.
    Character(char),
    /// Any other scancode.
    Unknown(u32),
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Whether any modifier is held.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Set of held mouse buttons.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MouseButtons(u8);

impl MouseButtons {
    /// No buttons.
    pub const NONE: Self = Self(0);
    /// Primary button.
    pub const LEFT: Self = Self(1);
    /// Secondary button.
    pub const RIGHT: Self = Self(2);
    /// Middle button.
    pub const MIDDLE: Self = Self(4);

    /// Raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build a set from raw bits; unknown bits are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b111)
    }

    /// Whether no button is held.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every button of `other` is held.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Add buttons.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Remove buttons.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for MouseButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MouseButtons {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for MouseButtons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::LEFT) {
            names.push("left");
        }
        if self.contains(Self::RIGHT) {
            names.push("right");
        }
        if self.contains(Self::MIDDLE) {
            names.push("middle");
        }
        write!(f, "MouseButtons[{}]", names.join("|"))
    }
}

/// A key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: KeyCode,
    /// Character produced, for printable keys.
    pub ch: Option<char>,
    /// `true` for press, `false` for release.
    pub pressed: bool,
}

impl KeyEvent {
    /// A key press.
    pub fn press(key: KeyCode, ch: Option<char>) -> Self {
        Self {
            key,
            ch,
            pressed: true,
        }
    }

    /// A key release.
    pub fn release(key: KeyCode) -> Self {
        Self {
            key,
            ch: None,
            pressed: false,
        }
    }
}

/// One poll of the input device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputFrame {
    /// Mouse position in screen coordinates.
    pub mouse: Point,
    /// Held buttons.
    pub buttons: MouseButtons,
    /// Absolute wheel position; a change produces a wheel message.
    pub wheel: i32,
    /// Modifier state.
    pub modifiers: KeyboardModifiers,
    /// Key transitions since the previous frame, oldest first.
    pub keys: Vec<KeyEvent>,
}

/// Source of input frames.
pub trait InputSource {
    /// Return the current input state.
    fn poll(&mut self) -> InputFrame;
}

/// An input source where nothing ever happens.
#[derive(Debug, Default)]
pub struct NullInput;

impl InputSource for NullInput {
    fn poll(&mut self) -> InputFrame {
        InputFrame::default()
    }
}

#[derive(Debug, Default)]
struct ScriptState {
    live: InputFrame,
    frames: VecDeque<InputFrame>,
}

/// An input source driven by a [`ScriptHandle`].
///
/// Queued frames are returned one per poll; once the queue is empty every
/// poll returns the live state (with the keys typed since the last poll).
#[derive(Debug, Default)]
pub struct ScriptedInput {
    state: Rc<RefCell<ScriptState>>,
}

impl ScriptedInput {
    /// Create a source with the mouse at the origin and nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that stays usable after the source is moved into the UI.
    pub fn handle(&self) -> ScriptHandle {
        ScriptHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        let mut state = self.state.borrow_mut();
        if let Some(frame) = state.frames.pop_front() {
            return frame;
        }
        let keys = std::mem::take(&mut state.live.keys);
        InputFrame {
            keys,
            ..state.live.clone()
        }
    }
}

/// Mutates the state seen by a [`ScriptedInput`].
#[derive(Debug, Clone)]
pub struct ScriptHandle {
    state: Rc<RefCell<ScriptState>>,
}

impl ScriptHandle {
    /// Move the mouse.
    pub fn move_mouse(&self, x: i32, y: i32) {
        self.state.borrow_mut().live.mouse = Point::new(x, y);
    }

    /// Press buttons.
    pub fn press(&self, buttons: MouseButtons) {
        self.state.borrow_mut().live.buttons.insert(buttons);
    }

    /// Release buttons.
    pub fn release(&self, buttons: MouseButtons) {
        self.state.borrow_mut().live.buttons.remove(buttons);
    }

    /// Turn the wheel by `delta` notches.
    pub fn scroll(&self, delta: i32) {
        self.state.borrow_mut().live.wheel += delta;
    }

    /// Replace the modifier state.
    pub fn set_modifiers(&self, modifiers: KeyboardModifiers) {
        self.state.borrow_mut().live.modifiers = modifiers;
    }

    /// Press a key.
    pub fn key_down(&self, key: KeyCode, ch: Option<char>) {
        self.state
            .borrow_mut()
            .live
            .keys
            .push(KeyEvent::press(key, ch));
    }

    /// Release a key.
    pub fn key_up(&self, key: KeyCode) {
        self.state.borrow_mut().live.keys.push(KeyEvent::release(key));
    }

    /// Press and release a key within one frame.
    pub fn type_key(&self, key: KeyCode, ch: Option<char>) {
        self.key_down(key, ch);
        self.key_up(key);
    }

    /// Snapshot the live state (and pending keys) as the next queued frame.
    pub fn queue_frame(&self) {
        let mut state = self.state.borrow_mut();
        let keys = std::mem::take(&mut state.live.keys);
        let frame = InputFrame {
            keys,
            ..state.live.clone()
        };
        state.frames.push_back(frame);
    }

    /// Number of queued frames not yet polled.
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }
}
