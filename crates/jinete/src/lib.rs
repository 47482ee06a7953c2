//! Jinete: a retained-mode GUI toolkit core.
//!
//! This crate provides the backend-free heart of a widget toolkit:
//!
//! - **Widgets**: a generation-checked arena of widgets with parent/child
//!   links, state flags and runtime-attached [`Hook`](widget::Hook)s
//! - **Messages**: a FIFO queue of typed messages with destination lists,
//!   filters and sub-messages
//! - **Manager loop**: input diffing, focus/mouse/capture tracking, a window
//!   stack with modal loops, timers and idle messages
//! - **Redraw**: per-widget dirty regions clipped to what is visible, and
//!   scrolling with pixel blits
//! - **Layout**: the request-size / set-position protocol and box layouts
//! - **Jobs**: worker threads reporting progress back to the UI thread
//!
//! Platform input and pixels stay outside: the [`Ui`] polls an
//! [`InputSource`](input::InputSource) and paints through a
//! [`DrawSurface`](draw::DrawSurface).
//!
//! # Example
//!
//! ```
//! use jinete::prelude::*;
//!
//! let mut ui = Ui::new(UiConfig::new().with_screen_size(320, 200));
//! ui.new_manager().unwrap();
//!
//! let window = ui.new_window("Greeting").unwrap();
//! let button = ui.new_button("Close").unwrap();
//! ui.add_child(window, button).unwrap();
//! ui.open_window(window).unwrap();
//!
//! ui.pump();
//! assert_eq!(ui.focus(), Some(button));
//!
//! ui.close_window(window, Some(button)).unwrap();
//! assert_eq!(ui.window_killer(window), Some(button));
//! ```

pub mod config;
pub mod draw;
pub mod input;
pub mod job;
pub mod layout;
pub mod logging;
pub mod manager;
pub mod message;
pub mod prelude;
pub mod widget;
pub mod widgets;

pub use config::UiConfig;
pub use manager::{DispatchStats, Ui};

pub use jinete_core::{
    Borders, Clock, ManualClock, Point, ProgressReporter, ProgressUpdate, Rect, RectIn, Region,
    Result, Size, SteadyClock, TimerId, UiError,
};

static_assertions::assert_not_impl_any!(Ui: Send, Sync);
static_assertions::assert_impl_all!(widget::WidgetId: Send, Sync, Copy);
