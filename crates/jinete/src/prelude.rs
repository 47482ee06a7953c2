//! Prelude module for Jinete.
//!
//! Re-exports the types most programs touch:
//!
//! ```
//! use jinete::prelude::*;
//! ```
//!
//! This provides access to:
//! - The context (`Ui`, `UiConfig`)
//! - Widgets and hooks (`WidgetId`, `WidgetKind`, `Hook`, `HookTag`)
//! - Messages (`Message`, `MessageKind`, `MessageType`, `Signal`)
//! - Windows, layout and the built-in widget hooks
//! - Geometry and clocks from `jinete-core`

// ============================================================================
// Context
// ============================================================================

pub use crate::config::UiConfig;
pub use crate::manager::{CloseReason, DispatchStats, ModalPoll, Ui, WindowOptions};

// ============================================================================
// Widgets and Hooks
// ============================================================================

pub use crate::widget::{
    Align, FnHook, Hook, HookError, HookId, HookResult, HookTag, WidgetFlags, WidgetId,
    WidgetKind,
};
pub use crate::widgets::{ButtonHook, TooltipHook, WindowHook};

// ============================================================================
// Messages and Input
// ============================================================================

pub use crate::input::{KeyCode, KeyboardModifiers, MouseButtons};
pub use crate::message::{KeyMessage, Message, MessageKind, MessageType, MouseMessage, Signal};

// ============================================================================
// Layout and Jobs
// ============================================================================

pub use crate::job::Job;
pub use crate::layout::{BoxHook, CellOptions, GridCell, GridHook, Orientation};

// ============================================================================
// Core Types
// ============================================================================

pub use jinete_core::{
    Borders, Clock, ManualClock, Point, Rect, Region, Size, TimerId, UiError,
};
