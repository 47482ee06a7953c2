//! Error types for Jinete.

use thiserror::Error;

/// The main error type for Jinete operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The widget handle is stale or was never valid.
    #[error("invalid or destroyed widget")]
    InvalidWidget,

    /// The widget table reached its configured capacity.
    #[error("widget table exhausted (limit {limit})")]
    OutOfMemory {
        /// The configured slot limit.
        limit: usize,
    },

    /// The timer ID is invalid or has already been removed.
    #[error("invalid or removed timer")]
    InvalidTimer,

    /// Attempted to make a widget its own ancestor.
    #[error("cannot add a widget to itself or to one of its descendants")]
    CircularParentage,

    /// The operation requires a window widget.
    #[error("widget is not a window")]
    NotAWindow,

    /// The window is already open in a manager.
    #[error("window is already open")]
    AlreadyOpen,

    /// The window is not open.
    #[error("window is not open")]
    NotOpen,

    /// The operation requires a grid container.
    #[error("widget is not a grid")]
    NotAGrid,

    /// A background job thread could not be started.
    #[error("cannot start background job: {0}")]
    JobSpawn(String),
}

/// A specialized Result type for Jinete operations.
pub type Result<T> = std::result::Result<T, UiError>;
