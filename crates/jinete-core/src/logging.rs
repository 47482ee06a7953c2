//! Logging facilities for Jinete.
//!
//! Jinete uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the embedding application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("jinete::dispatch=trace,jinete::manager=debug")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Manager loop: pumping, window stack, focus and capture changes.
    pub const MANAGER: &str = "jinete::manager";
    /// Message enqueue and delivery.
    pub const DISPATCH: &str = "jinete::dispatch";
    /// Timer table.
    pub const TIMER: &str = "jinete::timer";
    /// Widget creation and destruction.
    pub const WIDGET: &str = "jinete::widget";
    /// Request-size / set-position passes.
    pub const LAYOUT: &str = "jinete::layout";
    /// Dirty regions and draw messages.
    pub const REDRAW: &str = "jinete::redraw";
    /// Background jobs.
    pub const JOB: &str = "jinete::job";
}

/// Span names used by the manager loop.
pub mod span_names {
    /// One pump iteration.
    pub const PUMP: &str = "jinete::pump";
    /// Draining the message queue.
    pub const DISPATCH: &str = "jinete::dispatch_messages";
    /// A nested modal loop.
    pub const MODAL: &str = "jinete::modal";
}
