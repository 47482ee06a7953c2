//! Core systems for Jinete.
//!
//! This crate provides the backend-free foundations of the Jinete GUI core:
//!
//! - **Geometry**: half-open [`Rect`]s and banded [`Region`]s used for
//!   dirty tracking and clipping
//! - **Errors**: the [`UiError`] taxonomy shared by every layer
//! - **Clock**: monotonic tick sources driving the manager loop
//! - **Timers**: a tick-based timer table that coalesces missed intervals
//! - **Progress**: a thread-safe progress channel for background jobs
//! - **Logging**: `tracing` target names for filtering
//!
//! # Region Example
//!
//! ```
//! use jinete_core::{Rect, Region};
//!
//! let a = Region::from_rect(Rect::new(0, 0, 10, 10));
//! let b = Region::from_rect(Rect::new(5, 5, 15, 15));
//!
//! assert_eq!(a.union(&b), b.union(&a));
//! assert!(a.subtract(&a).is_empty());
//! assert_eq!(a.intersect(&b).rects(), &[Rect::new(5, 5, 10, 10)]);
//! ```

pub mod clock;
mod error;
pub mod geometry;
pub mod logging;
pub mod progress;
pub mod timer;

pub use clock::{Clock, ManualClock, SteadyClock};
pub use error::{Result, UiError};
pub use geometry::{Borders, Point, Rect, RectIn, Region, Size};
pub use progress::{ProgressReporter, ProgressUpdate};
pub use timer::{TimerFire, TimerId, TimerTable};
