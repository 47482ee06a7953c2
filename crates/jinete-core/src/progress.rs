//! Progress reporting for background jobs.
//!
//! A worker thread never touches widgets. It writes into a
//! [`ProgressReporter`]; the UI thread polls the same reporter from a timer
//! and turns changes into messages.
//!
//! # Example
//!
//! ```
//! use jinete_core::progress::ProgressReporter;
//!
//! let reporter = ProgressReporter::new();
//!
//! let worker = std::thread::spawn({
//!     let reporter = reporter.clone();
//!     move || {
//!         for i in 0..=4 {
//!             reporter.set_progress(i as f32 / 4.0);
//!         }
//!         reporter.finish();
//!     }
//! });
//! worker.join().unwrap();
//!
//! let update = reporter.take_update().unwrap();
//! assert_eq!(update.progress, 1.0);
//! assert!(reporter.is_finished());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::Mutex;

/// A progress snapshot: progress value plus optional status message.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Progress value from 0.0 to 1.0.
    pub progress: f32,
    /// Optional status message describing the current operation.
    pub message: Option<String>,
}

impl ProgressUpdate {
    /// Create an update without message.
    pub fn new(progress: f32) -> Self {
        Self {
            progress,
            message: None,
        }
    }

    /// Create an update with a message.
    pub fn with_message(progress: f32, message: impl Into<String>) -> Self {
        Self {
            progress,
            message: Some(message.into()),
        }
    }
}

struct ProgressReporterInner {
    /// Progress stored as f32 bits for atomic access.
    progress_bits: AtomicU32,
    message: Mutex<Option<String>>,
    /// Set on every write, cleared by `take_update`.
    changed: AtomicBool,
    finished: AtomicBool,
    cancel_requested: AtomicBool,
}

impl ProgressReporterInner {
    fn new() -> Self {
        Self {
            progress_bits: AtomicU32::new(0.0_f32.to_bits()),
            message: Mutex::new(None),
            changed: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            cancel_requested: AtomicBool::new(false),
        }
    }

    fn progress(&self) -> f32 {
        f32::from_bits(self.progress_bits.load(Ordering::Acquire))
    }

    fn store_progress(&self, progress: f32) -> bool {
        let clamped = progress.clamp(0.0, 1.0);
        let old = f32::from_bits(self.progress_bits.swap(clamped.to_bits(), Ordering::AcqRel));
        (clamped - old).abs() > f32::EPSILON
    }
}

/// A thread-safe progress channel between a worker thread and the UI thread.
///
/// `ProgressReporter` is cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct ProgressReporter {
    inner: Arc<ProgressReporterInner>,
}

impl ProgressReporter {
    /// Create a reporter at progress 0.0 with no message.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ProgressReporterInner::new()),
        }
    }

    /// Current progress value (0.0 to 1.0).
    pub fn progress(&self) -> f32 {
        self.inner.progress()
    }

    /// Set the progress value, clamped to 0.0..=1.0.
    pub fn set_progress(&self, progress: f32) {
        if self.inner.store_progress(progress) {
            self.inner.changed.store(true, Ordering::Release);
        }
    }

    /// Current status message.
    pub fn message(&self) -> Option<String> {
        self.inner.message.lock().clone()
    }

    /// Set the status message.
    pub fn set_message(&self, message: impl Into<String>) {
        *self.inner.message.lock() = Some(message.into());
        self.inner.changed.store(true, Ordering::Release);
    }

    /// Update progress and message together.
    pub fn update(&self, progress: f32, message: impl Into<String>) {
        let mut guard = self.inner.message.lock();
        self.inner.store_progress(progress);
        *guard = Some(message.into());
        self.inner.changed.store(true, Ordering::Release);
    }

    /// Take the latest snapshot if anything changed since the previous call.
    pub fn take_update(&self) -> Option<ProgressUpdate> {
        if !self.inner.changed.swap(false, Ordering::AcqRel) {
            return None;
        }
        let guard = self.inner.message.lock();
        Some(ProgressUpdate {
            progress: self.inner.progress(),
            message: guard.clone(),
        })
    }

    /// Mark the job as complete. Progress is forced to 1.0.
    pub fn finish(&self) {
        self.set_progress(1.0);
        self.inner.finished.store(true, Ordering::Release);
    }

    /// Whether the job reported completion.
    pub fn is_finished(&self) -> bool {
        self.inner.finished.load(Ordering::Acquire)
    }

    /// Ask the worker to stop at its next checkpoint.
    pub fn request_cancel(&self) {
        self.inner.cancel_requested.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancel_requested(&self) -> bool {
        self.inner.cancel_requested.load(Ordering::Acquire)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("progress", &self.progress())
            .field("message", &self.message())
            .field("finished", &self.is_finished())
            .finish()
    }
}

static_assertions::assert_impl_all!(ProgressReporter: Send, Sync);
