//! Background jobs.
//!
//! A [`Job`] runs a closure on a dedicated worker thread. The worker only
//! sees a [`ProgressReporter`]; it never touches widgets. On the UI thread
//! a monitor hook attached to the owner widget polls the reporter from a
//! timer and emits [`Signal::JobProgress`] when something changed and
//! [`Signal::JobFinished`] once the worker is done.
//!
//! # Example
//!
//! ```
//! use jinete::prelude::*;
//! use jinete::job::Job;
//!
//! let clock = ManualClock::new();
//! let mut ui = Ui::new(UiConfig::new().with_job_poll_ticks(10)).with_clock(clock.clone());
//! let owner = ui.new_widget(WidgetKind::Widget).unwrap();
//!
//! let job = Job::spawn(&mut ui, owner, |reporter| {
//!     reporter.update(0.5, "halfway");
//! })
//! .unwrap();
//! assert!(job.join());
//!
//! clock.advance(10);
//! ui.pump();
//! assert!(!ui.has_job(owner));
//! ```

use std::thread::{self, JoinHandle};

use jinete_core::{ProgressReporter, ProgressUpdate, Result, TimerId, UiError};

use crate::Ui;
use crate::logging::targets;
use crate::message::{Message, MessageKind, Signal};
use crate::widget::{Hook, HookId, HookResult, HookTag, WidgetId};

/// A closure running on a worker thread.
pub struct Job {
    owner: WidgetId,
    reporter: ProgressReporter,
    handle: Option<JoinHandle<()>>,
}

impl Job {
    /// Start `work` on a new thread, monitored by `owner`.
    ///
    /// `owner` receives [`Signal::JobProgress`] and [`Signal::JobFinished`].
    pub fn spawn<F>(ui: &mut Ui, owner: WidgetId, work: F) -> Result<Self>
    where
        F: FnOnce(&ProgressReporter) + Send + 'static,
    {
        if !ui.is_alive(owner) {
            return Err(UiError::InvalidWidget);
        }
        let reporter = ProgressReporter::new();
        let handle = thread::Builder::new()
            .name("jinete-job".to_owned())
            .spawn({
                let reporter = reporter.clone();
                move || {
                    work(&reporter);
                    reporter.finish();
                }
            })
            .map_err(|err| UiError::JobSpawn(err.to_string()))?;

        // The worker may already be done; the monitor notices on its first poll.
        if let Err(err) = JobMonitor::attach(ui, owner, reporter.clone()) {
            reporter.request_cancel();
            return Err(err);
        }

        tracing::debug!(target: targets::JOB, ?owner, "job started");
        Ok(Self {
            owner,
            reporter,
            handle: Some(handle),
        })
    }

    /// The widget monitoring the job.
    pub fn owner(&self) -> WidgetId {
        self.owner
    }

    /// The reporter shared with the worker.
    pub fn reporter(&self) -> &ProgressReporter {
        &self.reporter
    }

    /// Latest progress value.
    pub fn progress(&self) -> f32 {
        self.reporter.progress()
    }

    /// Whether the worker returned.
    pub fn is_finished(&self) -> bool {
        self.reporter.is_finished()
    }

    /// Ask the worker to stop; it checks
    /// [`ProgressReporter::is_cancel_requested`] at its own pace.
    pub fn cancel(&self) {
        self.reporter.request_cancel();
    }

    /// Wait for the worker. Returns `false` if it panicked.
    pub fn join(mut self) -> bool {
        match self.handle.take() {
            Some(handle) => handle.join().is_ok(),
            None => true,
        }
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("owner", &self.owner)
            .field("progress", &self.reporter.progress())
            .field("finished", &self.reporter.is_finished())
            .finish()
    }
}

/// Polls a job's reporter on the UI thread.
pub struct JobMonitor {
    id: HookId,
    reporter: ProgressReporter,
    timer: TimerId,
    last: Option<ProgressUpdate>,
}

impl JobMonitor {
    /// Tag of the monitor hook.
    pub const TAG: &'static str = "job-monitor";

    fn attach(ui: &mut Ui, owner: WidgetId, reporter: ProgressReporter) -> Result<()> {
        let timer = ui.add_timer(owner, ui.config().job_poll_ticks())?;
        let id = ui.reserve_hook_id();
        let attached = ui
            .insert_hook(owner, id, HookTag::Named(Self::TAG), Self::new(id, reporter, timer))
            .and_then(|()| ui.start_timer(timer));
        if attached.is_err() {
            let _ = ui.remove_hook(owner, id);
            let _ = ui.remove_timer(timer);
        }
        attached
    }

    fn new(id: HookId, reporter: ProgressReporter, timer: TimerId) -> Self {
        Self {
            id,
            reporter,
            timer,
            last: None,
        }
    }

    /// The last update seen by the UI thread.
    pub fn last_update(&self) -> Option<&ProgressUpdate> {
        self.last.as_ref()
    }
}

impl Hook for JobMonitor {
    fn on_message(&mut self, ui: &mut Ui, widget: WidgetId, msg: &mut Message) -> HookResult {
        match msg.kind() {
            MessageKind::Timer { timer, .. } if *timer == self.timer => {
                if let Some(update) = self.reporter.take_update() {
                    tracing::trace!(target: targets::JOB, ?widget, progress = update.progress, "job progress");
                    self.last = Some(update);
                    ui.emit_signal(widget, Signal::JobProgress);
                }
                if self.reporter.is_finished() {
                    ui.remove_timer(self.timer)?;
                    ui.remove_hook(widget, self.id)?;
                    tracing::debug!(target: targets::JOB, ?widget, "job finished");
                    ui.emit_signal(widget, Signal::JobFinished);
                }
                Ok(true)
            }
            MessageKind::Destroy => {
                self.reporter.request_cancel();
                Ok(false)
            }
            _ => Ok(false),
        }
    }
}

impl Ui {
    /// Whether any job monitor is still attached to `widget`.
    pub fn has_job(&self, widget: WidgetId) -> bool {
        self.tree
            .get(widget)
            .is_some_and(|node| node.has_hook(HookTag::Named(JobMonitor::TAG)))
    }
}
