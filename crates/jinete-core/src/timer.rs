//! Tick-based timer table.
//!
//! Timers are owned by some handle type `O` (the widget id in the `jinete`
//! crate). A running timer accumulates ticks; each [`TimerTable::poll`]
//! reports at most one [`TimerFire`] per timer, carrying how many whole
//! intervals elapsed since the previous fire, so a stalled loop sees one
//! coalesced fire instead of a burst.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, UiError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

#[derive(Debug)]
struct TimerData<O> {
    owner: O,
    interval: u64,
    /// Tick of the last fire or start; `None` while stopped.
    last_time: Option<u64>,
}

/// One coalesced timer expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire<O> {
    /// The timer that expired.
    pub id: TimerId,
    /// The timer's owner.
    pub owner: O,
    /// Number of whole intervals elapsed since the previous fire.
    pub count: u32,
}

/// All registered timers.
pub struct TimerTable<O> {
    timers: SlotMap<TimerId, TimerData<O>>,
}

impl<O: Copy + PartialEq + fmt::Debug> TimerTable<O> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
        }
    }

    /// Register a stopped timer. Intervals below one tick are raised to one.
    pub fn add(&mut self, owner: O, interval: u64) -> TimerId {
        let id = self.timers.insert(TimerData {
            owner,
            interval: interval.max(1),
            last_time: None,
        });
        tracing::trace!(target: targets::TIMER, ?id, ?owner, interval, "timer added");
        id
    }

    /// Start (or restart) a timer counting from `now`.
    pub fn start(&mut self, id: TimerId, now: u64) -> Result<()> {
        let timer = self.timers.get_mut(id).ok_or(UiError::InvalidTimer)?;
        timer.last_time = Some(now);
        Ok(())
    }

    /// Stop a timer without removing it.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        let timer = self.timers.get_mut(id).ok_or(UiError::InvalidTimer)?;
        timer.last_time = None;
        Ok(())
    }

    /// Remove a timer, returning its owner.
    pub fn remove(&mut self, id: TimerId) -> Result<O> {
        let timer = self.timers.remove(id).ok_or(UiError::InvalidTimer)?;
        tracing::trace!(target: targets::TIMER, ?id, "timer removed");
        Ok(timer.owner)
    }

    /// Remove every timer owned by `owner`, returning their ids.
    pub fn remove_owned_by(&mut self, owner: O) -> Vec<TimerId> {
        let ids: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, t)| t.owner == owner)
            .map(|(id, _)| id)
            .collect();
        for &id in &ids {
            self.timers.remove(id);
        }
        ids
    }

    /// Whether the timer exists.
    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Whether the timer exists and is running.
    pub fn is_running(&self, id: TimerId) -> bool {
        self.timers.get(id).is_some_and(|t| t.last_time.is_some())
    }

    /// The timer's interval in ticks.
    pub fn interval(&self, id: TimerId) -> Option<u64> {
        self.timers.get(id).map(|t| t.interval)
    }

    /// Change the interval of an existing timer.
    pub fn set_interval(&mut self, id: TimerId, interval: u64) -> Result<()> {
        let timer = self.timers.get_mut(id).ok_or(UiError::InvalidTimer)?;
        timer.interval = interval.max(1);
        Ok(())
    }

    /// The timer's owner.
    pub fn owner(&self, id: TimerId) -> Option<O> {
        self.timers.get(id).map(|t| t.owner)
    }

    /// Number of registered timers (running or not).
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are registered.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Collect the timers that expired at tick `now`.
    pub fn poll(&mut self, now: u64) -> Vec<TimerFire<O>> {
        let mut fires = Vec::new();
        for (id, timer) in self.timers.iter_mut() {
            let Some(last) = timer.last_time else {
                continue;
            };
            let elapsed = now.saturating_sub(last);
            if elapsed < timer.interval {
                continue;
            }
            let count = elapsed / timer.interval;
            timer.last_time = Some(last + count * timer.interval);
            tracing::trace!(target: targets::TIMER, ?id, count, "timer fired");
            fires.push(TimerFire {
                id,
                owner: timer.owner,
                count: u32::try_from(count).unwrap_or(u32::MAX),
            });
        }
        fires
    }
}

impl<O: Copy + PartialEq + fmt::Debug> Default for TimerTable<O> {
    fn default() -> Self {
        Self::new()
    }
}
