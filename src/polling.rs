//! Adaptive refresh cadence for analyses in flight.
//!
//! Cadence rules: the analyses list refetches every 5 s while at least one
//! item is pending; a single analysis refetches every 1 s while pending.
//! Settled entities schedule nothing. Deadlines are explicit values owned by
//! the schedule; dropping or clearing the schedule cancels them, so nothing
//! fires after the consuming view is gone.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::model::{Analysis, Status};
use crate::store::DataKey;

/// List cadence while any item is pending.
pub const LIST_POLL_INTERVAL: Duration = Duration::from_millis(5000);
/// Detail cadence while the analysis is pending.
pub const DETAIL_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Interval for the analyses list, derived from the last fetched value.
/// `None` disables polling until something invalidates the list manually.
pub fn list_poll_interval(analyses: &[Analysis]) -> Option<Duration> {
    analyses
        .iter()
        .any(|analysis| analysis.status == Status::Pending)
        .then_some(LIST_POLL_INTERVAL)
}

/// Interval for a single analysis, derived from its last observed status.
pub fn detail_poll_interval(analysis: &Analysis) -> Option<Duration> {
    (analysis.status == Status::Pending).then_some(DETAIL_POLL_INTERVAL)
}

/// Deadline book for keys that currently poll.
///
/// The schedule never fires callbacks itself; the orchestrating layer asks
/// which keys are due and performs the refetches, so cancellation is just
/// removal from the book.
#[derive(Debug, Default)]
pub struct PollSchedule {
    deadlines: HashMap<DataKey, Instant>,
}

impl PollSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-arm or disarm a key after a fetch completes. Passing `None`
    /// removes any pending deadline (the entity settled).
    pub fn arm(&mut self, key: DataKey, interval: Option<Duration>, now: Instant) {
        match interval {
            Some(interval) => {
                self.deadlines.insert(key, now + interval);
            }
            None => {
                self.deadlines.remove(&key);
            }
        }
    }

    /// Cancel one key's deadline, e.g. when its view unmounts.
    pub fn cancel(&mut self, key: DataKey) {
        self.deadlines.remove(&key);
    }

    /// Cancel everything (navigation away, shutdown).
    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    /// Keys whose deadline has passed. Due keys are removed; completing their
    /// refetch re-arms them from the freshly observed status.
    pub fn take_due(&mut self, now: Instant) -> Vec<DataKey> {
        let due: Vec<DataKey> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| *key)
            .collect();
        for key in &due {
            self.deadlines.remove(key);
        }
        due
    }

    /// Earliest pending deadline, for scheduling the next repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    pub fn is_armed(&self, key: DataKey) -> bool {
        self.deadlines.contains_key(&key)
    }
}
