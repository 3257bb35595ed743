//! Quiet-period debounce for rapidly changing text inputs.
//!
//! Each keystroke resets the deadline; the pending value is applied once the
//! input has been quiet for the configured period. The handle lives inside
//! the state that owns the input, so teardown drops the timer with it.

use std::time::{Duration, Instant};

/// Filter inputs settle after 300 ms of quiescence.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(300);

/// A text value plus its debounced, applied counterpart.
#[derive(Clone, Debug)]
pub struct DebouncedText {
    /// What the input widget currently shows; edited every keystroke.
    pub raw: String,
    applied: String,
    deadline: Option<Instant>,
    quiet_period: Duration,
}

impl Default for DebouncedText {
    fn default() -> Self {
        Self::new(FILTER_DEBOUNCE)
    }
}

impl DebouncedText {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            raw: String::new(),
            applied: String::new(),
            deadline: None,
            quiet_period,
        }
    }

    /// The value filters should use right now.
    pub fn applied(&self) -> &str {
        &self.applied
    }

    /// Record an edit, resetting the quiet-period deadline.
    pub fn edit(&mut self, value: String, now: Instant) {
        if value == self.raw {
            return;
        }
        self.raw = value;
        if self.raw == self.applied {
            // Typing back to the applied value needs no settle.
            self.deadline = None;
        } else {
            self.deadline = Some(now + self.quiet_period);
        }
    }

    /// Record that `raw` was mutated in place by an input widget.
    pub fn mark_edited(&mut self, now: Instant) {
        if self.raw == self.applied {
            self.deadline = None;
        } else {
            self.deadline = Some(now + self.quiet_period);
        }
    }

    /// Apply the pending value if the quiet period elapsed. Returns true when
    /// the applied value changed, i.e. filters must re-derive.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                self.applied = self.raw.clone();
                true
            }
            _ => false,
        }
    }

    /// Deadline for scheduling the next wakeup, if an edit is pending.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_only_after_quiet_period() {
        let start = Instant::now();
        let mut input = DebouncedText::default();
        input.edit("shi".into(), start);
        input.edit("ship".into(), start + Duration::from_millis(100));

        assert!(!input.settle(start + Duration::from_millis(350)));
        assert_eq!(input.applied(), "");

        // 300 ms after the *last* keystroke.
        assert!(input.settle(start + Duration::from_millis(400)));
        assert_eq!(input.applied(), "ship");
    }

    #[test]
    fn each_keystroke_resets_the_deadline() {
        let start = Instant::now();
        let mut input = DebouncedText::default();
        input.edit("a".into(), start);
        let first = input.pending_deadline().unwrap();
        input.edit("ab".into(), start + Duration::from_millis(200));
        assert!(input.pending_deadline().unwrap() > first);
    }

    #[test]
    fn settle_is_idempotent_once_applied() {
        let start = Instant::now();
        let mut input = DebouncedText::default();
        input.edit("q".into(), start);
        assert!(input.settle(start + FILTER_DEBOUNCE));
        assert!(!input.settle(start + Duration::from_secs(10)));
    }

    #[test]
    fn reverting_to_applied_value_cancels_the_deadline() {
        let start = Instant::now();
        let mut input = DebouncedText::default();
        input.edit("q".into(), start);
        input.settle(start + FILTER_DEBOUNCE);

        input.edit("qu".into(), start + Duration::from_millis(500));
        input.edit("q".into(), start + Duration::from_millis(600));
        assert_eq!(input.pending_deadline(), None);
        assert!(!input.settle(start + Duration::from_secs(5)));
        assert_eq!(input.applied(), "q");
    }
}
