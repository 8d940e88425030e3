//! # Interaction Rules
//!
//! Transition rules for a single `(user, event)` record and the counter
//! adjustment each transition implies. The store applies both under one lock.

use crate::models::{AttendanceStatus, InteractionRecord};

/// How an aggregate counter must move after a record changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterDelta {
    Increment,
    Decrement,
    Unchanged,
}

impl CounterDelta {
    /// Applies the delta with a floor of zero.
    pub fn apply(self, counter: &mut u32) {
        match self {
            CounterDelta::Increment => *counter = counter.saturating_add(1),
            CounterDelta::Decrement => *counter = counter.saturating_sub(1),
            CounterDelta::Unchanged => {}
        }
    }
}

impl InteractionRecord {
    /// A fresh record: not liked, no stated attendance.
    pub fn new(user_id: &str, event_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            event_id: event_id.to_string(),
            liked: false,
            status: None,
        }
    }

    /// Flips `liked` and returns the change for the event's `likes` counter.
    pub fn toggle_like(&mut self) -> CounterDelta {
        self.liked = !self.liked;
        if self.liked {
            CounterDelta::Increment
        } else {
            CounterDelta::Decrement
        }
    }

    /// Replaces the attendance status and returns the change for `attending_count`.
    ///
    /// Any status may follow any other; only entering or leaving
    /// `Attending` moves the counter.
    pub fn set_status(&mut self, status: Option<AttendanceStatus>) -> CounterDelta {
        let was_attending = self.status == Some(AttendanceStatus::Attending);
        let is_attending = status == Some(AttendanceStatus::Attending);
        self.status = status;

        match (was_attending, is_attending) {
            (true, false) => CounterDelta::Decrement,
            (false, true) => CounterDelta::Increment,
            _ => CounterDelta::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus::*;

    #[test]
    fn toggle_like_alternates() {
        let mut record = InteractionRecord::new("u1", "e1");
        assert_eq!(record.toggle_like(), CounterDelta::Increment);
        assert!(record.liked);
        assert_eq!(record.toggle_like(), CounterDelta::Decrement);
        assert!(!record.liked);
    }

    #[test]
    fn status_transitions_only_count_attending() {
        let cases = [
            (None, Some(Attending), CounterDelta::Increment),
            (Some(Attending), Some(NotAttending), CounterDelta::Decrement),
            (Some(Attending), None, CounterDelta::Decrement),
            (Some(Attending), Some(Attending), CounterDelta::Unchanged),
            (Some(NotAttending), Some(NotAttending), CounterDelta::Unchanged),
            (None, Some(NotAttending), CounterDelta::Unchanged),
            (Some(NotAttending), None, CounterDelta::Unchanged),
            (Some(NotAttending), Some(Attending), CounterDelta::Increment),
        ];

        for (before, after, expected) in cases {
            let mut record = InteractionRecord::new("u1", "e1");
            record.status = before;
            assert_eq!(record.set_status(after), expected, "{:?} -> {:?}", before, after);
            assert_eq!(record.status, after);
        }
    }

    #[test]
    fn decrement_floors_at_zero() {
        let mut counter = 0;
        CounterDelta::Decrement.apply(&mut counter);
        assert_eq!(counter, 0);

        CounterDelta::Increment.apply(&mut counter);
        CounterDelta::Unchanged.apply(&mut counter);
        assert_eq!(counter, 1);
    }
}
