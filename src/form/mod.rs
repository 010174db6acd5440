//! Form collaborator - holds per-day state and reports changes

mod edit;

pub use edit::FormEdit;

use crate::week::{BreakTime, BusinessHours, Day, DayPatch, DayState, Hours, WeekSnapshot};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Whether a patch should produce a change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Send the new snapshot to listeners
    Notify,
    /// Write the value without notifying, used by the engine itself
    Silent,
}

/// The side of the form the range engine talks to
pub trait FormControl {
    /// Current state of one day
    fn day(&self, day: Day) -> DayState;

    /// Write a partial day state
    fn patch_day(&mut self, day: Day, patch: DayPatch, emit: Emit);
}

/// In-memory form shared between the editing side and the engine
#[derive(Clone, Debug)]
pub struct FormStore {
    week: Arc<RwLock<WeekSnapshot>>,
    changes: mpsc::UnboundedSender<WeekSnapshot>,
}

impl FormStore {
    /// Create an empty form and the stream of its change notifications
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WeekSnapshot>) {
        Self::with_week(WeekSnapshot::default())
    }

    /// Create a form pre-filled with a week
    pub fn with_week(week: WeekSnapshot) -> (Self, mpsc::UnboundedReceiver<WeekSnapshot>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Self {
            week: Arc::new(RwLock::new(week)),
            changes: tx,
        };
        (store, rx)
    }

    /// Copy of the whole week
    pub fn snapshot(&self) -> WeekSnapshot {
        self.week
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Raw form value as submitted
    pub fn business_hours(&self) -> BusinessHours {
        self.snapshot().business_hours()
    }

    pub fn set_open(&mut self, day: Day, is_open: bool) {
        self.patch_day(day, DayPatch::default().is_open(is_open), Emit::Notify);
    }

    pub fn set_hours(&mut self, day: Day, hours: Hours) {
        self.patch_day(day, DayPatch::default().hours(hours), Emit::Notify);
    }

    pub fn set_break(&mut self, day: Day, break_time: BreakTime) {
        self.patch_day(day, DayPatch::default().break_time(break_time), Emit::Notify);
    }

    /// Apply a user edit that targets a single day.
    ///
    /// Returns false for edits that are not about a single day.
    pub fn apply_edit(&mut self, edit: &FormEdit) -> bool {
        match edit {
            FormEdit::Open { day } => self.set_open(*day, true),
            FormEdit::Close { day } => self.set_open(*day, false),
            FormEdit::Hours { day, open, close } => {
                self.set_hours(*day, Hours::new(open.as_str(), close.as_str()))
            }
            FormEdit::Break { day, start, end } => {
                self.set_break(*day, BreakTime::new(start.as_str(), end.as_str()))
            }
            FormEdit::ToggleBreak { .. } => return false,
        }
        true
    }
}

impl FormControl for FormStore {
    fn day(&self, day: Day) -> DayState {
        self.week.read().unwrap_or_else(PoisonError::into_inner)[day].clone()
    }

    fn patch_day(&mut self, day: Day, patch: DayPatch, emit: Emit) {
        let snapshot = {
            let mut week = self.week.write().unwrap_or_else(PoisonError::into_inner);
            patch.apply_to(&mut week[day]);
            week.clone()
        };

        if emit == Emit::Notify {
            debug!("Form changed on {}", day);
            if self.changes.send(snapshot).is_err() {
                warn!("No listener for form changes, dropping update for {}", day);
            }
        }
    }
}

/// A bare week is its own form; patches never notify anyone
impl FormControl for WeekSnapshot {
    fn day(&self, day: Day) -> DayState {
        self[day].clone()
    }

    fn patch_day(&mut self, day: Day, patch: DayPatch, _emit: Emit) {
        patch.apply_to(&mut self[day]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::error::TryRecvError;

    #[test]
    fn test_notify_sends_snapshot() {
        let (mut form, mut rx) = FormStore::new();
        form.set_open(Day::Monday, true);

        let snapshot = rx.try_recv().unwrap();
        assert!(snapshot.monday.is_open);
        assert_eq!(snapshot, form.snapshot());
    }

    #[test]
    fn test_silent_patch_sends_nothing() {
        let (mut form, mut rx) = FormStore::new();
        form.patch_day(
            Day::Tuesday,
            DayPatch::default().hours(Hours::new("10:00", "18:00")),
            Emit::Silent,
        );

        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(form.day(Day::Tuesday).hours, Hours::new("10:00", "18:00"));
    }

    #[test]
    fn test_clones_share_state() {
        let (form, _rx) = FormStore::new();
        let mut other = form.clone();
        other.set_open(Day::Friday, true);
        assert!(form.day(Day::Friday).is_open);
    }

    #[test]
    fn test_apply_edit() {
        let (mut form, mut rx) = FormStore::new();

        assert!(form.apply_edit(&FormEdit::Hours {
            day: Day::Sunday,
            open: "11:00".to_string(),
            close: "15:00".to_string(),
        }));
        assert!(!form.apply_edit(&FormEdit::ToggleBreak {
            selection: 0,
            checked: true,
        }));

        assert_eq!(form.day(Day::Sunday).hours, Hours::new("11:00", "15:00"));
        assert!(rx.try_recv().is_ok());
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_closed_listener_does_not_panic() {
        let (mut form, rx) = FormStore::new();
        drop(rx);
        form.set_open(Day::Monday, true);
        assert!(form.day(Day::Monday).is_open);
    }
}
