//! Per-day form values

use super::Day;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opening and closing time for one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hours {
    pub open: Option<String>,
    pub close: Option<String>,
}

impl Hours {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: Some(open.into()),
            close: Some(close.into()),
        }
    }
}

/// A break inside the opening hours
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakTime {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl BreakTime {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            kind: None,
        }
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        [&self.start, &self.end, &self.kind]
            .iter()
            .all(|field| field.as_deref().map_or(true, str::is_empty))
    }
}

/// Form state of a single day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DayState {
    pub is_open: bool,
    pub hours: Hours,
    pub has_break: bool,
    #[serde(rename = "break")]
    pub break_time: BreakTime,
}

impl DayState {
    /// An open day with the given hours and no break
    pub fn open(hours: Hours) -> Self {
        Self {
            is_open: true,
            hours,
            ..Default::default()
        }
    }
}

/// Partial update of a day; only the fields that are set get written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPatch {
    pub is_open: Option<bool>,
    pub hours: Option<Hours>,
    pub has_break: Option<bool>,
    pub break_time: Option<BreakTime>,
}

impl DayPatch {
    pub fn is_open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    pub fn hours(mut self, hours: Hours) -> Self {
        self.hours = Some(hours);
        self
    }

    pub fn has_break(mut self, has_break: bool) -> Self {
        self.has_break = Some(has_break);
        self
    }

    pub fn break_time(mut self, break_time: BreakTime) -> Self {
        self.break_time = Some(break_time);
        self
    }

    pub fn apply_to(self, state: &mut DayState) {
        if let Some(is_open) = self.is_open {
            state.is_open = is_open;
        }
        if let Some(hours) = self.hours {
            state.hours = hours;
        }
        if let Some(has_break) = self.has_break {
            state.has_break = has_break;
        }
        if let Some(break_time) = self.break_time {
            state.break_time = break_time;
        }
    }
}

/// Submitted schedule of one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub is_open: bool,
    pub hours: Option<Hours>,
    #[serde(rename = "break", default, skip_serializing_if = "Option::is_none")]
    pub break_time: Option<BreakTime>,
}

impl From<&DayState> for DaySchedule {
    fn from(state: &DayState) -> Self {
        Self {
            is_open: state.is_open,
            hours: state.is_open.then(|| state.hours.clone()),
            break_time: (state.is_open && state.has_break).then(|| state.break_time.clone()),
        }
    }
}

/// Submitted business hours for the whole week, keyed by day
pub type BusinessHours = BTreeMap<Day, DaySchedule>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_patch_only_writes_set_fields() {
        let mut state = DayState::open(Hours::new("09:00", "17:00"));
        state.break_time = BreakTime::new("12:00", "13:00");

        DayPatch::default().has_break(true).apply_to(&mut state);

        assert!(state.has_break);
        assert_eq!(state.hours, Hours::new("09:00", "17:00"));
        assert_eq!(state.break_time, BreakTime::new("12:00", "13:00"));
    }

    #[test]
    fn test_break_is_empty() {
        assert!(BreakTime::default().is_empty());
        assert!(BreakTime::new("", "").is_empty());
        assert!(!BreakTime::new("12:00", "").is_empty());
    }

    #[test]
    fn test_day_state_field_names() {
        let state: DayState = serde_json::from_str(
            r#"{"isOpen": true, "hours": {"open": "08:00", "close": null},
                "hasBreak": true, "break": {"start": "12:00", "end": "12:30", "type": "lunch"}}"#,
        )
        .unwrap();

        assert!(state.is_open);
        assert_eq!(state.hours.open.as_deref(), Some("08:00"));
        assert_eq!(state.hours.close, None);
        assert_eq!(state.break_time.kind.as_deref(), Some("lunch"));
    }

    #[test]
    fn test_schedule_of_closed_day_has_no_hours() {
        let mut state = DayState::default();
        state.hours = Hours::new("09:00", "17:00");
        state.has_break = true;

        let schedule = DaySchedule::from(&state);
        assert_eq!(schedule.hours, None);
        assert_eq!(schedule.break_time, None);
    }

    #[test]
    fn test_business_hours_json_shape() {
        let mut week = crate::week::WeekSnapshot::default();
        week.monday = DayState::open(Hours::new("09:00", "17:00"));

        let json = serde_json::to_value(week.business_hours()).unwrap();
        assert_eq!(
            json["monday"],
            serde_json::json!({"isOpen": true, "hours": {"open": "09:00", "close": "17:00"}})
        );
        assert_eq!(json["sunday"], serde_json::json!({"isOpen": false, "hours": null}));
    }
}
