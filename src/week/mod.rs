//! Week model - days, per-day form state and whole-week snapshots

mod models;

pub use models::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

/// A day of the week, ordered by week position (Sunday first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All days in week order
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Week position, Sunday = 0
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase identifier used as the form key
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Sunday => "sunday",
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
        }
    }

    /// Display name with the first letter capitalized
    pub fn label(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// True when `next` immediately follows this day in the week
    pub fn precedes(self, next: Day) -> bool {
        next.index() == self.index() + 1
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a weekday name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown day of week: {0:?}")]
pub struct ParseDayError(pub String);

impl FromStr for Day {
    type Err = ParseDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == lower)
            .ok_or_else(|| ParseDayError(s.to_string()))
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Day::Sunday,
            chrono::Weekday::Mon => Day::Monday,
            chrono::Weekday::Tue => Day::Tuesday,
            chrono::Weekday::Wed => Day::Wednesday,
            chrono::Weekday::Thu => Day::Thursday,
            chrono::Weekday::Fri => Day::Friday,
            chrono::Weekday::Sat => Day::Saturday,
        }
    }
}

/// Full state of the form for one week, one entry per day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekSnapshot {
    pub sunday: DayState,
    pub monday: DayState,
    pub tuesday: DayState,
    pub wednesday: DayState,
    pub thursday: DayState,
    pub friday: DayState,
    pub saturday: DayState,
}

impl WeekSnapshot {
    /// Iterate days with their state in week order
    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayState)> {
        Day::ALL.into_iter().map(move |day| (day, &self[day]))
    }

    /// Days marked open, in week order
    pub fn open_days(&self) -> Vec<Day> {
        self.iter()
            .filter(|(_, state)| state.is_open)
            .map(|(day, _)| day)
            .collect()
    }

    /// Every day from the first open day to the last, closed days included.
    ///
    /// Empty unless at least two days are open.
    pub fn open_span(&self) -> Vec<Day> {
        let open = self.open_days();
        if open.len() < 2 {
            return Vec::new();
        }

        let first = open[0].index();
        let last = open[open.len() - 1].index();
        Day::ALL[first..=last].to_vec()
    }

    /// Value submitted when the form is saved
    pub fn business_hours(&self) -> BusinessHours {
        self.iter()
            .map(|(day, state)| (day, DaySchedule::from(state)))
            .collect()
    }
}

impl Index<Day> for WeekSnapshot {
    type Output = DayState;

    fn index(&self, day: Day) -> &DayState {
        match day {
            Day::Sunday => &self.sunday,
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
        }
    }
}

impl IndexMut<Day> for WeekSnapshot {
    fn index_mut(&mut self, day: Day) -> &mut DayState {
        match day {
            Day::Sunday => &mut self.sunday,
            Day::Monday => &mut self.monday,
            Day::Tuesday => &mut self.tuesday,
            Day::Wednesday => &mut self.wednesday,
            Day::Thursday => &mut self.thursday,
            Day::Friday => &mut self.friday,
            Day::Saturday => &mut self.saturday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn week_with_open(days: &[Day]) -> WeekSnapshot {
        let mut week = WeekSnapshot::default();
        for &day in days {
            week[day].is_open = true;
        }
        week
    }

    #[test]
    fn test_day_order_and_labels() {
        assert!(Day::Sunday < Day::Saturday);
        assert_eq!(Day::Wednesday.index(), 3);
        assert_eq!(Day::from_index(5), Some(Day::Friday));
        assert_eq!(Day::from_index(7), None);
        assert_eq!(Day::Monday.label(), "Monday");
        assert!(Day::Monday.precedes(Day::Tuesday));
        assert!(!Day::Monday.precedes(Day::Wednesday));
    }

    #[test]
    fn test_parse_day() {
        assert_eq!("monday".parse::<Day>(), Ok(Day::Monday));
        assert_eq!(" Friday ".parse::<Day>(), Ok(Day::Friday));
        assert_eq!(
            "funday".parse::<Day>(),
            Err(ParseDayError("funday".to_string()))
        );
    }

    #[test]
    fn test_from_chrono_weekday() {
        assert_eq!(Day::from(chrono::Weekday::Sun), Day::Sunday);
        assert_eq!(Day::from(chrono::Weekday::Thu), Day::Thursday);
    }

    #[test]
    fn test_open_days_in_week_order() {
        let week = week_with_open(&[Day::Friday, Day::Monday]);
        assert_eq!(week.open_days(), vec![Day::Monday, Day::Friday]);
    }

    #[test]
    fn test_open_span() {
        let week = week_with_open(&[Day::Monday, Day::Thursday]);
        assert_eq!(
            week.open_span(),
            vec![Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday]
        );
        assert!(week_with_open(&[Day::Monday]).open_span().is_empty());
    }

    #[test]
    fn test_snapshot_missing_days_default_closed() {
        let week: WeekSnapshot =
            serde_json::from_str(r#"{"monday": {"isOpen": true}}"#).unwrap();
        assert!(week.monday.is_open);
        assert!(!week.sunday.is_open);
        assert_eq!(week.monday.hours, Hours::default());
    }
}
