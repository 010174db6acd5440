//! Range inference - groups contiguous open days into labeled selections
//!
//! Each debounced form snapshot is reduced against the previous
//! [`EngineState`]. Days that opened since the last snapshot form new
//! selections (one per run of consecutive days), days that closed are
//! removed from the selections holding them. Established selections are
//! otherwise left alone, so editing one day never regroups the rest of
//! the week.

use crate::form::{Emit, FormControl};
use crate::week::{BreakTime, Day, DayPatch, WeekSnapshot};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// A block of contiguous open days displayed and edited together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    days: Vec<Day>,
    is_range: bool,
}

impl Selection {
    /// Build a selection from consecutive days in week order
    pub fn new(days: Vec<Day>) -> Self {
        let is_range = days.len() > 1;
        Self { days, is_range }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn is_range(&self) -> bool {
        self.is_range
    }

    pub fn first_day(&self) -> Option<Day> {
        self.days.first().copied()
    }

    pub fn contains(&self, day: Day) -> bool {
        self.days.contains(&day)
    }

    /// Display label, e.g. "Monday" or "Monday to Friday"
    pub fn label(&self) -> String {
        match self.days.as_slice() {
            [] => String::new(),
            [first, .., last] if self.is_range => {
                format!("{} to {}", first.label(), last.label())
            }
            [first, ..] => first.label(),
        }
    }
}

/// Everything the engine remembers between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    selections: Vec<Selection>,
    last_open_days: BTreeSet<Day>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selections, sorted by first day
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Open days as of the last reduced snapshot
    pub fn last_open_days(&self) -> &BTreeSet<Day> {
        &self.last_open_days
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty() && self.last_open_days.is_empty()
    }

    /// Selection holding a day, if any
    pub fn selection_for(&self, day: Day) -> Option<&Selection> {
        self.selections.iter().find(|selection| selection.contains(day))
    }

    pub fn labels(&self) -> Vec<String> {
        self.selections.iter().map(Selection::label).collect()
    }
}

/// Reduce one snapshot into the next engine state.
///
/// Newly grouped days receive the hours and break of their group's first
/// day through silent patches on `form`.
pub fn reduce<F: FormControl>(
    mut state: EngineState,
    snapshot: &WeekSnapshot,
    form: &mut F,
) -> EngineState {
    let selected: BTreeSet<Day> = snapshot.open_days().into_iter().collect();

    if selected.is_empty() {
        if !state.is_empty() {
            debug!("All days closed, clearing selections");
        }
        return EngineState::default();
    }

    let opened: Vec<Day> = selected.difference(&state.last_open_days).copied().collect();
    let closed: BTreeSet<Day> = state.last_open_days.difference(&selected).copied().collect();

    if !closed.is_empty() {
        debug!("Days closed: {:?}", closed);
        state.selections = remove_days(state.selections, &closed);
    }

    if !opened.is_empty() {
        debug!("Days opened: {:?}", opened);
        for group in consecutive_groups(&opened) {
            let overlaps = group
                .iter()
                .any(|&day| state.selections.iter().any(|s| s.contains(day)));
            if overlaps {
                // Left as is: the group is dropped rather than merged
                warn!("Skipping group {:?}, already part of a selection", group);
                continue;
            }

            propagate_range_hours(&group, snapshot, form);
            state.selections.push(Selection::new(group));
        }
    }

    state.last_open_days = selected;
    state.selections.sort_by_key(Selection::first_day);

    debug!("Selections: {:?}", state.labels());
    state
}

/// Split days into maximal runs of consecutive week positions
pub fn consecutive_groups(days: &[Day]) -> Vec<Vec<Day>> {
    let mut sorted = days.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut groups: Vec<Vec<Day>> = Vec::new();
    for day in sorted {
        match groups.last_mut() {
            Some(group) if group.last().is_some_and(|last| last.precedes(day)) => group.push(day),
            _ => groups.push(vec![day]),
        }
    }
    groups
}

/// Drop closed days from every selection.
///
/// A selection that loses a day from its middle falls apart into one
/// selection per remaining run. Nothing is merged back together.
fn remove_days(selections: Vec<Selection>, closed: &BTreeSet<Day>) -> Vec<Selection> {
    selections
        .into_iter()
        .flat_map(|selection| {
            if !selection.days.iter().any(|day| closed.contains(day)) {
                return vec![selection];
            }

            let remaining: Vec<Day> = selection
                .days
                .into_iter()
                .filter(|day| !closed.contains(day))
                .collect();
            consecutive_groups(&remaining)
                .into_iter()
                .map(Selection::new)
                .collect()
        })
        .collect()
}

/// Copy the first day's hours and break onto the rest of the group
pub fn propagate_range_hours<F: FormControl>(
    days: &[Day],
    snapshot: &WeekSnapshot,
    form: &mut F,
) {
    let Some((&template, rest)) = days.split_first() else {
        return;
    };
    let source = &snapshot[template];

    for &day in rest {
        let patch = DayPatch::default()
            .is_open(true)
            .hours(source.hours.clone())
            .has_break(source.has_break)
            .break_time(source.break_time.clone());
        form.patch_day(day, patch, Emit::Silent);
    }

    if !rest.is_empty() {
        debug!("Applied {} hours to {} more day(s)", template, rest.len());
    }
}

/// Turn the break on or off for every day of a selection.
///
/// Turning it off also clears the break times; turning it on keeps
/// whatever each day already had.
pub fn toggle_break<F: FormControl>(selection: &Selection, checked: bool, form: &mut F) {
    for &day in selection.days() {
        let mut patch = DayPatch::default().has_break(checked);
        if !checked {
            // All-absent reads the same as empty strings, see BreakTime::is_empty
            patch = patch.break_time(BreakTime::default());
        }
        form.patch_day(day, patch, Emit::Silent);
    }
}

/// Whether a selection shows a break, judged by its first day
pub fn has_break<F: FormControl>(selection: &Selection, form: &F) -> bool {
    selection
        .first_day()
        .map(|day| form.day(day).has_break)
        .unwrap_or(false)
}
