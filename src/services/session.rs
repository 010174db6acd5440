//! Editor session - one form, one engine state, one event loop

use super::debounce::Debouncer;
use crate::engine::{self, EngineState, Selection};
use crate::form::{FormControl, FormEdit, FormStore};
use crate::week::{Day, WeekSnapshot};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no selection at index {index} ({count} selections)")]
    UnknownSelection { index: usize, count: usize },
}

/// Owns the engine state of a single form
#[derive(Debug)]
pub struct EditorSession<F> {
    state: EngineState,
    form: F,
}

impl<F: FormControl> EditorSession<F> {
    pub fn new(form: F) -> Self {
        Self {
            state: EngineState::new(),
            form,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn selections(&self) -> &[Selection] {
        self.state.selections()
    }

    pub fn labels(&self) -> Vec<String> {
        self.state.labels()
    }

    pub fn selection_for(&self, day: Day) -> Option<&Selection> {
        self.state.selection_for(day)
    }

    /// Run the engine on a debounced snapshot
    pub fn apply(&mut self, snapshot: &WeekSnapshot) {
        let state = std::mem::take(&mut self.state);
        self.state = engine::reduce(state, snapshot, &mut self.form);
    }

    /// Break checkbox of the selection at `index`
    pub fn toggle_break(&mut self, index: usize, checked: bool) -> Result<(), SessionError> {
        let selection = lookup(&self.state, index)?;
        engine::toggle_break(selection, checked, &mut self.form);
        debug!("Break {} for {}", if checked { "on" } else { "off" }, selection.label());
        Ok(())
    }

    pub fn has_break(&self, index: usize) -> Result<bool, SessionError> {
        let selection = lookup(&self.state, index)?;
        Ok(engine::has_break(selection, &self.form))
    }
}

fn lookup(state: &EngineState, index: usize) -> Result<&Selection, SessionError> {
    let selections = state.selections();
    selections.get(index).ok_or(SessionError::UnknownSelection {
        index,
        count: selections.len(),
    })
}

impl EditorSession<FormStore> {
    /// Feed edits into the form and reduce its changes until `edits` closes.
    ///
    /// A snapshot still waiting out the debounce window when the edits end
    /// is reduced before returning.
    pub async fn run(
        mut self,
        mut edits: mpsc::Receiver<FormEdit>,
        mut changes: mpsc::UnboundedReceiver<WeekSnapshot>,
        window: Duration,
    ) -> Self {
        let mut debouncer = Debouncer::new(window);
        info!("Editor session started (debounce {:?})", debouncer.window());

        loop {
            tokio::select! {
                edit = edits.recv() => match edit {
                    Some(FormEdit::ToggleBreak { selection, checked }) => {
                        // Selection indices refer to what the form shows now
                        self.settle(&mut changes, &mut debouncer);
                        if let Err(e) = self.toggle_break(selection, checked) {
                            warn!("Ignoring break toggle: {}", e);
                        }
                    }
                    Some(edit) => {
                        self.form.apply_edit(&edit);
                    }
                    None => break,
                },
                Some(snapshot) = changes.recv() => debouncer.push(snapshot),
                snapshot = debouncer.ready() => self.apply(&snapshot),
            }
        }

        self.settle(&mut changes, &mut debouncer);

        info!("Editor session finished with {} selection(s)", self.selections().len());
        self
    }

    /// Reduce every change received so far without waiting for the window
    fn settle(
        &mut self,
        changes: &mut mpsc::UnboundedReceiver<WeekSnapshot>,
        debouncer: &mut Debouncer,
    ) {
        while let Ok(snapshot) = changes.try_recv() {
            debouncer.push(snapshot);
        }
        if let Some(snapshot) = debouncer.flush() {
            self.apply(&snapshot);
        }
    }
}
