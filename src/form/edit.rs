//! Edit commands coming from the editing surface

use crate::week::Day;
use serde::{Deserialize, Serialize};

/// One user action on the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FormEdit {
    /// Mark a day open
    Open { day: Day },
    /// Mark a day closed
    Close { day: Day },
    /// Set a day's opening hours
    Hours {
        day: Day,
        open: String,
        close: String,
    },
    /// Set a day's break times
    Break {
        day: Day,
        start: String,
        end: String,
    },
    /// Break checkbox of a displayed selection
    ToggleBreak { selection: usize, checked: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edits() {
        let edit: FormEdit = serde_json::from_str(r#"{"op": "open", "day": "monday"}"#).unwrap();
        assert_eq!(edit, FormEdit::Open { day: Day::Monday });

        let edit: FormEdit =
            serde_json::from_str(r#"{"op": "toggle_break", "selection": 1, "checked": false}"#)
                .unwrap();
        assert_eq!(
            edit,
            FormEdit::ToggleBreak {
                selection: 1,
                checked: false
            }
        );

        assert!(serde_json::from_str::<FormEdit>(r#"{"op": "open", "day": "someday"}"#).is_err());
    }
}
