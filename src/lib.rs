//! Weekhours - Business hours editor
//!
//! Turns per-day opening hours from a form into labeled groups of
//! contiguous days ("Monday to Friday") and keeps the hours of each new
//! group in step with its first day.

pub mod config;
pub mod engine;
pub mod form;
pub mod services;
pub mod week;

pub use config::Config;
pub use engine::{EngineState, Selection};
pub use form::{Emit, FormControl, FormEdit, FormStore};
pub use services::{EditorSession, SessionError};
pub use week::{Day, DayState, WeekSnapshot};
