//! Runtime services around the engine

pub mod debounce;
pub mod session;

pub use debounce::Debouncer;
pub use session::{EditorSession, SessionError};
