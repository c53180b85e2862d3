// Edit sessions: isolated working copies with commit / cancel.

pub mod handlers;
pub mod session;
pub mod templates;

pub use session::{EditError, EditOp, EditSession};
