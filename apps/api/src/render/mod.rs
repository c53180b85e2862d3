// Read-only presentation of a resume: the section projection used by the UI and
// the markdown export built on top of it.

pub mod export;
pub mod handlers;
pub mod projection;

pub use export::to_markdown;
pub use projection::{project, RenderMode, RenderedResume};
