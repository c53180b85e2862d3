pub mod fixtures;
pub mod resume;
