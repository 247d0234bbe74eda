pub mod project;

pub use project::{Project, DEFAULT_OUTPUT_DIR};
