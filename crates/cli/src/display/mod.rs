pub mod formatter;

pub use formatter::{print_analysis, print_write_summary};
