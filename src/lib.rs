//! colorto - incremental generator for `TextColorTo` animation extensions
//!
//! Umbrella crate over the workspace members, used by the cross-crate tests
//! under `tests/`.
pub use colorto_cli as cli;
pub use colorto_core::*;

use std::path::PathBuf;

/// Directory of a fixture project under `test-projects/`
pub fn fixture_project(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-projects")
        .join(name)
}
