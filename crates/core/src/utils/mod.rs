//! Shared helpers

pub mod serde_helpers;
pub mod text;
