//! colorto-core - incremental generator for `TextColorTo` animation extensions
//!
//! This crate provides functionality to:
//! - Parse C# sources and referenced module metadata into a declaration graph
//! - Find types implementing both text style and animatable capabilities
//! - Emit one generated extension class per capable type, incrementally
//! - Run the generated operation's animation contract on tokio
pub mod cache;
pub mod compilation;
pub mod config;
pub mod error;
pub mod graph;
pub mod parser;
pub mod pipeline;
pub mod runtime;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{AnimationError, ConfigurationError, Error, Result};
pub use types::*;

// Re-export main API components
pub use cache::{CacheStats, EmissionManifest, IncrementalCache, Stage};
pub use compilation::{Compilation, SourceFile};
pub use config::Config;
pub use graph::DeclarationGraph;
pub use pipeline::{
    ColorToGenerator, EmissionUnit, EmitOutcome, Emitter, GeneratorRun, OutputWriter,
};
