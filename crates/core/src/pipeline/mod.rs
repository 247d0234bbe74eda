//! The generation pipeline.
//!
//! Program declarations are scanned for capable types while the capability
//! library's own capable types are enumerated. Both sets are merged by the
//! deduplicator, projected into descriptors and emitted as generated units.

mod capability;
pub mod declaration_index;
pub mod dedup;
pub mod emitter;
pub mod generator;
pub mod library_index;
pub mod output;
pub mod projector;
pub mod template;

pub use capability::CapabilityPredicate;
pub use declaration_index::ScanOutput;
pub use emitter::{EmissionUnit, EmitOutcome, Emitter, EmitterSettings};
pub use generator::{ColorToGenerator, GeneratorRun};
pub use output::{OutputWriter, WriteSummary};
