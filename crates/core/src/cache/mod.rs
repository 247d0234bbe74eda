//! Incremental caching for generator runs and persisted emission state

pub mod emission_manifest;
pub mod fingerprint;
pub mod incremental_cache;

pub use emission_manifest::{EmissionManifest, ManifestEntry, MANIFEST_FILE_NAME};
pub use fingerprint::fingerprint;
pub use incremental_cache::{CacheStats, Cached, IncrementalCache, Stage, StageOutput};
