use crate::{
    error::Result,
    graph::DeclarationGraph,
    parser::ParsedSource,
    pipeline::ScanOutput,
    types::{CandidateType, TypeDescriptor},
};
use lru::LruCache;
use serde::Serialize;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Pipeline stages whose outputs are memoized between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Parse,
    Graph,
    DeclarationIndex,
    LibraryIndex,
    Deduplicate,
    Project,
}

/// A memoized stage result
#[derive(Debug, Clone)]
pub enum StageOutput {
    Parsed(Arc<ParsedSource>),
    Graph(Arc<DeclarationGraph>),
    Scan(Arc<ScanOutput>),
    Candidates(Arc<Vec<CandidateType>>),
    Descriptor(TypeDescriptor),
}

/// Conversion between a stage's typed result and the cache's storage form
pub trait Cached: Sized {
    fn into_output(self) -> StageOutput;
    fn from_output(output: StageOutput) -> Option<Self>;
}

macro_rules! impl_cached {
    ($ty:ty, $variant:ident) => {
        impl Cached for $ty {
            fn into_output(self) -> StageOutput {
                StageOutput::$variant(self)
            }

            fn from_output(output: StageOutput) -> Option<Self> {
                match output {
                    StageOutput::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

impl_cached!(Arc<ParsedSource>, Parsed);
impl_cached!(Arc<DeclarationGraph>, Graph);
impl_cached!(Arc<ScanOutput>, Scan);
impl_cached!(Arc<Vec<CandidateType>>, Candidates);
impl_cached!(TypeDescriptor, Descriptor);

/// Per-stage hit and miss counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: BTreeMap<Stage, usize>,
    pub misses: BTreeMap<Stage, usize>,
}

impl CacheStats {
    pub fn hits_for(&self, stage: Stage) -> usize {
        self.hits.get(&stage).copied().unwrap_or(0)
    }

    pub fn misses_for(&self, stage: Stage) -> usize {
        self.misses.get(&stage).copied().unwrap_or(0)
    }

    pub fn total_misses(&self) -> usize {
        self.misses.values().sum()
    }

    fn record(&mut self, stage: Stage, hit: bool) {
        let counters = if hit { &mut self.hits } else { &mut self.misses };
        *counters.entry(stage).or_insert(0) += 1;
    }
}

/// Bounded memo of stage outputs keyed by stage and input fingerprint.
///
/// Entries are immutable once inserted; a stage whose fingerprint is found
/// is not recomputed.
#[derive(Debug)]
pub struct IncrementalCache {
    entries: LruCache<(Stage, String), StageOutput>,
    stats: CacheStats,
}

impl IncrementalCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    pub fn get<T: Cached>(&mut self, stage: Stage, key: &str) -> Option<T> {
        let found = self
            .entries
            .get(&(stage, key.to_string()))
            .cloned()
            .and_then(T::from_output);
        self.stats.record(stage, found.is_some());
        found
    }

    pub fn insert<T: Cached>(&mut self, stage: Stage, key: String, value: T) {
        self.entries.put((stage, key), value.into_output());
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    /// Failed computations are not cached.
    pub fn get_or_try_insert<T, F>(&mut self, stage: Stage, key: &str, compute: F) -> Result<T>
    where
        T: Cached + Clone,
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.get(stage, key) {
            return Ok(value);
        }
        let value = compute()?;
        self.insert(stage, key.to_string(), value.clone());
        Ok(value)
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset the counters and return the ones collected so far
    pub fn take_stats(&mut self) -> CacheStats {
        std::mem::take(&mut self.stats)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
