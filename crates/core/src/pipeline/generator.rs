use super::{
    declaration_index::{self, ScanOutput},
    dedup,
    emitter::{EmitOutcome, Emitter, EmitterSettings},
    library_index, projector,
};
use crate::{
    cache::{CacheStats, IncrementalCache, Stage, fingerprint},
    compilation::{Compilation, SourceFile},
    config::Config,
    error::{ConfigurationError, Error, Result},
    graph::DeclarationGraph,
    parser::{CSharpParser, ParsedSource},
    types::{CandidateType, Diagnostic, TypeDeclaration, TypeDescriptor},
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// What one generator run produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratorRun {
    /// Surviving descriptors in deduplication order
    pub descriptors: Vec<TypeDescriptor>,
    /// Hint names of every live unit, in descriptor order
    pub units: Vec<String>,
    pub rendered: Vec<String>,
    pub reused: Vec<String>,
    pub removed: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub cache: CacheStats,
}

/// Incremental driver over the scan, enumerate, deduplicate, project and
/// emit stages.
///
/// Keep one generator alive for a whole session; its cache and emitter are
/// what make repeated runs cheap.
pub struct ColorToGenerator {
    config: Config,
    parser: CSharpParser,
    cache: IncrementalCache,
    emitter: Emitter,
}

impl ColorToGenerator {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser: CSharpParser::new()?,
            cache: IncrementalCache::new(config.cache_capacity),
            emitter: Emitter::new(EmitterSettings::from(&config)),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut Emitter {
        &mut self.emitter
    }

    pub fn run(&mut self, compilation: &Compilation) -> Result<GeneratorRun> {
        self.cache.take_stats();

        let (declarations, global_usings) = self.parse_sources(compilation.sources())?;
        let reference_keys = compilation
            .references()
            .iter()
            .map(fingerprint)
            .collect::<Result<Vec<_>>>()?;

        let graph_key = fingerprint(&(
            &self.config.program_module,
            &declarations,
            &global_usings,
            &reference_keys,
        ))?;
        let graph: Arc<DeclarationGraph> =
            self.cache.get_or_try_insert(Stage::Graph, &graph_key, || {
                Ok(Arc::new(DeclarationGraph::build_with_global_usings(
                    &self.config.program_module,
                    &declarations,
                    &global_usings,
                    compilation.references(),
                )))
            })?;

        let capability = self.config.capability_interfaces();
        let scan_key = fingerprint(&(&graph_key, capability))?;
        let library_key = fingerprint(&(&reference_keys, &self.config.library_module, capability))?;
        let (scan, library) =
            self.index(&graph, compilation, &scan_key, &library_key)?;

        let dedup_key = fingerprint(&(&scan.candidates, &*library))?;
        let survivors: Arc<Vec<CandidateType>> =
            self.cache.get_or_try_insert(Stage::Deduplicate, &dedup_key, || {
                Ok(Arc::new(dedup::deduplicate(&scan.candidates, &library)))
            })?;

        let mut descriptors = Vec::with_capacity(survivors.len());
        for candidate in survivors.iter() {
            let key = fingerprint(&(candidate, &self.config.library_module))?;
            let descriptor = self.cache.get_or_try_insert(Stage::Project, &key, || {
                projector::project(candidate, &self.config.library_module)
            })?;
            descriptors.push(descriptor);
        }

        let hint_names = self.check_hint_names(&descriptors)?;

        let mut run = GeneratorRun {
            diagnostics: scan.diagnostics.clone(),
            ..GeneratorRun::default()
        };
        for (descriptor, hint_name) in descriptors.iter().zip(&hint_names) {
            match self.emitter.emit(descriptor) {
                EmitOutcome::Rendered => run.rendered.push(hint_name.clone()),
                EmitOutcome::Reused => run.reused.push(hint_name.clone()),
            }
        }

        let live: HashSet<_> = descriptors.iter().map(TypeDescriptor::identity).collect();
        run.removed = self
            .emitter
            .retain(&live)
            .into_iter()
            .map(|unit| unit.hint_name)
            .collect();
        run.units = hint_names;
        run.descriptors = descriptors;
        run.cache = self.cache.take_stats();

        tracing::info!(
            "Generated {} units ({} rendered, {} reused, {} removed, {} diagnostics)",
            run.units.len(),
            run.rendered.len(),
            run.reused.len(),
            run.removed.len(),
            run.diagnostics.len()
        );

        Ok(run)
    }

    /// Declarations of every source, plus the program-wide `global using`
    /// namespaces in source order
    fn parse_sources(
        &mut self,
        sources: &[SourceFile],
    ) -> Result<(Vec<TypeDeclaration>, Vec<String>)> {
        let mut declarations = Vec::new();
        let mut global_usings: Vec<String> = Vec::new();
        for file in sources {
            let key = fingerprint(file)?;
            let parsed: Arc<ParsedSource> = match self.cache.get(Stage::Parse, &key) {
                Some(parsed) => parsed,
                None => {
                    let parsed = Arc::new(self.parser.parse_source(&file.text, &file.path)?);
                    self.cache.insert(Stage::Parse, key, parsed.clone());
                    parsed
                }
            };
            declarations.extend(parsed.declarations.iter().cloned());
            for namespace in &parsed.global_usings {
                if !global_usings.contains(namespace) {
                    global_usings.push(namespace.clone());
                }
            }
        }
        Ok((declarations, global_usings))
    }

    /// Run the declaration index and the library index, in parallel when
    /// neither is cached. A scan error takes precedence over a library error.
    fn index(
        &mut self,
        graph: &DeclarationGraph,
        compilation: &Compilation,
        scan_key: &str,
        library_key: &str,
    ) -> Result<(Arc<ScanOutput>, Arc<Vec<CandidateType>>)> {
        let cached_scan: Option<Arc<ScanOutput>> = self.cache.get(Stage::DeclarationIndex, scan_key);
        let cached_library: Option<Arc<Vec<CandidateType>>> =
            self.cache.get(Stage::LibraryIndex, library_key);

        let config = &self.config;
        let references = compilation.references();
        let scan = || declaration_index::scan(graph, config).map(Arc::new);
        let enumerate = || library_index::enumerate(graph, references, config).map(Arc::new);

        let (scan, library) = match (cached_scan, cached_library) {
            (Some(scan), Some(library)) => (scan, library),
            (Some(scan), None) => (scan, enumerate()?),
            (None, Some(library)) => (scan()?, library),
            (None, None) => {
                tracing::debug!("Running declaration and library indexes in parallel");
                let (scan, library) = rayon::join(scan, enumerate);
                (scan?, library?)
            }
        };

        self.cache
            .insert(Stage::DeclarationIndex, scan_key.to_string(), scan.clone());
        self.cache
            .insert(Stage::LibraryIndex, library_key.to_string(), library.clone());

        Ok((scan, library))
    }

    fn check_hint_names(&self, descriptors: &[TypeDescriptor]) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let hint_name = self.emitter.hint_name(descriptor);
            if !seen.insert(hint_name.clone()) {
                return Err(Error::Misconfigured(ConfigurationError::DuplicateHintName {
                    hint_name,
                }));
            }
            names.push(hint_name);
        }
        Ok(names)
    }
}
