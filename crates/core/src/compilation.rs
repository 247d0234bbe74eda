//! The analysis context: program sources plus referenced module metadata

use crate::{
    error::{Error, Result},
    types::ModuleMetadata,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One source file of the program under analysis
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

/// Immutable-by-convention snapshot handed to the generator on every run.
///
/// Sources are kept sorted by path so that the order of discovery never
/// changes the order of generated output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    sources: Vec<SourceFile>,
    references: Vec<ModuleMetadata>,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.add_source(path, text);
        self
    }

    pub fn with_reference(mut self, module: ModuleMetadata) -> Self {
        self.add_reference(module);
        self
    }

    /// Add or replace the source at `path`
    pub fn add_source(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        let file = SourceFile {
            path: path.into(),
            text: text.into(),
        };
        match self
            .sources
            .binary_search_by(|existing| existing.path.cmp(&file.path))
        {
            Ok(position) => self.sources[position] = file,
            Err(position) => self.sources.insert(position, file),
        }
    }

    pub fn remove_source(&mut self, path: &Path) -> bool {
        let before = self.sources.len();
        self.sources.retain(|file| file.path != path);
        before != self.sources.len()
    }

    pub fn add_reference(&mut self, module: ModuleMetadata) {
        self.references.push(module);
    }

    /// Read a module metadata file and add it as a reference
    pub fn load_reference(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)?;
        let module = ModuleMetadata::from_json(&contents).map_err(|e| {
            Error::ParseError(format!("Invalid module metadata {}: {e}", path.display()))
        })?;
        tracing::debug!(
            "Loaded reference '{}' ({} types) from {}",
            module.name,
            module.types.len(),
            path.display()
        );
        self.add_reference(module);
        Ok(())
    }

    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    pub fn references(&self) -> &[ModuleMetadata] {
        &self.references
    }
}
