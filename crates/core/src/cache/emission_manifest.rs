use crate::{
    error::{Error, Result},
    pipeline::{EmissionUnit, Emitter},
    types::TypeDescriptor,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = ".colorto-manifest.json";

/// What was written to an output directory, so a later process can adopt
/// the units instead of rendering them again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionManifest {
    pub generator_version: String,
    /// Keyed by hint name
    pub entries: BTreeMap<String, ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub descriptor: TypeDescriptor,
    pub source_hash: String,
}

impl Default for EmissionManifest {
    fn default() -> Self {
        Self {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: BTreeMap::new(),
        }
    }
}

impl EmissionManifest {
    pub fn path_in(output_dir: &Path) -> PathBuf {
        output_dir.join(MANIFEST_FILE_NAME)
    }

    /// Snapshot the units currently held by an emitter
    pub fn from_emitter(emitter: &Emitter) -> Self {
        let entries = emitter
            .units()
            .map(|unit| {
                (
                    unit.hint_name.clone(),
                    ManifestEntry {
                        descriptor: unit.descriptor.clone(),
                        source_hash: hash_source(&unit.source),
                    },
                )
            })
            .collect();
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Load the manifest of `output_dir`. A missing manifest, or one written
    /// by another generator version, loads as empty.
    pub fn load(output_dir: &Path) -> Result<Self> {
        let path = Self::path_in(output_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let manifest: Self = serde_json::from_str(&contents).map_err(|e| {
            Error::CacheError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        if manifest.generator_version != env!("CARGO_PKG_VERSION") {
            tracing::debug!(
                "Ignoring manifest from generator version {}",
                manifest.generator_version
            );
            return Ok(Self::default());
        }

        Ok(manifest)
    }

    pub fn save(&self, output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::CacheError(format!("Failed to serialize manifest: {e}")))?;
        std::fs::write(Self::path_in(output_dir), contents)?;
        Ok(())
    }

    /// Hand every entry whose file still exists with the recorded hash to
    /// the emitter. Returns how many units were restored.
    pub fn restore_into(&self, output_dir: &Path, emitter: &mut Emitter) -> usize {
        let mut restored = 0;
        for (hint_name, entry) in &self.entries {
            let path = output_dir.join(hint_name);
            let Ok(source) = std::fs::read_to_string(&path) else {
                tracing::debug!("{} is gone, it will be rendered again", path.display());
                continue;
            };
            if hash_source(&source) != entry.source_hash {
                tracing::debug!("{} was modified, it will be rendered again", path.display());
                continue;
            }

            let unit = EmissionUnit {
                hint_name: hint_name.clone(),
                descriptor: entry.descriptor.clone(),
                source,
            };
            if emitter.restore(unit) {
                restored += 1;
            }
        }
        restored
    }
}

pub(crate) fn hash_source(source: &str) -> String {
    format!("{:x}", md5::compute(source.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, pipeline::EmitterSettings};
    use tempfile::TempDir;

    fn descriptor(name: &str) -> TypeDescriptor {
        TypeDescriptor {
            name: name.to_string(),
            access_modifier: "public".to_string(),
            namespace: "App".to_string(),
            generic_arguments: String::new(),
            generic_constraints: String::new(),
        }
    }

    fn emitter() -> Emitter {
        Emitter::new(EmitterSettings::from(&Config::default()))
    }

    fn write_units(emitter: &Emitter, dir: &Path) -> Result<()> {
        for unit in emitter.units() {
            std::fs::write(dir.join(&unit.hint_name), &unit.source)?;
        }
        Ok(())
    }

    #[test]
    fn test_round_trip_through_disk() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut first = emitter();
        first.emit(&descriptor("Label"));
        first.emit(&descriptor("Entry"));
        write_units(&first, temp_dir.path())?;
        EmissionManifest::from_emitter(&first).save(temp_dir.path())?;

        let manifest = EmissionManifest::load(temp_dir.path())?;
        assert_eq!(manifest.entries.len(), 2);

        let mut second = emitter();
        assert_eq!(manifest.restore_into(temp_dir.path(), &mut second), 2);
        assert_eq!(second.render_count(), 0);

        Ok(())
    }

    #[test]
    fn test_modified_or_missing_files_are_not_restored() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut first = emitter();
        first.emit(&descriptor("Label"));
        first.emit(&descriptor("Entry"));
        write_units(&first, temp_dir.path())?;
        let manifest = EmissionManifest::from_emitter(&first);

        std::fs::write(
            temp_dir.path().join("LabelTextColorTo.g.shared.cs"),
            "// edited by hand\n",
        )?;
        std::fs::remove_file(temp_dir.path().join("EntryTextColorTo.g.shared.cs"))?;

        let mut second = emitter();
        assert_eq!(manifest.restore_into(temp_dir.path(), &mut second), 0);
        assert!(second.is_empty());

        Ok(())
    }

    #[test]
    fn test_missing_or_foreign_manifest_loads_empty() -> Result<()> {
        let temp_dir = TempDir::new()?;
        assert!(EmissionManifest::load(temp_dir.path())?.entries.is_empty());

        let mut manifest = EmissionManifest::from_emitter(&{
            let mut emitter = emitter();
            emitter.emit(&descriptor("Label"));
            emitter
        });
        manifest.generator_version = "0.0.0-other".to_string();
        manifest.save(temp_dir.path())?;

        assert!(EmissionManifest::load(temp_dir.path())?.entries.is_empty());

        Ok(())
    }
}
