//! Writes generated units to an output directory

use super::{Emitter, GeneratorRun};
use crate::{cache::EmissionManifest, error::Result};
use std::path::{Path, PathBuf};

/// Files touched by one write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
}

pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Seed an emitter with the units recorded by a previous process
    pub fn restore(&self, emitter: &mut Emitter) -> Result<usize> {
        let manifest = EmissionManifest::load(&self.output_dir)?;
        let restored = manifest.restore_into(&self.output_dir, emitter);
        tracing::debug!(
            "Restored {} of {} units from {}",
            restored,
            manifest.entries.len(),
            self.output_dir.display()
        );
        Ok(restored)
    }

    /// Write rendered units, delete removed ones and save the manifest.
    ///
    /// Reused units are only written when their file has gone missing.
    pub fn write(&self, run: &GeneratorRun, emitter: &Emitter) -> Result<WriteSummary> {
        std::fs::create_dir_all(&self.output_dir)?;
        let mut summary = WriteSummary::default();

        for unit in emitter.units() {
            let path = self.output_dir.join(&unit.hint_name);
            let rendered = run.rendered.contains(&unit.hint_name);
            if rendered || !path.exists() {
                std::fs::write(&path, &unit.source)?;
                tracing::debug!("Wrote {}", path.display());
                summary.written.push(path);
            }
        }

        for hint_name in &run.removed {
            let path = self.output_dir.join(hint_name);
            if path.exists() {
                std::fs::remove_file(&path)?;
                tracing::debug!("Deleted {}", path.display());
                summary.deleted.push(path);
            }
        }

        EmissionManifest::from_emitter(emitter).save(&self.output_dir)?;
        Ok(summary)
    }
}
