use anyhow::{Context, Result};
use colorto_core::{ColorToGenerator, OutputWriter};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::display::print_write_summary;
use crate::utils::Project;

pub fn generate_command(
    project: Option<&Path>,
    references: &[PathBuf],
    output: Option<&Path>,
) -> Result<()> {
    let project = Project::open(project, references)?;
    let output_dir = project.output_dir(output);
    debug!("Generating for {} into {}", project.root.display(), output_dir.display());

    let mut generator = ColorToGenerator::new(project.config.clone())?;
    let writer = OutputWriter::new(&output_dir);
    writer
        .restore(generator.emitter_mut())
        .context("Failed to read previous output")?;

    let compilation = project.load_compilation()?;
    let run = generator.run(&compilation).context("Generation failed")?;
    let summary = writer
        .write(&run, generator.emitter())
        .with_context(|| format!("Failed to write to {}", output_dir.display()))?;

    print_write_summary(&run, &summary, &output_dir);
    Ok(())
}
