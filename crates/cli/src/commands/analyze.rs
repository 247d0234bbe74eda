use anyhow::{Context, Result};
use colorto_core::ColorToGenerator;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::display::print_analysis;
use crate::utils::Project;

pub fn analyze_command(project: Option<&Path>, references: &[PathBuf], verbose: bool) -> Result<()> {
    let project = Project::open(project, references)?;
    debug!("Analyzing {}", project.root.display());

    let compilation = project.load_compilation()?;
    let mut generator = ColorToGenerator::new(project.config.clone())?;
    let run = generator.run(&compilation).context("Analysis failed")?;

    if verbose {
        // Show JSON output for verbose mode
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else {
        println!("🔍 Analyzing: {}", project.root.display());
        print_analysis(&run);
    }

    Ok(())
}
