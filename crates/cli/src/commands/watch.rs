use anyhow::{Context, Result};
use colorto_core::{ColorToGenerator, GeneratorRun, OutputWriter, pipeline::WriteSummary};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::display::print_write_summary;
use crate::utils::Project;

/// Changes arriving within this window are handled as one batch
const DEBOUNCE: Duration = Duration::from_millis(200);

pub fn watch_command(
    project: Option<&Path>,
    references: &[PathBuf],
    output: Option<&Path>,
) -> Result<()> {
    let mut session = WatchSession::open(project, references, output)?;

    let (sender, events) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher =
        notify::recommended_watcher(sender).context("Failed to create file watcher")?;
    let root = session.project.root.clone();
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", root.display()))?;
    for reference in &session.project.extra_references {
        watcher
            .watch(reference, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", reference.display()))?;
    }

    println!("👀 Watching {}", root.display());
    let outcome = session.regenerate();
    session.report(outcome);

    while let Ok(first) = events.recv() {
        let mut batch = vec![first];
        while let Ok(next) = events.recv_timeout(DEBOUNCE) {
            batch.push(next);
        }

        let changed: Vec<PathBuf> = batch
            .into_iter()
            .filter_map(|event| match event {
                Ok(event) if !matches!(event.kind, EventKind::Access(_)) => Some(event.paths),
                Ok(_) => None,
                Err(e) => {
                    warn!("Watch error: {}", e);
                    None
                }
            })
            .flatten()
            .collect();

        if let Some(outcome) = session.handle_changes(&changed) {
            session.report(outcome);
        }
    }

    Ok(())
}

/// One long-lived generator plus the project state it was built from
struct WatchSession {
    project: Project,
    output: Option<PathBuf>,
    generator: ColorToGenerator,
    writer: OutputWriter,
    /// Units written under the settings in force before a config reload
    stale: Vec<String>,
}

impl WatchSession {
    fn open(project: Option<&Path>, references: &[PathBuf], output: Option<&Path>) -> Result<Self> {
        let project = Project::open(project, references)?;
        let (generator, writer) = Self::start(&project, output)?;
        Ok(Self {
            project,
            output: output.map(Path::to_path_buf),
            generator,
            writer,
            stale: Vec::new(),
        })
    }

    fn start(project: &Project, output: Option<&Path>) -> Result<(ColorToGenerator, OutputWriter)> {
        let mut generator = ColorToGenerator::new(project.config.clone())?;
        let writer = OutputWriter::new(project.output_dir(output));
        writer
            .restore(generator.emitter_mut())
            .context("Failed to read previous output")?;
        Ok((generator, writer))
    }

    /// Rerun for a batch of changed paths, reloading the configuration first
    /// when `.colorto.json` is among them. `None` when nothing relevant changed.
    fn handle_changes(&mut self, paths: &[PathBuf]) -> Option<Result<(GeneratorRun, WriteSummary)>> {
        let relevant = paths
            .iter()
            .any(|path| self.project.is_input(path) || self.project.extra_references.contains(path));
        debug!("Changed: {:?} (relevant: {})", paths, relevant);
        if !relevant {
            return None;
        }

        if paths.iter().any(|path| self.project.is_config(path)) {
            if let Err(e) = self.reload() {
                return Some(Err(e));
            }
        }

        Some(self.regenerate())
    }

    /// Rebuild the generator from the configuration on disk. Units of the
    /// previous generator are deleted by the next run unless it produces
    /// them again.
    fn reload(&mut self) -> Result<()> {
        let project = Project::open(Some(&self.project.root), &self.project.extra_references)?;
        let (generator, writer) = Self::start(&project, self.output.as_deref())?;
        info!("Configuration changed, restarting generator");

        self.stale.extend(
            self.generator
                .emitter()
                .units()
                .map(|unit| unit.hint_name.clone()),
        );
        self.project = project;
        self.generator = generator;
        self.writer = writer;
        Ok(())
    }

    /// One incremental run
    fn regenerate(&mut self) -> Result<(GeneratorRun, WriteSummary)> {
        let compilation = self.project.load_compilation()?;
        let run = self.generator.run(&compilation)?;
        let mut summary = self.writer.write(&run, self.generator.emitter())?;

        for hint_name in self.stale.drain(..) {
            if run.units.contains(&hint_name) {
                continue;
            }
            let path = self.writer.output_dir().join(&hint_name);
            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to delete {}", path.display()))?;
                summary.deleted.push(path);
            }
        }

        Ok((run, summary))
    }

    /// Failures are reported and the watch goes on
    fn report(&self, outcome: Result<(GeneratorRun, WriteSummary)>) {
        match outcome {
            Ok((run, summary)) => print_write_summary(&run, &summary, self.writer.output_dir()),
            Err(e) => println!("❌ {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MODULES: &str = r#"{
  "name": "Microsoft.Maui.Controls",
  "types": [
    { "namespace": "Microsoft.Maui", "name": "ITextStyle", "kind": "interface", "accessibility": "public" },
    { "namespace": "Microsoft.Maui.Controls", "name": "IAnimatable", "kind": "interface", "accessibility": "public" }
  ]
}"#;

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("Controls.module.json"), MODULES).unwrap();
        fs::write(
            root.join("Chip.cs"),
            "namespace App;\npublic class Chip : Microsoft.Maui.ITextStyle, Microsoft.Maui.Controls.IAnimatable {}\n",
        )
        .unwrap();
        temp_dir
    }

    fn unit_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".cs"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_config_change_restarts_generator() -> Result<()> {
        let temp_dir = project();
        let root = temp_dir.path().canonicalize()?;
        let output = root.join("obj/colorto");

        let mut session = WatchSession::open(Some(&root), &[], None)?;
        session.regenerate()?;
        assert_eq!(unit_names(&output), vec!["ChipTextColorTo.g.shared.cs"]);

        let config = root.join(".colorto.json");
        fs::write(&config, r#"{ "operation_suffix": "Fade" }"#)?;
        let (run, summary) = session.handle_changes(&[config]).unwrap()?;

        assert_eq!(run.units, vec!["ChipFade.g.shared.cs"]);
        assert_eq!(summary.deleted, vec![output.join("ChipTextColorTo.g.shared.cs")]);
        assert_eq!(unit_names(&output), vec!["ChipFade.g.shared.cs"]);
        assert_eq!(session.generator.config().operation_suffix, "Fade");

        Ok(())
    }

    #[test]
    fn test_irrelevant_change_is_ignored() -> Result<()> {
        let temp_dir = project();
        let root = temp_dir.path().canonicalize()?;

        let mut session = WatchSession::open(Some(&root), &[], None)?;
        assert!(session.handle_changes(&[root.join("README.md")]).is_none());
        assert!(session.handle_changes(&[root.join("Chip.cs")]).is_some());

        Ok(())
    }
}
