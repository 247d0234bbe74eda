use anyhow::{Context, Result};
use colorto_core::{Compilation, Config};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Generated units go under `obj/`, which source discovery already skips
pub const DEFAULT_OUTPUT_DIR: &str = "obj/colorto";

const MODULE_SUFFIX: &str = ".module.json";
const SKIPPED_DIRS: &[&str] = &["bin", "obj", "node_modules"];

/// A C# project on disk with its configuration and extra references
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub extra_references: Vec<PathBuf>,
}

impl Project {
    /// Resolve the project directory (current directory when `None`) and
    /// load its `.colorto.json`
    pub fn open(root: Option<&Path>, extra_references: &[PathBuf]) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let root = root
            .canonicalize()
            .with_context(|| format!("Project directory not found: {}", root.display()))?;

        let config = Config::load_from_path(&root)
            .with_context(|| format!("Failed to load configuration for {}", root.display()))?;

        Ok(Self {
            root,
            config,
            extra_references: extra_references.to_vec(),
        })
    }

    pub fn output_dir(&self, output: Option<&Path>) -> PathBuf {
        output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.join(DEFAULT_OUTPUT_DIR))
    }

    /// `.cs` sources of the project, sorted
    pub fn source_files(&self) -> Vec<PathBuf> {
        self.discover(|name| name.ends_with(".cs"))
    }

    /// Module metadata found in the project followed by the extra references
    pub fn reference_files(&self) -> Vec<PathBuf> {
        let mut files = self.discover(|name| name.ends_with(MODULE_SUFFIX));
        for extra in &self.extra_references {
            if !files.contains(extra) {
                files.push(extra.clone());
            }
        }
        files
    }

    /// Whether a changed path can affect generation
    pub fn is_input(&self, path: &Path) -> bool {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let relevant = name.ends_with(".cs")
            || name.ends_with(MODULE_SUFFIX)
            || name == colorto_core::config::CONFIG_FILE_NAME;
        relevant && !self.is_skipped(path)
    }

    /// Whether a changed path is the project's own `.colorto.json`
    pub fn is_config(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name == colorto_core::config::CONFIG_FILE_NAME)
            && !self.is_skipped(path)
    }

    /// Read every input into a fresh compilation snapshot
    pub fn load_compilation(&self) -> Result<Compilation> {
        let mut compilation = Compilation::new();

        for path in self.source_files() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let relative = path.strip_prefix(&self.root).unwrap_or(&path).to_path_buf();
            compilation.add_source(relative, text);
        }

        for path in self.reference_files() {
            compilation
                .load_reference(&path)
                .with_context(|| format!("Failed to load reference {}", path.display()))?;
        }

        debug!(
            "Loaded {} sources and {} references from {}",
            compilation.sources().len(),
            compilation.references().len(),
            self.root.display()
        );

        Ok(compilation)
    }

    fn discover(&self, matches: impl Fn(&str) -> bool) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name().to_str().is_some_and(&matches))
            .map(DirEntry::into_path)
            .collect();
        files.sort();
        files
    }

    fn is_skipped(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let Some(parent) = relative.parent() else {
            return false;
        };
        parent.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(is_skipped_name)
        })
    }
}

fn is_skipped_name(name: &str) -> bool {
    SKIPPED_DIRS.contains(&name) || name.starts_with('.')
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry.file_name().to_str().is_some_and(is_skipped_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_discovery_skips_build_output() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write(root, "Views/Badge.cs", "class Badge {}");
        write(root, "App.cs", "class App {}");
        write(root, "bin/Debug/Old.cs", "class Old {}");
        write(root, "obj/colorto/BadgeTextColorTo.g.shared.cs", "");
        write(root, ".git/Hook.cs", "");
        write(root, "refs/Lib.module.json", r#"{"name": "Lib"}"#);

        let project = Project::open(Some(root), &[])?;
        let sources: Vec<_> = project
            .source_files()
            .iter()
            .map(|p| p.strip_prefix(&project.root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            sources,
            vec![PathBuf::from("App.cs"), PathBuf::from("Views/Badge.cs")]
        );
        assert_eq!(project.reference_files().len(), 1);

        let compilation = project.load_compilation()?;
        assert_eq!(compilation.sources()[1].path, PathBuf::from("Views/Badge.cs"));
        assert_eq!(compilation.references()[0].name, "Lib");

        Ok(())
    }

    #[test]
    fn test_is_input() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let project = Project::open(Some(temp_dir.path()), &[])?;
        let root = &project.root;

        assert!(project.is_input(&root.join("Views/Badge.cs")));
        assert!(project.is_input(&root.join("refs/Lib.module.json")));
        assert!(project.is_input(&root.join(".colorto.json")));
        assert!(project.is_config(&root.join(".colorto.json")));
        assert!(!project.is_config(&root.join("Views/Badge.cs")));
        assert!(!project.is_input(&root.join("obj/colorto/BadgeTextColorTo.g.shared.cs")));
        assert!(!project.is_input(&root.join("README.md")));

        Ok(())
    }
}
