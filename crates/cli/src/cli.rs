use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "colorto")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate TextColorTo extensions for a C# project
    #[command(visible_alias = "g")]
    Generate {
        /// Project directory (defaults to current directory)
        project: Option<PathBuf>,

        /// Extra referenced module metadata files (*.module.json)
        #[arg(short, long = "reference")]
        references: Vec<PathBuf>,

        /// Output directory for generated units (defaults to <project>/obj/colorto)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show which types would receive a generated extension
    #[command(visible_alias = "a")]
    Analyze {
        /// Project directory (defaults to current directory)
        project: Option<PathBuf>,

        /// Extra referenced module metadata files (*.module.json)
        #[arg(short, long = "reference")]
        references: Vec<PathBuf>,

        /// Show verbose JSON output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Regenerate whenever a source or module metadata file changes
    Watch {
        /// Project directory (defaults to current directory)
        project: Option<PathBuf>,

        /// Extra referenced module metadata files (*.module.json)
        #[arg(short, long = "reference")]
        references: Vec<PathBuf>,

        /// Output directory for generated units (defaults to <project>/obj/colorto)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a default .colorto.json
    Init {
        /// Specify the current working directory
        #[arg(short, long)]
        cwd: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}
