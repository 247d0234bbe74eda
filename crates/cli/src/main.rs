use anyhow::Result;
use clap::Parser;
use colorto_cli::{
    Cli, Commands,
    commands::{analyze_command, generate_command, init_command, watch_command},
};

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            project,
            references,
            output,
        } => generate_command(project.as_deref(), &references, output.as_deref()),
        Commands::Analyze {
            project,
            references,
            verbose,
        } => analyze_command(project.as_deref(), &references, verbose),
        Commands::Watch {
            project,
            references,
            output,
        } => watch_command(project.as_deref(), &references, output.as_deref()),
        Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
    }
}
