mod check;
mod completions;
mod generate;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::{Context, Result};
use generate::GenerateCommand;
use propgen_schema::Project;

#[derive(Parser)]
#[command(name = "propgen")]
#[command(version)]
#[command(about = "Generate property tables for C++, Java, C# and JavaScript from PropertyNames.xml")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate property tables and move them into the source tree
    Generate(GenerateCommand),

    /// Validate a schema without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Open the project at `root`, or discover it from the current directory.
fn locate_project(root: Option<&Path>) -> Result<Project> {
    let project = match root {
        Some(root) => Project::open(root),
        None => {
            let cwd: PathBuf =
                std::env::current_dir().wrap_err("failed to read the current directory")?;
            Project::discover(&cwd)
        }
    };
    project.map_err(|e| eyre::Report::new(*e))
}
