use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::locate_project;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Schema file (defaults to the schema configured in propgen.toml)
    pub schema: Option<PathBuf>,

    /// Project root (defaults to the nearest directory containing propgen.toml)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let schema = match &self.schema {
            Some(schema) => schema.clone(),
            None => locate_project(self.root.as_deref())?.schema_path(),
        };
        ops::check(&schema)?.render(&mut TerminalOutput);
        Ok(())
    }
}
