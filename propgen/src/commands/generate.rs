use std::path::PathBuf;

use clap::{ArgGroup, Args};
use eyre::Result;

use super::locate_project;
use crate::{
    language::Backend,
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
#[command(group(ArgGroup::new("backend").args(["cpp", "java", "cs", "js"])))]
pub struct GenerateCommand {
    /// Generate only the C++ files
    #[arg(long)]
    pub cpp: bool,

    /// Generate only the Java file
    #[arg(long)]
    pub java: bool,

    /// Generate only the C# file
    #[arg(long)]
    pub cs: bool,

    /// Generate only the JavaScript file
    #[arg(long)]
    pub js: bool,

    /// Schema file (defaults to the schema configured in propgen.toml)
    pub schema: Option<PathBuf>,

    /// Project root (defaults to the nearest directory containing propgen.toml)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory for in-progress files (defaults to the current directory)
    #[arg(long)]
    pub staging: Option<PathBuf>,
}

impl GenerateCommand {
    fn backend(&self) -> Option<Backend> {
        [
            (self.cpp, Backend::Cpp),
            (self.java, Backend::Java),
            (self.cs, Backend::CSharp),
            (self.js, Backend::Js),
        ]
        .into_iter()
        .find_map(|(selected, backend)| selected.then_some(backend))
    }

    pub fn run(&self) -> Result<()> {
        let project = locate_project(self.root.as_deref())?;
        let report = ops::generate(
            &project,
            GenerateOptions {
                backend: self.backend(),
                schema: self.schema.as_deref(),
                staging: self.staging.as_deref(),
            },
        )?;
        report.render(&mut TerminalOutput);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::{Cli, Commands};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("propgen").chain(args.iter().copied()))
    }

    #[test]
    fn test_backend_flag() {
        let cli = parse(&["generate", "--js", "config/PropertyNames.xml"]).unwrap();
        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cmd.backend(), Some(Backend::Js));
        assert_eq!(cmd.schema, Some(PathBuf::from("config/PropertyNames.xml")));
    }

    #[test]
    fn test_no_flag_means_all() {
        let cli = parse(&["generate"]).unwrap();
        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cmd.backend(), None);
    }

    #[test]
    fn test_conflicting_flags_are_rejected() {
        let err = parse(&["generate", "--cpp", "--java"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(parse(&["generate", "--rust"]).is_err());
    }
}
