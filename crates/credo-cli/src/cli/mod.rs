use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{AnalyzeArgs, Commands};

/// Top-level CLI parser for the `credo` binary.
#[derive(Debug, Parser)]
#[command(
    name = "credo",
    version,
    about = "Credo - check the factual claims in a piece of text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the user and project files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["credo", "--format", "table", "--verbose", "sources"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Sources));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["credo", "schema", "--quiet", "-f", "raw"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn analyze_takes_inline_text() {
        let cli = Cli::try_parse_from(["credo", "analyze", "WHO reported a 45% drop."])
            .expect("cli should parse");
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.text.as_deref(), Some("WHO reported a 45% drop."));
        assert!(args.file.is_none());
    }

    #[test]
    fn analyze_rejects_text_and_file_together() {
        let result = Cli::try_parse_from(["credo", "analyze", "text", "--file", "doc.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn fail_under_is_bounded() {
        assert!(Cli::try_parse_from(["credo", "analyze", "x", "--fail-under", "70"]).is_ok());
        assert!(Cli::try_parse_from(["credo", "analyze", "x", "--fail-under", "101"]).is_err());
    }

    #[test]
    fn default_format_is_json() {
        let cli = Cli::try_parse_from(["credo", "config"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.config.is_none());
    }
}
