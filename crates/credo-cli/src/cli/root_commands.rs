use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Check the factual claims in a piece of text.
    Analyze(AnalyzeArgs),
    /// List knowledge sources and whether they are active.
    Sources,
    /// Print the JSON Schema of the trust report.
    Schema,
    /// Print the effective configuration, credentials masked.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Text to analyze. Read from stdin when neither TEXT nor --file is given.
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text to analyze from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Exit with status 2 when the trust score is below this value.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_under: Option<u8>,
}
