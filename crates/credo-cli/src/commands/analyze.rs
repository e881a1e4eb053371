use std::io::Read;

use anyhow::{Context, bail};
use credo_config::CredoConfig;
use credo_engine::Analyzer;

use crate::cli::{AnalyzeArgs, GlobalFlags};
use crate::output::output_report;
use crate::progress::Progress;

/// Exit status when the trust score is below `--fail-under`.
pub const FAIL_UNDER_EXIT: i32 = 2;

/// Handle `credo analyze`. Returns the process exit status.
pub async fn handle(
    args: &AnalyzeArgs,
    config: &CredoConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<i32> {
    let text = read_input(args)?;
    let analyzer = Analyzer::from_config(config).context("failed to set up the analyzer")?;
    tracing::debug!(sources = ?analyzer.source_names(), "analyzer ready");

    let progress = Progress::spinner("checking claims");
    let result = analyzer.analyze_until(&text, interrupted()).await;
    let report = match result {
        Ok(report) => {
            progress.finish_clear();
            report
        }
        Err(error) => {
            progress.finish_err("analysis failed");
            return Err(error.into());
        }
    };

    output_report(&report, flags.format)?;
    Ok(exit_status(report.trust_score, args.fail_under))
}

fn read_input(args: &AnalyzeArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read text from stdin")?;
    if text.trim().is_empty() {
        bail!("no text given: pass TEXT, --file, or pipe text on stdin");
    }
    Ok(text)
}

/// Resolves on Ctrl-C. Never resolves if the signal handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

const fn exit_status(trust_score: u8, fail_under: Option<u8>) -> i32 {
    match fail_under {
        Some(minimum) if trust_score < minimum => FAIL_UNDER_EXIT,
        _ => 0,
    }
}
