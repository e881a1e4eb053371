use credo_config::CredoConfig;
use credo_core::Credibility;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SourceRow {
    name: &'static str,
    enabled: bool,
    configured: bool,
    /// Absent for the corpus, whose entries carry their own rating.
    credibility: Option<Credibility>,
    location: String,
}

/// Handle `credo sources`.
pub fn handle(config: &CredoConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&source_rows(config), flags.format)
}

/// One row per source, in the order the retriever consults them.
fn source_rows(config: &CredoConfig) -> Vec<SourceRow> {
    let sources = &config.sources;
    vec![
        SourceRow {
            name: "corpus",
            enabled: sources.corpus.enabled,
            configured: sources.corpus.is_configured(),
            credibility: None,
            location: if sources.corpus.path.is_empty() {
                String::from("-")
            } else {
                sources.corpus.path.clone()
            },
        },
        SourceRow {
            name: "wikipedia",
            enabled: sources.wikipedia.enabled,
            configured: sources.wikipedia.is_configured(),
            credibility: Some(sources.wikipedia.credibility),
            location: sources.wikipedia.endpoint.clone(),
        },
        SourceRow {
            name: "crossref",
            enabled: sources.crossref.enabled,
            configured: sources.crossref.is_configured(),
            credibility: Some(sources.crossref.credibility),
            location: sources.crossref.endpoint.clone(),
        },
        SourceRow {
            name: "factcheck",
            enabled: sources.factcheck.enabled,
            configured: sources.factcheck.is_configured(),
            credibility: Some(sources.factcheck.credibility),
            location: sources.factcheck.endpoint.clone(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rows_follow_retrieval_order() {
        let rows = source_rows(&CredoConfig::default());
        let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["corpus", "wikipedia", "crossref", "factcheck"]);
    }

    #[test]
    fn factcheck_without_key_is_not_configured() {
        let rows = source_rows(&CredoConfig::default());
        let factcheck = rows.iter().find(|r| r.name == "factcheck").unwrap();
        assert!(factcheck.enabled);
        assert!(!factcheck.configured);
    }

    #[test]
    fn corpus_path_is_shown_once_set() {
        let mut config = CredoConfig::default();
        config.sources.corpus.path = "facts.toml".into();
        let rows = source_rows(&config);
        assert_eq!(rows[0].location, "facts.toml");
        assert!(rows[0].configured);
    }
}
