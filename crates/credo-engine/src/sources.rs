//! Knowledge sources built from configuration.

use std::path::Path;
use std::sync::Arc;

use credo_config::CredoConfig;
use credo_sources::{
    CorpusSource, CrossrefSource, FactCheckSource, KnowledgeSource, WikipediaSource, http,
};

use crate::AnalyzeError;

/// Instantiate every enabled and configured source, in a fixed order:
/// corpus, Wikipedia, Crossref, Fact Check.
///
/// # Errors
///
/// Returns [`AnalyzeError::Source`] if the HTTP client cannot be built or the
/// corpus file cannot be loaded.
pub fn build_sources(config: &CredoConfig) -> Result<Vec<Arc<dyn KnowledgeSource>>, AnalyzeError> {
    let sources = &config.sources;
    let mut built: Vec<Arc<dyn KnowledgeSource>> = Vec::new();

    if sources.corpus.is_configured() {
        let corpus = CorpusSource::from_path(Path::new(&sources.corpus.path))?;
        built.push(Arc::new(corpus));
    }

    let needs_http = sources.wikipedia.is_configured()
        || sources.crossref.is_configured()
        || sources.factcheck.is_configured();
    if needs_http {
        let client = http::client(config.retrieval.timeout())?;

        if sources.wikipedia.is_configured() {
            built.push(Arc::new(WikipediaSource::new(
                client.clone(),
                sources.wikipedia.endpoint.clone(),
                sources.wikipedia.credibility,
            )));
        }
        if sources.crossref.is_configured() {
            let mailto = Some(sources.crossref.mailto.clone()).filter(|m| !m.is_empty());
            built.push(Arc::new(CrossrefSource::new(
                client.clone(),
                sources.crossref.endpoint.clone(),
                mailto,
                sources.crossref.credibility,
            )));
        }
        if sources.factcheck.is_configured() {
            built.push(Arc::new(FactCheckSource::new(
                client,
                sources.factcheck.endpoint.clone(),
                sources.factcheck.api_key.clone(),
                sources.factcheck.language_code.clone(),
                sources.factcheck.credibility,
            )));
        } else if sources.factcheck.enabled {
            tracing::debug!("fact check source enabled but no API key is set; skipping");
        }
    }

    tracing::debug!(
        sources = ?built.iter().map(|s| s.name()).collect::<Vec<_>>(),
        "built knowledge sources"
    );
    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn offline() -> CredoConfig {
        let mut config = CredoConfig::default();
        config.sources.wikipedia.enabled = false;
        config.sources.crossref.enabled = false;
        config.sources.factcheck.enabled = false;
        config
    }

    #[test]
    fn default_config_builds_network_sources() {
        let built = build_sources(&CredoConfig::default()).unwrap();
        let names: Vec<&str> = built.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["wikipedia", "crossref"]);
    }

    #[test]
    fn all_disabled_builds_nothing() {
        assert!(build_sources(&offline()).unwrap().is_empty());
    }

    #[test]
    fn corpus_is_loaded_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[entry]]\nsource_name = \"WHO\"\nsource_url = \"https://who.int\"\n\
             content = \"WHO reported a 45% drop.\"\ncredibility = \"high\""
        )
        .unwrap();
        let mut config = offline();
        config.sources.corpus.path = file.path().display().to_string();
        let built = build_sources(&config).unwrap();
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].name(), "corpus");
    }

    #[test]
    fn missing_corpus_file_is_an_error() {
        let mut config = offline();
        config.sources.corpus.path = "/nonexistent/credo/corpus.toml".into();
        assert!(matches!(build_sources(&config), Err(AnalyzeError::Source(_))));
    }

    #[test]
    fn factcheck_with_key_is_built() {
        let mut config = offline();
        config.sources.factcheck.enabled = true;
        config.sources.factcheck.api_key = "test-key".into();
        let built = build_sources(&config).unwrap();
        assert_eq!(built[0].name(), "factcheck");
    }
}
