//! Local reference corpus.
//!
//! A TOML file of curated references, searched offline by keyword overlap.
//! Results are fully deterministic, which makes the corpus the source of
//! choice for tests and air-gapped runs.
//!
//! ```toml
//! [[entry]]
//! source_name = "World Health Organization"
//! source_url = "https://www.who.int/publications/ai-diagnostics"
//! title = "AI in diagnostics"
//! content = "AI-assisted diagnostics reduced misdiagnosis rates by 45%."
//! credibility = "high"
//! published_at = "2023-06-01T00:00:00Z"   # optional
//! rating = "True"                          # optional
//! ```

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use credo_core::{Credibility, EvidenceCandidate, text::keyword_overlap};
use serde::{Deserialize, Serialize};

use crate::{EvidenceQuery, KnowledgeSource, error::SourceError};

/// One curated reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub source_name: String,
    pub source_url: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
    pub credibility: Credibility,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rating: Option<String>,
}

impl CorpusEntry {
    fn to_candidate(&self) -> EvidenceCandidate {
        EvidenceCandidate {
            source_name: self.source_name.clone(),
            source_url: self.source_url.clone(),
            title: self.title.clone(),
            excerpt: self.content.clone(),
            credibility: self.credibility,
            published_at: self.published_at,
            rating: self.rating.clone(),
        }
    }
}

#[derive(Deserialize)]
struct CorpusFile {
    #[serde(default)]
    entry: Vec<CorpusEntry>,
}

/// In-memory corpus searched by keyword overlap.
#[derive(Debug, Clone, Default)]
pub struct CorpusSource {
    entries: Vec<CorpusEntry>,
}

impl CorpusSource {
    #[must_use]
    pub const fn new(entries: Vec<CorpusEntry>) -> Self {
        Self { entries }
    }

    /// Parse a corpus from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] when the text is not a valid corpus.
    pub fn from_toml(text: &str) -> Result<Self, SourceError> {
        let file: CorpusFile =
            toml::from_str(text).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(Self::new(file.entry))
    }

    /// Load a corpus file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read and
    /// [`SourceError::Parse`] if it is not a valid corpus.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path)?;
        let corpus = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), entries = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with any keyword overlap, best first, ties by URL.
    #[must_use]
    pub fn lookup(&self, query: &EvidenceQuery) -> Vec<EvidenceCandidate> {
        let scoring = query.scoring_text();
        let mut scored: Vec<(f64, &CorpusEntry)> = self
            .entries
            .iter()
            .map(|entry| (keyword_overlap(&scoring, &entry.to_candidate().content()), entry))
            .filter(|(score, _)| *score > 0.0)
            .collect();
        scored.sort_by(|(a_score, a), (b_score, b)| {
            b_score
                .total_cmp(a_score)
                .then_with(|| a.source_url.cmp(&b.source_url))
        });
        scored
            .into_iter()
            .take(query.limit)
            .map(|(_, entry)| entry.to_candidate())
            .collect()
    }
}

#[async_trait]
impl KnowledgeSource for CorpusSource {
    fn name(&self) -> &str {
        "corpus"
    }

    async fn search(&self, query: &EvidenceQuery) -> Result<Vec<EvidenceCandidate>, SourceError> {
        Ok(self.lookup(query))
    }
}
