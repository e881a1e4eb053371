//! Wikipedia search client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use credo_core::{Credibility, EvidenceCandidate};

use crate::{
    EvidenceQuery, KnowledgeSource,
    error::SourceError,
    http::{check_response, strip_markup},
};

const SOURCE_NAME: &str = "Wikipedia";

#[derive(serde::Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(serde::Deserialize)]
struct SearchQuery {
    search: Vec<SearchHit>,
}

#[derive(serde::Deserialize)]
struct SearchHit {
    title: String,
    #[serde(default)]
    snippet: String,
    timestamp: Option<DateTime<Utc>>,
}

/// `MediaWiki` full-text search.
pub struct WikipediaSource {
    http: reqwest::Client,
    endpoint: String,
    credibility: Credibility,
}

impl WikipediaSource {
    #[must_use]
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, credibility: Credibility) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            credibility,
        }
    }

    fn article_url(&self, title: &str) -> String {
        let base = self
            .endpoint
            .strip_suffix("/w/api.php")
            .unwrap_or(&self.endpoint);
        format!(
            "{base}/wiki/{}",
            urlencoding::encode(&title.replace(' ', "_"))
        )
    }

    fn map_hits(&self, data: SearchResponse) -> Vec<EvidenceCandidate> {
        data.query
            .map(|q| q.search)
            .unwrap_or_default()
            .into_iter()
            .map(|hit| EvidenceCandidate {
                source_name: SOURCE_NAME.to_string(),
                source_url: self.article_url(&hit.title),
                excerpt: strip_markup(&hit.snippet),
                title: hit.title,
                credibility: self.credibility,
                published_at: hit.timestamp,
                rating: None,
            })
            .collect()
    }
}

#[async_trait]
impl KnowledgeSource for WikipediaSource {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn search(&self, query: &EvidenceQuery) -> Result<Vec<EvidenceCandidate>, SourceError> {
        let limit = query.limit.min(50);
        let url = format!(
            "{}?action=query&list=search&format=json&utf8=1&srprop=snippet|timestamp&srlimit={limit}&srsearch={}",
            self.endpoint,
            urlencoding::encode(&query.search_text())
        );
        let resp = check_response(self.http.get(&url).send().await?).await?;

        let data: SearchResponse = resp.json().await?;
        Ok(self.map_hits(data))
    }
}
