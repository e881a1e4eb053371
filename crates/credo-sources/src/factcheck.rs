//! Google Fact Check Tools claim search.
//!
//! Each published review becomes its own candidate, carrying the reviewer's
//! textual rating so the verifier can tell a debunk from a confirmation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use credo_core::{Credibility, EvidenceCandidate};

use crate::{EvidenceQuery, KnowledgeSource, error::SourceError, http::check_response};

/// The key travels in this header so it never appears in request URLs or in
/// transport errors that quote them.
const API_KEY_HEADER: &str = "X-Goog-Api-Key";

#[derive(serde::Deserialize)]
struct ClaimSearchResponse {
    #[serde(default)]
    claims: Vec<ReviewedClaim>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewedClaim {
    #[serde(default)]
    text: String,
    #[serde(default)]
    claim_review: Vec<ClaimReview>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimReview {
    publisher: Option<Publisher>,
    url: Option<String>,
    title: Option<String>,
    review_date: Option<DateTime<Utc>>,
    textual_rating: Option<String>,
}

#[derive(serde::Deserialize)]
struct Publisher {
    name: Option<String>,
    site: Option<String>,
}

/// Fact Check Tools API client. Only built when an API key is configured.
pub struct FactCheckSource {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    language_code: String,
    credibility: Credibility,
}

impl FactCheckSource {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        language_code: impl Into<String>,
        credibility: Credibility,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            language_code: language_code.into(),
            credibility,
        }
    }

    fn map_claims(&self, data: ClaimSearchResponse) -> Vec<EvidenceCandidate> {
        let mut candidates = Vec::new();
        for claim in data.claims {
            for review in claim.claim_review {
                let Some(url) = review.url else {
                    continue;
                };
                let source_name = review
                    .publisher
                    .and_then(|p| p.name.or(p.site))
                    .unwrap_or_else(|| "Fact check".to_string());
                let rating = review.textual_rating.filter(|r| !r.trim().is_empty());
                let verdict = rating
                    .as_deref()
                    .map(|r| format!("Rated {r}."))
                    .unwrap_or_default();
                candidates.push(EvidenceCandidate {
                    source_name,
                    source_url: url,
                    title: review.title.unwrap_or_else(|| claim.text.clone()),
                    excerpt: format!("{} {verdict}", claim.text).trim().to_string(),
                    credibility: self.credibility,
                    published_at: review.review_date,
                    rating,
                });
            }
        }
        candidates
    }
}

#[async_trait]
impl KnowledgeSource for FactCheckSource {
    fn name(&self) -> &str {
        "factcheck"
    }

    async fn search(&self, query: &EvidenceQuery) -> Result<Vec<EvidenceCandidate>, SourceError> {
        if self.api_key.is_empty() {
            return Err(SourceError::NotConfigured {
                source_name: self.name().to_string(),
                reason: "no API key".into(),
            });
        }
        let url = format!(
            "{}/claims:search?query={}&languageCode={}&pageSize={}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(&query.search_text()),
            urlencoding::encode(&self.language_code),
            query.limit.min(20),
        );
        let request = self.http.get(&url).header(API_KEY_HEADER, &self.api_key);
        let resp = check_response(request.send().await?).await?;
        let data: ClaimSearchResponse = resp.json().await?;
        Ok(self.map_claims(data))
    }
}
