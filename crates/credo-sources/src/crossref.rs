//! Crossref works search.
//!
//! Crossref indexes metadata for scholarly publications. It is the source that
//! can tell whether a cited journal or paper exists at all; a claim citing a
//! journal that returns no close match ends up with weak or no evidence.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use credo_core::{Credibility, EvidenceCandidate};

use crate::{
    EvidenceQuery, KnowledgeSource,
    error::SourceError,
    http::{check_response, strip_markup},
};

const FALLBACK_NAME: &str = "Crossref";

#[derive(serde::Deserialize)]
struct WorksResponse {
    message: WorksMessage,
}

#[derive(serde::Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<Work>,
}

#[derive(serde::Deserialize)]
struct Work {
    #[serde(rename = "DOI")]
    doi: String,
    #[serde(rename = "URL")]
    url: Option<String>,
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "container-title", default)]
    container_title: Vec<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    published: Option<DateParts>,
}

#[derive(serde::Deserialize)]
struct DateParts {
    #[serde(rename = "date-parts")]
    date_parts: Vec<Vec<Option<i32>>>,
}

impl DateParts {
    /// First date in the record; missing month or day default to 1.
    fn to_utc(&self) -> Option<DateTime<Utc>> {
        let parts = self.date_parts.first()?;
        let year = (*parts.first()?)?;
        let month = parts.get(1).copied().flatten().unwrap_or(1);
        let day = parts.get(2).copied().flatten().unwrap_or(1);
        let date = NaiveDate::from_ymd_opt(
            year,
            u32::try_from(month).ok()?,
            u32::try_from(day).ok()?,
        )?;
        Some(date.and_hms_opt(0, 0, 0)?.and_utc())
    }
}

/// Crossref REST API client.
pub struct CrossrefSource {
    http: reqwest::Client,
    endpoint: String,
    mailto: Option<String>,
    credibility: Credibility,
}

impl CrossrefSource {
    /// `mailto` opts into Crossref's "polite" pool when set.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        mailto: Option<String>,
        credibility: Credibility,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            mailto,
            credibility,
        }
    }

    fn map_works(&self, data: WorksResponse) -> Vec<EvidenceCandidate> {
        data.message
            .items
            .into_iter()
            .filter_map(|work| {
                let title = work.title.into_iter().next()?;
                let source_name = work
                    .container_title
                    .into_iter()
                    .next()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_NAME.to_string());
                let source_url = work
                    .url
                    .unwrap_or_else(|| format!("https://doi.org/{}", work.doi));
                Some(EvidenceCandidate {
                    source_name,
                    source_url,
                    title: strip_markup(&title),
                    excerpt: work
                        .abstract_text
                        .as_deref()
                        .map(strip_markup)
                        .unwrap_or_default(),
                    credibility: self.credibility,
                    published_at: work.published.as_ref().and_then(DateParts::to_utc),
                    rating: None,
                })
            })
            .collect()
    }
}

#[async_trait]
impl KnowledgeSource for CrossrefSource {
    fn name(&self) -> &str {
        "crossref"
    }

    async fn search(&self, query: &EvidenceQuery) -> Result<Vec<EvidenceCandidate>, SourceError> {
        let mut url = format!(
            "{}/works?query.bibliographic={}&rows={}&select=DOI,title,container-title,abstract,published,URL",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(&query.search_text()),
            query.limit.min(20),
        );
        if let Some(mailto) = &self.mailto {
            url.push_str("&mailto=");
            url.push_str(&urlencoding::encode(mailto));
        }

        let resp = check_response(self.http.get(&url).send().await?).await?;
        let data: WorksResponse = resp.json().await?;
        Ok(self.map_works(data))
    }
}
