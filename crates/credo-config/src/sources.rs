//! Knowledge source endpoints and credentials.

use credo_core::Credibility;
use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

fn default_wikipedia_endpoint() -> String {
    String::from("https://en.wikipedia.org/w/api.php")
}

fn default_crossref_endpoint() -> String {
    String::from("https://api.crossref.org")
}

fn default_factcheck_endpoint() -> String {
    String::from("https://factchecktools.googleapis.com/v1alpha1")
}

fn default_language_code() -> String {
    String::from("en")
}

const fn default_medium() -> Credibility {
    Credibility::Medium
}

const fn default_high() -> Credibility {
    Credibility::High
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default)]
    pub crossref: CrossrefConfig,
    #[serde(default)]
    pub factcheck: FactCheckConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
}

impl SourcesConfig {
    /// Names of the sources that are enabled and have what they need to run.
    #[must_use]
    pub fn active(&self) -> Vec<&'static str> {
        [
            ("wikipedia", self.wikipedia.is_configured()),
            ("crossref", self.crossref.is_configured()),
            ("factcheck", self.factcheck.is_configured()),
            ("corpus", self.corpus.is_configured()),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

/// `MediaWiki` search API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WikipediaConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// `api.php` endpoint of the wiki to search.
    #[serde(default = "default_wikipedia_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_medium")]
    pub credibility: Credibility,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_wikipedia_endpoint(),
            credibility: default_medium(),
        }
    }
}

impl WikipediaConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.endpoint.is_empty()
    }
}

/// Crossref scholarly works search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrossrefConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_crossref_endpoint")]
    pub endpoint: String,

    /// Contact address sent with requests to get into Crossref's polite pool.
    #[serde(default)]
    pub mailto: String,

    #[serde(default = "default_high")]
    pub credibility: Credibility,
}

impl Default for CrossrefConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_crossref_endpoint(),
            mailto: String::new(),
            credibility: default_high(),
        }
    }
}

impl CrossrefConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.endpoint.is_empty()
    }
}

/// Google Fact Check Tools `claims:search`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FactCheckConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_factcheck_endpoint")]
    pub endpoint: String,

    /// Google API key. The source stays inactive without one.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_language_code")]
    pub language_code: String,

    #[serde(default = "default_high")]
    pub credibility: Credibility,
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_factcheck_endpoint(),
            api_key: String::new(),
            language_code: default_language_code(),
            credibility: default_high(),
        }
    }
}

impl FactCheckConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.endpoint.is_empty() && !self.api_key.is_empty()
    }
}

/// Local TOML corpus of curated reference entries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Path to the corpus file. The source stays inactive without one.
    #[serde(default)]
    pub path: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: String::new(),
        }
    }
}

impl CorpusConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.path.is_empty()
    }
}
