//! # credo-sources
//!
//! Knowledge sources and evidence retrieval for Credo.
//!
//! Each source answers an [`EvidenceQuery`] with zero or more
//! [`EvidenceCandidate`]s:
//! - Wikipedia (`MediaWiki` search API)
//! - Crossref (scholarly works metadata)
//! - Google Fact Check Tools (published fact-check reviews, needs an API key)
//! - a local TOML corpus of curated references (offline, deterministic)
//!
//! The [`Retriever`] fans a query out to every source concurrently, applies a
//! per-source timeout, and picks at most one candidate per claim.

pub mod corpus;
pub mod crossref;
pub mod factcheck;
pub mod http;
pub mod wikipedia;

mod error;
mod query;
mod retriever;

pub use corpus::{CorpusEntry, CorpusSource};
pub use crossref::CrossrefSource;
pub use error::SourceError;
pub use factcheck::FactCheckSource;
pub use query::EvidenceQuery;
pub use retriever::{Retrieval, Retriever, SourceFailure, rank_matches};
pub use wikipedia::WikipediaSource;

use async_trait::async_trait;
use credo_core::EvidenceCandidate;

/// A place evidence can be looked up.
///
/// Implementations must be cheap to share across tasks; the retriever holds
/// them behind `Arc` and calls `search` from one task per source.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Stable identifier used in logs and failure reports (e.g. `wikipedia`).
    fn name(&self) -> &str;

    /// Look up candidates for one claim.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the source cannot be reached or its answer
    /// cannot be parsed. The retriever treats any error as "no evidence".
    async fn search(&self, query: &EvidenceQuery) -> Result<Vec<EvidenceCandidate>, SourceError>;
}
